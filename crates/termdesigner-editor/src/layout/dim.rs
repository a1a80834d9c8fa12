use super::pos::fold;
use super::{offset_parts, Axis, DimInfo, DimType};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use termdesigner_core::Rect;

/// Size of a widget along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Dim {
    /// Fixed number of cells.
    Absolute(i32),
    /// Percentage of the container extent.
    Percent(f32),
    /// Everything up to the far end of the container, less `margin`.
    Fill(i32),
    /// `left + right` or `left - right`.
    Combine {
        left: Box<Dim>,
        right: Box<Dim>,
        subtract: bool,
    },
}

impl Dim {
    pub fn sized(n: i32) -> Self {
        Dim::Absolute(n)
    }

    pub fn percent(p: f32) -> Self {
        Dim::Percent(p)
    }

    pub fn fill(margin: i32) -> Self {
        Dim::Fill(margin)
    }

    fn with_offset(self, offset: i32) -> Self {
        if offset == 0 {
            return self;
        }
        let (n, subtract) = offset_parts(offset);
        Dim::Combine {
            left: Box::new(self),
            right: Box::new(Dim::Absolute(n)),
            subtract,
        }
    }

    /// Rebuilds the canonical descriptor for a classification.
    pub fn from_info(info: &DimInfo) -> Option<Self> {
        let base = match info.kind {
            DimType::Absolute => return info.cells().checked_add(info.offset).map(Dim::Absolute),
            DimType::Percent => Dim::Percent(info.value as f32),
            DimType::Fill => Dim::Fill(info.cells()),
            DimType::Unrecognized => return None,
        };
        Some(base.with_offset(info.offset))
    }

    /// Reduces the expression to a kind, base value and offset.
    ///
    /// Sums that overflow `i32` classify as `Unrecognized`.
    pub fn classify(&self) -> DimInfo {
        match self {
            Dim::Absolute(n) => DimInfo {
                kind: DimType::Absolute,
                value: f64::from(*n),
                offset: 0,
            },
            Dim::Percent(p) => DimInfo {
                kind: DimType::Percent,
                value: f64::from(*p),
                offset: 0,
            },
            Dim::Fill(m) => DimInfo {
                kind: DimType::Fill,
                value: f64::from(*m),
                offset: 0,
            },
            Dim::Combine {
                left,
                right,
                subtract,
            } => {
                let l = left.classify();
                let r = right.classify();
                let folded = match (l.kind, r.kind) {
                    (DimType::Unrecognized, _) | (_, DimType::Unrecognized) => None,
                    (DimType::Absolute, DimType::Absolute) => {
                        fold(l.cells(), r.cells(), *subtract).map(|n| DimInfo {
                            kind: DimType::Absolute,
                            value: f64::from(n),
                            offset: 0,
                        })
                    }
                    (_, DimType::Absolute) => {
                        fold(l.offset, r.cells(), *subtract).map(|offset| DimInfo { offset, ..l })
                    }
                    (DimType::Absolute, _) if !*subtract => {
                        r.offset.checked_add(l.cells()).map(|offset| DimInfo { offset, ..r })
                    }
                    _ => None,
                };
                folded.unwrap_or_else(DimInfo::unrecognized)
            }
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.classify().kind == DimType::Absolute
    }

    pub fn is_percent(&self) -> bool {
        self.classify().kind == DimType::Percent
    }

    pub fn is_fill(&self) -> bool {
        self.classify().kind == DimType::Fill
    }

    /// The fixed size, when this is an absolute size.
    pub fn as_absolute(&self) -> Option<i32> {
        let info = self.classify();
        (info.kind == DimType::Absolute).then_some(info.cells())
    }

    /// The percentage, when this is a percent size.
    pub fn as_percent(&self) -> Option<f32> {
        let info = self.classify();
        (info.kind == DimType::Percent).then_some(info.value as f32)
    }

    /// The margin, when this is a fill size.
    pub fn as_fill(&self) -> Option<i32> {
        let info = self.classify();
        (info.kind == DimType::Fill).then_some(info.cells())
    }

    /// The same size grown by `delta` cells, keeping its kind.
    pub fn shifted(&self, delta: i32) -> Self {
        if delta == 0 {
            return self.clone();
        }
        let mut info = self.classify();
        if info.kind == DimType::Unrecognized {
            return self.clone().with_offset(delta);
        }
        match info.offset.checked_add(delta) {
            Some(offset) => info.offset = offset,
            None => return self.clone().with_offset(delta),
        }
        Dim::from_info(&info).unwrap_or_else(|| self.clone().with_offset(delta))
    }

    /// Resolves to a cell extent for a widget positioned at `start` inside
    /// `area`. Never negative.
    pub fn resolve(&self, axis: Axis, area: &Rect, start: i32) -> i32 {
        self.resolve_signed(axis, area, start).max(0)
    }

    fn resolve_signed(&self, axis: Axis, area: &Rect, start: i32) -> i32 {
        let extent = axis.extent(area);
        match self {
            Dim::Absolute(n) => *n,
            Dim::Percent(p) => (extent as f32 * p / 100.0).floor() as i32,
            Dim::Fill(m) => axis
                .origin(area)
                .saturating_add(extent)
                .saturating_sub(start)
                .saturating_sub(*m),
            Dim::Combine {
                left,
                right,
                subtract,
            } => {
                let l = left.resolve_signed(axis, area, start);
                let r = right.resolve_signed(axis, area, start);
                if *subtract {
                    l.saturating_sub(r)
                } else {
                    l.saturating_add(r)
                }
            }
        }
    }
}

impl Default for Dim {
    fn default() -> Self {
        Dim::Absolute(1)
    }
}

impl From<i32> for Dim {
    fn from(n: i32) -> Self {
        Dim::Absolute(n)
    }
}

impl Add<i32> for Dim {
    type Output = Dim;

    fn add(self, rhs: i32) -> Dim {
        Dim::Combine {
            left: Box::new(self),
            right: Box::new(Dim::Absolute(rhs)),
            subtract: false,
        }
    }
}

impl Sub<i32> for Dim {
    type Output = Dim;

    fn sub(self, rhs: i32) -> Dim {
        Dim::Combine {
            left: Box::new(self),
            right: Box::new(Dim::Absolute(rhs)),
            subtract: true,
        }
    }
}

impl Add<Dim> for Dim {
    type Output = Dim;

    fn add(self, rhs: Dim) -> Dim {
        Dim::Combine {
            left: Box::new(self),
            right: Box::new(rhs),
            subtract: false,
        }
    }
}
