use super::{offset_parts, Axis, PosInfo, PosType, Side};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use termdesigner_core::{NodeId, Rect};

/// Position of a widget along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pos {
    /// Cells from the container origin.
    Absolute(i32),
    /// Percentage of the container extent.
    Percent(f32),
    /// Anchored to the far end of the container, `margin` cells in.
    Fill(i32),
    /// A side of another design, referenced by id and resolved lazily.
    View { target: NodeId, side: Side },
    /// `left + right` or `left - right`.
    Combine {
        left: Box<Pos>,
        right: Box<Pos>,
        subtract: bool,
    },
}

impl Pos {
    pub fn at(n: i32) -> Self {
        Pos::Absolute(n)
    }

    pub fn percent(p: f32) -> Self {
        Pos::Percent(p)
    }

    pub fn fill(margin: i32) -> Self {
        Pos::Fill(margin)
    }

    /// Builds a relative position anchored to `side` of `target`.
    pub fn create_relative(target: NodeId, side: Side, offset: i32) -> Self {
        Pos::View { target, side }.with_offset(offset)
    }

    fn with_offset(self, offset: i32) -> Self {
        if offset == 0 {
            return self;
        }
        let (n, subtract) = offset_parts(offset);
        Pos::Combine {
            left: Box::new(self),
            right: Box::new(Pos::Absolute(n)),
            subtract,
        }
    }

    /// Rebuilds the canonical descriptor for a classification.
    ///
    /// Returns `None` for `Unrecognized`, a relative info missing its
    /// referent, or an absolute value outside `i32`.
    pub fn from_info(info: &PosInfo) -> Option<Self> {
        let base = match info.kind {
            PosType::Absolute => return info.cells().checked_add(info.offset).map(Pos::Absolute),
            PosType::Percent => Pos::Percent(info.value as f32),
            PosType::Fill => Pos::Fill(info.cells()),
            PosType::Relative => Pos::View {
                target: info.referent?,
                side: info.side?,
            },
            PosType::Unrecognized => return None,
        };
        Some(base.with_offset(info.offset))
    }

    /// Reduces the expression to a kind, base value and offset.
    ///
    /// Sums that overflow `i32` classify as `Unrecognized`.
    pub fn classify(&self) -> PosInfo {
        match self {
            Pos::Absolute(n) => PosInfo::simple(PosType::Absolute, f64::from(*n)),
            Pos::Percent(p) => PosInfo::simple(PosType::Percent, f64::from(*p)),
            Pos::Fill(m) => PosInfo::simple(PosType::Fill, f64::from(*m)),
            Pos::View { target, side } => PosInfo {
                kind: PosType::Relative,
                value: 0.0,
                referent: Some(*target),
                side: Some(*side),
                offset: 0,
            },
            Pos::Combine {
                left,
                right,
                subtract,
            } => {
                let l = left.classify();
                let r = right.classify();
                match (l.kind, r.kind) {
                    (PosType::Unrecognized, _) | (_, PosType::Unrecognized) => {
                        PosInfo::unrecognized()
                    }
                    (PosType::Absolute, PosType::Absolute) => {
                        match fold(l.cells(), r.cells(), *subtract) {
                            Some(n) => PosInfo::simple(PosType::Absolute, f64::from(n)),
                            None => PosInfo::unrecognized(),
                        }
                    }
                    (_, PosType::Absolute) => match fold(l.offset, r.cells(), *subtract) {
                        Some(offset) => PosInfo { offset, ..l },
                        None => PosInfo::unrecognized(),
                    },
                    (PosType::Absolute, _) if !*subtract => {
                        match r.offset.checked_add(l.cells()) {
                            Some(offset) => PosInfo { offset, ..r },
                            None => PosInfo::unrecognized(),
                        }
                    }
                    _ => PosInfo::unrecognized(),
                }
            }
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.classify().kind == PosType::Absolute
    }

    pub fn is_percent(&self) -> bool {
        self.classify().kind == PosType::Percent
    }

    pub fn is_fill(&self) -> bool {
        self.classify().kind == PosType::Fill
    }

    pub fn is_relative(&self) -> bool {
        self.classify().kind == PosType::Relative
    }

    /// The absolute cell value, when this is an absolute position.
    pub fn as_absolute(&self) -> Option<i32> {
        let info = self.classify();
        (info.kind == PosType::Absolute).then_some(info.cells())
    }

    /// Referent id, side and offset when this is a relative position.
    pub fn as_relative(&self) -> Option<(NodeId, Side, i32)> {
        let info = self.classify();
        match (info.kind, info.referent, info.side) {
            (PosType::Relative, Some(target), Some(side)) => Some((target, side, info.offset)),
            _ => None,
        }
    }

    /// The same position moved by `delta` cells, keeping its kind.
    pub fn shifted(&self, delta: i32) -> Self {
        if delta == 0 {
            return self.clone();
        }
        let mut info = self.classify();
        if info.kind == PosType::Unrecognized {
            return self.clone().with_offset(delta);
        }
        match info.offset.checked_add(delta) {
            Some(offset) => info.offset = offset,
            None => return self.clone().with_offset(delta),
        }
        Pos::from_info(&info).unwrap_or_else(|| self.clone().with_offset(delta))
    }

    /// Resolves to a screen coordinate inside `area`.
    ///
    /// `frame_of` returns the current frame of a referent; a referent that no
    /// longer resolves anchors at the area origin.
    pub fn resolve(&self, axis: Axis, area: &Rect, frame_of: &dyn Fn(NodeId) -> Option<Rect>) -> i32 {
        let origin = axis.origin(area);
        let extent = axis.extent(area);
        match self {
            Pos::Absolute(n) => origin.saturating_add(*n),
            Pos::Percent(p) => origin.saturating_add((extent as f32 * p / 100.0).floor() as i32),
            Pos::Fill(m) => origin.saturating_add(extent).saturating_sub(*m),
            Pos::View { target, side } => match frame_of(*target) {
                Some(frame) => side.of(&frame),
                None => {
                    tracing::warn!("Relative position references missing design {}", target);
                    origin
                }
            },
            Pos::Combine {
                left,
                right,
                subtract,
            } => {
                let l = left.resolve(axis, area, frame_of);
                let r = right.resolve(axis, area, frame_of).saturating_sub(origin);
                if *subtract {
                    l.saturating_sub(r)
                } else {
                    l.saturating_add(r)
                }
            }
        }
    }

    /// Ids of every design this position references.
    pub fn referents(&self) -> Vec<NodeId> {
        match self {
            Pos::View { target, .. } => vec![*target],
            Pos::Combine { left, right, .. } => {
                let mut ids = left.referents();
                ids.extend(right.referents());
                ids
            }
            _ => Vec::new(),
        }
    }
}

/// `a + b` or `a - b`, `None` on overflow.
pub(super) fn fold(a: i32, b: i32, subtract: bool) -> Option<i32> {
    if subtract {
        a.checked_sub(b)
    } else {
        a.checked_add(b)
    }
}

impl Default for Pos {
    fn default() -> Self {
        Pos::Absolute(0)
    }
}

impl From<i32> for Pos {
    fn from(n: i32) -> Self {
        Pos::Absolute(n)
    }
}

impl Add<i32> for Pos {
    type Output = Pos;

    fn add(self, rhs: i32) -> Pos {
        Pos::Combine {
            left: Box::new(self),
            right: Box::new(Pos::Absolute(rhs)),
            subtract: false,
        }
    }
}

impl Sub<i32> for Pos {
    type Output = Pos;

    fn sub(self, rhs: i32) -> Pos {
        Pos::Combine {
            left: Box::new(self),
            right: Box::new(Pos::Absolute(rhs)),
            subtract: true,
        }
    }
}

impl Add<Pos> for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::Combine {
            left: Box::new(self),
            right: Box::new(rhs),
            subtract: false,
        }
    }
}
