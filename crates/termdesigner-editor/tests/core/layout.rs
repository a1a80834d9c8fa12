use proptest::prelude::*;
use termdesigner_core::{NodeId, Point, Rect};
use termdesigner_editor::{
    parse_dim, parse_pos, Axis, Dim, DimType, Document, Pos, PosType, Side, WidgetKind,
};
use termdesigner_settings::DesignerConfig;

const BUTTON: NodeId = NodeId::new(3);

fn names(id: NodeId) -> Option<String> {
    (id == BUTTON).then(|| "button1".to_string())
}

fn resolve(name: &str) -> Option<NodeId> {
    (name == "button1").then_some(BUTTON)
}

// Values stay 20 cells inside `i32` so `test_shift_keeps_kind` never overflows.
const LIMIT: i32 = i32::MAX - 20;

fn pos_strategy() -> impl Strategy<Value = Pos> {
    prop_oneof![
        (-LIMIT..LIMIT).prop_map(Pos::at),
        (0u8..=100, -LIMIT..LIMIT).prop_map(|(p, off)| Pos::percent(p as f32).shifted(off)),
        (0i32..LIMIT, -LIMIT..LIMIT).prop_map(|(m, off)| Pos::fill(m).shifted(off)),
        (prop::sample::select(Side::ALL.to_vec()), -LIMIT..LIMIT)
            .prop_map(|(side, off)| Pos::create_relative(BUTTON, side, off)),
    ]
}

fn dim_strategy() -> impl Strategy<Value = Dim> {
    prop_oneof![
        (0i32..LIMIT).prop_map(Dim::sized),
        (0u8..=100, -LIMIT..LIMIT).prop_map(|(p, off)| Dim::percent(p as f32).shifted(off)),
        (0i32..LIMIT, -LIMIT..LIMIT).prop_map(|(m, off)| Dim::fill(m).shifted(off)),
    ]
}

proptest! {
    #[test]
    fn test_pos_code_round_trip(pos in pos_strategy()) {
        let code = pos.to_code(&names);
        let parsed = parse_pos(&code, &resolve).unwrap();
        prop_assert_eq!(parsed.classify(), pos.classify());
        prop_assert_eq!(parsed.to_code(&names), code);
    }

    #[test]
    fn test_dim_code_round_trip(dim in dim_strategy()) {
        let code = dim.to_code();
        let parsed = parse_dim(&code).unwrap();
        prop_assert_eq!(parsed.classify(), dim.classify());
        prop_assert_eq!(parsed.to_code(), code);
    }

    #[test]
    fn test_pos_has_exactly_one_kind(pos in pos_strategy()) {
        let kinds = [pos.is_absolute(), pos.is_percent(), pos.is_fill(), pos.is_relative()];
        prop_assert_eq!(kinds.iter().filter(|k| **k).count(), 1);
    }

    #[test]
    fn test_dim_has_exactly_one_kind(dim in dim_strategy()) {
        let kinds = [dim.is_absolute(), dim.is_percent(), dim.is_fill()];
        prop_assert_eq!(kinds.iter().filter(|k| **k).count(), 1);
    }

    #[test]
    fn test_shift_keeps_kind(pos in pos_strategy(), delta in -20i32..20) {
        let before = pos.classify();
        let after = pos.shifted(delta).classify();
        prop_assert_eq!(after.kind, before.kind);
        if before.kind == PosType::Absolute {
            prop_assert_eq!(after.cells(), before.cells() + delta);
        } else {
            prop_assert_eq!(after.offset, before.offset + delta);
        }
    }
}

#[test]
fn test_resolve_in_content_area() {
    let area = Rect::new(1, 1, 78, 23);
    let none = |_: NodeId| -> Option<Rect> { None };
    assert_eq!(Pos::at(3).resolve(Axis::Horizontal, &area, &none), 4);
    assert_eq!(Pos::percent(50.0).resolve(Axis::Horizontal, &area, &none), 40);
    assert_eq!((Pos::fill(2) - 1).resolve(Axis::Vertical, &area, &none), 21);
    assert_eq!(Dim::fill(2).resolve(Axis::Horizontal, &area, 10), 67);
    assert_eq!(Dim::fill(100).resolve(Axis::Horizontal, &area, 10), 0);
}

#[test]
fn test_relative_resolves_against_referent_frame() {
    let area = Rect::new(1, 1, 78, 23);
    let frame_of = |id: NodeId| (id == BUTTON).then(|| Rect::new(10, 4, 6, 1));
    let pos = Pos::create_relative(BUTTON, Side::Right, 2);
    assert_eq!(pos.resolve(Axis::Horizontal, &area, &frame_of), 18);
    let pos = Pos::create_relative(BUTTON, Side::Bottom, 0);
    assert_eq!(pos.resolve(Axis::Vertical, &area, &frame_of), 5);
}

#[test]
fn test_unrecognized_composition_keeps_structure() {
    let pos = Pos::percent(10.0) + Pos::fill(1);
    assert_eq!(pos.classify().kind, PosType::Unrecognized);
    let parsed = parse_pos(&pos.to_code(&names), &resolve).unwrap();
    assert_eq!(parsed, pos);

    let dim = Dim::percent(10.0) + Dim::fill(1);
    assert_eq!(dim.classify().kind, DimType::Unrecognized);
    assert_eq!(parse_dim(&dim.to_code()).unwrap(), dim);
}

fn anchor_after(doc: &mut Document, id: NodeId, prev: NodeId) {
    let w = doc.context_mut().tree.get_mut(id).unwrap().widget_mut();
    w.x = Pos::create_relative(prev, Side::Right, 1);
    w.y = Pos::create_relative(prev, Side::Bottom, 0);
}

#[test]
fn test_long_relative_chain_resolves() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let first = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    let mut prev = first;
    for _ in 1..80 {
        let next = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
        anchor_after(&mut doc, next, prev);
        prev = next;
    }

    // each label sits one cell right of the previous one's right edge, one row down
    assert_eq!(doc.tree().frame(first), Some(Rect::new(1, 1, 4, 1)));
    assert_eq!(doc.tree().frame(prev), Some(Rect::new(1 + 5 * 79, 80, 4, 1)));
    let hit = doc.tree().hit_test(Point::new(1, 1), None).unwrap();
    assert_eq!(hit.node, first);
}

#[test]
fn test_cyclic_relative_layout_resolves() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let a = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    let b = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    anchor_after(&mut doc, a, b);
    anchor_after(&mut doc, b, a);

    // the reference closing the loop anchors at the content origin
    assert_eq!(doc.tree().frame(a), Some(Rect::new(7, 2, 4, 1)));
    assert_eq!(doc.tree().frame(b), Some(Rect::new(7, 2, 4, 1)));
    assert!(doc.tree().hit_test(Point::new(7, 2), None).is_some());
    assert!(doc.tree().container_at(Point::new(7, 2), None).is_some());
}
