use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rook_value::Decimal;

use super::*;
use crate::frame::Frame;

fn ints(n: i64) -> Vec<Value> {
    (1..=n).map(Value::Integer).collect()
}

#[test]
fn window_in_the_middle() {
    let items = ints(9);
    assert_eq!(near(&items, 4).as_str(), "2 3 4 >>> 5 <<< 6 7 8");
}

#[test]
fn window_at_first_index() {
    let items = ints(9);
    assert_eq!(near(&items, 0).as_str(), ">>> 1 <<< 2 3 4");
}

#[test]
fn window_at_last_index() {
    let items = ints(9);
    assert_eq!(near(&items, 8).as_str(), "6 7 8 >>> 9 <<<");
}

#[test]
fn window_clamps_index_and_handles_empty() {
    assert_eq!(near(&ints(2), 10).as_str(), "1 >>> 2 <<<");
    assert_eq!(near(&[], 0).as_str(), "");
}

#[test]
fn decimals_show_scale() {
    let items = vec![
        Value::Word(Name::intern("x")),
        Value::Decimal(Decimal::parse("1.50").unwrap()),
    ];
    assert_eq!(near(&items, 1).as_str(), "x >>> 1.50[scale=2] <<<");
}

#[test]
fn long_values_are_abbreviated() {
    let long = Value::string(&"a".repeat(100));
    let text = near(&[long], 0);
    let rendered = text.as_str();
    assert!(rendered.starts_with(">>> \"aaa"));
    assert!(rendered.ends_with("... <<<"));
    assert_eq!(rendered.len(), ">>> ".len() + NEAR_VALUE_WIDTH + " <<<".len());
}

proptest! {
    #[test]
    fn window_never_exceeds_bounds(len in 1usize..40, index in 0usize..60) {
        let items = ints(i64::try_from(len).unwrap());
        let text = near(&items, index);
        let shown = text.as_str().split(' ').filter(|t| *t != ">>>" && *t != "<<<").count();
        let clamped = index.min(len - 1);
        let expected = clamped.min(NEAR_RADIUS) + 1 + (len - 1 - clamped).min(NEAR_RADIUS);
        prop_assert_eq!(shown, expected);
        prop_assert_eq!(text.as_str().matches(">>>").count(), 1);
        let marked = format!(">>> {} <<<", clamped + 1);
        prop_assert!(text.as_str().contains(&marked));
    }
}

#[test]
fn where_lists_innermost_first() {
    let mut stack = Stack::new(64);
    let root = stack.reference(FrameId::ROOT).unwrap();
    let outer = stack
        .push(Frame::call(root.clone(), FrameId::ROOT, Name::intern("outer"), Rc::default()))
        .unwrap();
    let object = stack.push(Frame::object(outer.clone())).unwrap();
    let inner = stack
        .push(Frame::call(root, object.id(), Name::intern("inner"), Rc::default()))
        .unwrap();
    let (outer, inner) = (outer.id(), inner.id());

    let trace = where_trace(&stack, inner, 16);
    let names: Vec<_> = trace.frames().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["inner", "outer"]);
    assert_eq!(active_calls(&stack, inner), vec![inner, outer]);

    let bounded = where_trace(&stack, inner, 1);
    assert_eq!(bounded.frames(), &[Name::intern("inner")]);
    assert!(where_trace(&stack, FrameId::ROOT, 16).is_empty());
}
