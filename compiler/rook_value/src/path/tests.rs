use std::num::NonZeroUsize;

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::ErrorId;

fn idx(n: usize) -> Segment {
    Segment::Index(NonZeroUsize::new(n).unwrap())
}

#[test]
fn head_must_be_word() {
    let err = Path::new(vec![idx(1), Segment::Word(Name::intern("a"))]).unwrap_err();
    assert_eq!(err.id, ErrorId::PathEvalBase);
    let err = Path::new(vec![]).unwrap_err();
    assert_eq!(err.id, ErrorId::PathEvalBase);
}

#[test]
fn accessors() {
    let path = Path::new(vec![
        Segment::Word(Name::intern("obj")),
        Segment::Word(Name::intern("items")),
        idx(2),
    ])
    .unwrap();
    assert_eq!(path.base(), Name::intern("obj"));
    assert_eq!(path.rest().len(), 2);
    assert_eq!(path.last_word(), Name::intern("items"));
    assert_eq!(path.to_string(), "obj.items.2");
}

#[test]
fn eval_segment_renders_as_paren() {
    let path = Path::new(vec![
        Segment::Word(Name::intern("data")),
        Segment::Eval(Series::new(vec![Value::Word(Name::intern("i"))])),
    ])
    .unwrap();
    assert_eq!(path.to_string(), "data.(i)");
    assert_eq!(path.last_word(), Name::intern("data"));
}
