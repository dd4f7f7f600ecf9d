use pretty_assertions::assert_eq;

use super::*;
use crate::errors::ErrorId;

fn words(src: &[&str]) -> Vec<Value> {
    src.iter()
        .map(|w| match w.strip_prefix('\'') {
            Some(raw) => Value::LitWord(Name::intern(raw)),
            None => Value::Word(Name::intern(w)),
        })
        .collect()
}

#[test]
fn parse_positionals_and_refinements() {
    let spec = ParamSpec::parse(&words(&["series", "'key", "--part", "length", "--only"]))
        .unwrap();
    assert_eq!(spec.arity(), 2);
    assert_eq!(
        spec.params(),
        &[
            Param { name: Name::intern("series"), evaluate: true },
            Param { name: Name::intern("key"), evaluate: false },
        ]
    );
    assert_eq!(
        spec.refinements(),
        &[
            RefinementSpec { name: Name::intern("part"), value: Some(Name::intern("length")) },
            RefinementSpec { name: Name::intern("only"), value: None },
        ]
    );
    assert!(spec.refinement(Name::intern("only")).is_some());
    assert!(spec.refinement(Name::intern("deep")).is_none());
}

#[test]
fn parse_ignores_doc_strings() {
    let mut items = vec![Value::string("adds things")];
    items.extend(words(&["a", "b"]));
    let spec = ParamSpec::parse(&items).unwrap();
    assert_eq!(spec.arity(), 2);
}

#[test]
fn parse_rejects_positional_after_refinement() {
    let err = ParamSpec::parse(&words(&["a", "--flag", "'b"])).unwrap_err();
    assert_eq!(err.id, ErrorId::BadFuncDef);
}

#[test]
fn parse_rejects_non_words_and_duplicates() {
    let err = ParamSpec::parse(&[Value::Integer(1)]).unwrap_err();
    assert_eq!(err.id, ErrorId::BadFuncDef);
    let err = ParamSpec::parse(&words(&["a", "a"])).unwrap_err();
    assert_eq!(err.id, ErrorId::BadFuncDef);
}

#[test]
fn builder_matches_parse() {
    let built = ParamSpec::new().param("value").flag("only");
    let parsed = ParamSpec::parse(&words(&["value", "--only"])).unwrap();
    assert_eq!(built, parsed);
}

fn noop(_: &mut dyn Executor, _: CallArgs) -> EvalResult {
    Ok(Value::None)
}

#[test]
fn function_identity() {
    let f = FunctionValue::native(ParamSpec::new(), noop);
    let g = FunctionValue::native(ParamSpec::new(), noop);
    assert!(f.ptr_eq(&f.clone()));
    assert!(!f.ptr_eq(&g));
    assert!(!f.is_infix());
    assert!(FunctionValue::native_infix(ParamSpec::new(), noop).is_infix());
}

#[test]
fn call_args_refinements() {
    let mut args = CallArgs::new(vec![Value::Integer(1)]);
    args.set_refinement(Name::intern("part"), Value::Integer(2));
    args.set_refinement(Name::intern("only"), Value::Logic(true));
    assert!(args.has("only"));
    assert!(!args.has("deep"));
    assert_eq!(args.option("part"), Some(&Value::Integer(2)));
    assert_eq!(args.value(0), Value::Integer(1));
    assert_eq!(args.value(5), Value::None);
    let order: Vec<_> = args.refinements().map(|(n, _)| n.as_str()).collect();
    assert_eq!(order, vec!["part", "only"]);
}
