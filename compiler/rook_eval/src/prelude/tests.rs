use pretty_assertions::assert_eq;
use rook_ir::Name;
use rook_value::{ErrorId, TypeKind};

use super::*;
use crate::test_helpers::{load, run, run_in};

fn int(n: i64) -> Value {
    Value::Integer(n)
}

fn block(src: &str) -> Value {
    Value::block(load(src))
}

// Registry contents

#[test]
fn core_registry_covers_series_types() {
    let registry = core_registry().unwrap();
    assert_eq!(
        registry.kinds(),
        vec![TypeKind::String, TypeKind::Binary, TypeKind::Block, TypeKind::Paren]
    );
    for kind in registry.kinds() {
        let frame = registry.type_frame(kind).unwrap();
        assert_eq!(frame.len(), SERIES_ACTIONS.len());
        for action in SERIES_ACTIONS {
            assert!(registry.resolve(kind, Name::intern(action)).is_some(), "{kind} {action}");
        }
    }
}

#[test]
fn type_frames_hold_distinct_implementations() {
    let registry = core_registry().unwrap();
    let first = Name::intern("first");
    let on_block = registry.resolve(TypeKind::Block, first).unwrap();
    let on_string = registry.resolve(TypeKind::String, first).unwrap();
    assert_ne!(on_block, on_string);
}

#[test]
fn registering_twice_fails() {
    let mut builder = TypeRegistryBuilder::new();
    register_series_actions(&mut builder).unwrap();
    assert_eq!(
        register_series_actions(&mut builder).unwrap_err(),
        RegistryError::DuplicateType(TypeKind::Block)
    );
}

#[test]
fn action_specs() {
    let copy = action_spec("copy");
    assert_eq!(copy.arity(), 1);
    assert!(copy.refinement(Name::intern("part")).is_some_and(|r| r.value.is_some()));
    let append = action_spec("append");
    assert_eq!(append.arity(), 2);
    assert!(append.refinement(Name::intern("only")).is_some_and(|r| r.value.is_none()));
    assert_eq!(action_spec("pick").arity(), 2);
    assert_eq!(action_spec("length").arity(), 1);
}

// Words

#[test]
fn logic_and_datatype_words() {
    assert_eq!(run("true").unwrap(), Value::Logic(true));
    assert_eq!(run("none").unwrap(), Value::None);
    assert_eq!(run("type? 1").unwrap(), Value::Datatype(TypeKind::Integer));
    assert_eq!(run("(type? \"a\") = string!").unwrap(), Value::Logic(true));
    assert_eq!(run("type? :first").unwrap(), Value::Datatype(TypeKind::Action));
    assert_eq!(run("type? :fn").unwrap(), Value::Datatype(TypeKind::Function));
}

#[test]
fn not_and_conditionals() {
    assert_eq!(run("not none").unwrap(), Value::Logic(true));
    assert_eq!(run("not 0").unwrap(), Value::Logic(false));
    assert_eq!(run("if false [1]").unwrap(), Value::None);
    assert_eq!(run("if 0 [1]").unwrap(), int(1));
    assert_eq!(run("either none [1] [2]").unwrap(), int(2));
    assert_eq!(run("if true 5").unwrap_err().id, ErrorId::ExpectArg);
}

#[test]
fn do_and_get() {
    assert_eq!(run("do [1 + 2]").unwrap(), int(3));
    assert_eq!(run("do 5").unwrap(), int(5));
    assert_eq!(run("x: 4 get 'x").unwrap(), int(4));
    assert_eq!(run("get 'unbound-here").unwrap_err().id, ErrorId::NoValue);
    assert_eq!(run("get 5").unwrap_err().id, ErrorId::ExpectArg);
}

#[test]
fn loops() {
    assert_eq!(run("loop 0 [1]").unwrap(), Value::None);
    assert_eq!(run("loop -3 [1]").unwrap(), Value::None);
    assert_eq!(run("n: 0 loop 4 [n: n + 2]").unwrap(), int(8));
    assert_eq!(run("loop \"x\" [1]").unwrap_err().id, ErrorId::ExpectArg);
    assert_eq!(run("i: 0 while [i < 3] [i: i + 1 break] i").unwrap(), int(1));
}

#[test]
fn make_object_from_datatype() {
    assert_eq!(run("o: make object! [a: 1] o.a").unwrap(), int(1));
    assert_eq!(run("make 5 []").unwrap_err().id, ErrorId::ExpectArg);
}

// Series actions

#[test]
fn navigation() {
    assert_eq!(run("first next [1 2 3]").unwrap(), int(2));
    assert_eq!(run("first back tail [1 2 3]").unwrap(), int(3));
    assert_eq!(run("first head next next [1 2 3]").unwrap(), int(1));
    assert_eq!(run("first skip [1 2 3] 2").unwrap(), int(3));
    assert_eq!(run("first skip tail [1 2 3] -2").unwrap(), int(2));
    assert_eq!(run("length skip [1 2 3] 10").unwrap(), int(0));
    assert_eq!(run("length next next \"abc\"").unwrap(), int(1));
    assert_eq!(run("length tail #{0102}").unwrap(), int(0));
}

#[test]
fn first_of_empty_series() {
    let err = run("first []").unwrap_err();
    assert_eq!(err.id, ErrorId::EmptySeries);
    assert_eq!(err.message, "cannot take first of an empty series");
    assert_eq!(run("first tail \"ab\"").unwrap_err().id, ErrorId::EmptySeries);
}

#[test]
fn paren_values_use_their_own_type_frame() {
    let mut ev = Evaluator::new().unwrap();
    ev.bind_global("p", Value::paren(load("1 + 2")));
    assert_eq!(run_in(&mut ev, "first :p").unwrap(), int(1));
    assert_eq!(run_in(&mut ev, "length :p").unwrap(), int(3));
    assert_eq!(run_in(&mut ev, "type? next :p").unwrap(), Value::Datatype(TypeKind::Paren));
}

#[test]
fn copy_is_independent() {
    let mut ev = Evaluator::new().unwrap();
    run_in(&mut ev, "a: [1 2 3] b: copy a append b 4").unwrap();
    assert_eq!(run_in(&mut ev, "length a").unwrap(), int(3));
    assert_eq!(run_in(&mut ev, "b").unwrap(), block("1 2 3 4"));
    assert_eq!(run_in(&mut ev, "copy a --part 2").unwrap(), block("1 2"));
    assert_eq!(run_in(&mut ev, "copy next \"abc\"").unwrap(), Value::string("bc"));
}

#[test]
fn append_splices_unless_only() {
    assert_eq!(run("append [1] [2 3]").unwrap(), block("1 2 3"));
    assert_eq!(run("length append [1] [2 3] --only").unwrap(), int(2));
    assert_eq!(run("length append --only [1] [2 3]").unwrap(), int(2));
    assert_eq!(run("append \"ab\" 12").unwrap(), Value::string("ab12"));
    assert_eq!(run("append \"ab\" \"cd\"").unwrap(), Value::string("abcd"));
    assert_eq!(run("append #{01} 2").unwrap(), Value::binary(vec![1, 2]));
    assert_eq!(run("append #{01} \"A\"").unwrap(), Value::binary(vec![1, 65]));
    assert_eq!(run("append #{01} 256").unwrap_err().id, ErrorId::ExpectArg);
}

#[test]
fn insert_and_remove() {
    assert_eq!(run("b: [3] insert b [1 2] b").unwrap(), block("1 2 3"));
    assert_eq!(run("first insert [3] [1 2]").unwrap(), int(3));
    assert_eq!(run("insert \"lo\" \"hel\"").unwrap(), Value::string("lo"));
    assert_eq!(run("remove [1 2 3]").unwrap(), block("2 3"));
    assert_eq!(run("remove [1 2 3] --part 2").unwrap(), block("3"));
    assert_eq!(run("s: \"abc\" remove next s s").unwrap(), Value::string("ac"));
}

#[test]
fn pick_is_relative_and_total() {
    assert_eq!(run("pick [1 2 3] 2").unwrap(), int(2));
    assert_eq!(run("pick next [1 2 3] 2").unwrap(), int(3));
    assert_eq!(run("pick [1 2 3] 0").unwrap(), Value::None);
    assert_eq!(run("pick [1 2] 5").unwrap(), Value::None);
    assert_eq!(run("pick \"abc\" 3").unwrap(), Value::string("c"));
    assert_eq!(run("pick #{0A0B} 1").unwrap(), int(10));
}

#[test]
fn wrong_argument_type() {
    let err = run("skip [1 2] \"x\"").unwrap_err();
    assert_eq!(err.id, ErrorId::ExpectArg);
    assert_eq!(err.message, "skip expected integer!, got string!");
}

// Math

#[test]
fn integer_arithmetic() {
    assert_eq!(run("2 + 3").unwrap(), int(5));
    assert_eq!(run("2 - 5").unwrap(), int(-3));
    assert_eq!(run("4 * 5").unwrap(), int(20));
    assert_eq!(run("-9223372036854775807 - 2").unwrap_err().id, ErrorId::Overflow);
}

#[test]
fn decimal_arithmetic() {
    assert_eq!(run("0.1 + 0.2 = 0.3").unwrap(), Value::Logic(true));
    assert_eq!(run("1.50 * 2").unwrap().to_string(), "3.00");
    assert_eq!(run("10 / 4").unwrap().to_string(), "2.5");
    assert_eq!(run("1 / 3").unwrap().to_string(), "0.3333333333333333333333333333333333");
    assert_eq!(run("1.5 / 0").unwrap_err().id, ErrorId::ZeroDivide);
}

#[test]
fn wide_decimals_round_instead_of_overflowing() {
    assert_eq!(
        run("12345678901234567890.0 + 0.12345678901234567890").unwrap().to_string(),
        "12345678901234567890.12345678901235"
    );
    assert_eq!(
        run("10000000000.0000000001 * 10000000000.0000000001").unwrap().to_string(),
        "100000000000000000002.0000000000000"
    );
    let wide = format!("{}.9", "9".repeat(33));
    assert_eq!(run(&format!("{wide} * 100")).unwrap_err().id, ErrorId::PrecisionOverflow);
}

#[test]
fn comparisons() {
    assert_eq!(run("1 < 1.5").unwrap(), Value::Logic(true));
    assert_eq!(run("2.0 > 1").unwrap(), Value::Logic(true));
    assert_eq!(run("\"b\" > \"a\"").unwrap(), Value::Logic(true));
    assert_eq!(run("[1 2] = [1 2]").unwrap(), Value::Logic(true));
    assert_eq!(run("[1 2] <> [1 3]").unwrap(), Value::Logic(true));
    assert_eq!(run("\"a\" = 1").unwrap(), Value::Logic(false));
    let err = run("\"a\" + 1").unwrap_err();
    assert_eq!(err.id, ErrorId::ExpectArg);
    assert_eq!(err.message, "+ expected number!, got string!");
    assert_eq!(run("[1] < 2").unwrap_err().id, ErrorId::ExpectArg);
}
