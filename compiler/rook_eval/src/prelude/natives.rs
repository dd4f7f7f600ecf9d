//! Definition, control-flow and binding natives.

use rook_ir::Name;
use rook_value::errors::{break_signal, continue_signal, expect_arg};
use rook_value::{
    CallArgs, ErrorId, EvalError, EvalResult, Executor, NativeFn, ParamSpec, Series, TypeKind,
    Value,
};

use super::NativeEntry;

pub(super) fn table() -> Vec<NativeEntry> {
    let entries: [(&str, ParamSpec, NativeFn); 15] = [
        ("fn", ParamSpec::new().param("spec").param("body"), native_fn),
        ("does", ParamSpec::new().param("body"), does),
        ("object", ParamSpec::new().param("body"), object),
        ("make", ParamSpec::new().param("prototype").param("body"), make),
        ("do", ParamSpec::new().param("value"), do_value),
        ("if", ParamSpec::new().param("condition").param("body"), if_native),
        (
            "either",
            ParamSpec::new().param("condition").param("true-body").param("false-body"),
            either,
        ),
        ("loop", ParamSpec::new().param("count").param("body"), loop_native),
        ("while", ParamSpec::new().param("condition").param("body"), while_native),
        ("break", ParamSpec::new().option("with", "value"), break_native),
        ("continue", ParamSpec::new(), continue_native),
        ("set", ParamSpec::new().param("word").param("value"), set),
        ("get", ParamSpec::new().param("word"), get),
        ("type?", ParamSpec::new().param("value"), type_of),
        ("not", ParamSpec::new().param("value"), not),
    ];
    entries.into_iter().collect()
}

/// Positional argument `index` as a block.
fn block_arg(args: &CallArgs, index: usize, origin: &str) -> Result<Series<Value>, EvalError> {
    match args.value(index) {
        Value::Block(block) => Ok(block),
        other => Err(expect_arg(Name::intern(origin), "block!", other.kind())),
    }
}

fn word_arg(args: &CallArgs, origin: &str) -> Result<Name, EvalError> {
    let value = args.value(0);
    value
        .as_name()
        .ok_or_else(|| expect_arg(Name::intern(origin), "word!", value.kind()))
}

fn native_fn(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let spec = block_arg(&args, 0, "fn")?;
    let body = block_arg(&args, 1, "fn")?;
    ex.make_function(&spec, &body)
}

fn does(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let body = block_arg(&args, 0, "does")?;
    ex.make_function(&Series::new(Vec::new()), &body)
}

fn object(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let body = block_arg(&args, 0, "object")?;
    ex.make_object(None, &body)
}

fn make(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let prototype = match args.value(0) {
        Value::Object(proto) => Some(proto),
        Value::Datatype(TypeKind::Object) => None,
        other => return Err(expect_arg(Name::intern("make"), "object!", other.kind())),
    };
    let body = block_arg(&args, 1, "make")?;
    ex.make_object(prototype, &body)
}

fn do_value(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    match args.value(0) {
        Value::Block(items) | Value::Paren(items) => ex.do_series(&items),
        other => Ok(other),
    }
}

fn if_native(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let body = block_arg(&args, 1, "if")?;
    if args.value(0).is_truthy() {
        ex.do_series(&body)
    } else {
        Ok(Value::None)
    }
}

fn either(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let branch = if args.value(0).is_truthy() { 1 } else { 2 };
    ex.do_series(&block_arg(&args, branch, "either")?)
}

/// Outcome of one loop body run.
enum Flow {
    Continue(Value),
    Exit(Value),
}

/// Run a loop body, consuming `break` and `continue`.
fn run_body(ex: &mut dyn Executor, body: &Series<Value>) -> Result<Flow, EvalError> {
    match ex.do_series(body) {
        Ok(value) => Ok(Flow::Continue(value)),
        Err(err) if err.id == ErrorId::Continue => Ok(Flow::Continue(Value::None)),
        Err(err) if err.id == ErrorId::Break => Ok(Flow::Exit(err.thrown.unwrap_or(Value::None))),
        Err(err) => Err(err),
    }
}

fn loop_native(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let count = match args.value(0) {
        Value::Integer(n) => n,
        other => return Err(expect_arg(Name::intern("loop"), "integer!", other.kind())),
    };
    let body = block_arg(&args, 1, "loop")?;
    let mut result = Value::None;
    for _ in 0..count.max(0) {
        match run_body(ex, &body)? {
            Flow::Continue(value) => result = value,
            Flow::Exit(value) => return Ok(value),
        }
    }
    Ok(result)
}

fn while_native(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let condition = block_arg(&args, 0, "while")?;
    let body = block_arg(&args, 1, "while")?;
    let mut result = Value::None;
    while ex.do_series(&condition)?.is_truthy() {
        match run_body(ex, &body)? {
            Flow::Continue(value) => result = value,
            Flow::Exit(value) => return Ok(value),
        }
    }
    Ok(result)
}

fn break_native(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Err(break_signal(args.option("with").cloned()))
}

fn continue_native(_: &mut dyn Executor, _: CallArgs) -> EvalResult {
    Err(continue_signal())
}

/// Dynamic assignment: nearest existing binding, else the root frame.
fn set(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let name = word_arg(&args, "set")?;
    let value = args.value(1);
    ex.set_dynamic(name, value.clone())?;
    Ok(value)
}

fn get(ex: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let name = word_arg(&args, "get")?;
    ex.get_word(name)
}

fn type_of(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(Value::Datatype(args.value(0).kind()))
}

fn not(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(Value::Logic(!args.value(0).is_truthy()))
}
