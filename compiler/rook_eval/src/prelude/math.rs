//! Infix arithmetic and comparison.
//!
//! Integers stay integers while the result is exact; mixing an integer with
//! a decimal, or dividing without an exact quotient, yields a decimal.

use std::cmp::Ordering;

use rook_ir::Name;
use rook_value::errors::{expect_arg, overflow, zero_divide};
use rook_value::{CallArgs, Decimal, EvalError, EvalResult, Executor, NativeFn, Value};

pub(super) fn table() -> [(&'static str, NativeFn); 8] {
    [
        ("+", add),
        ("-", subtract),
        ("*", multiply),
        ("/", divide),
        ("=", equal),
        ("<>", not_equal),
        ("<", lesser),
        (">", greater),
    ]
}

#[derive(Clone)]
enum Number {
    Int(i64),
    Dec(Decimal),
}

impl Number {
    fn of(value: &Value, op: &str) -> Result<Number, EvalError> {
        match value {
            Value::Integer(n) => Ok(Number::Int(*n)),
            Value::Decimal(d) => Ok(Number::Dec(d.clone())),
            other => Err(expect_arg(Name::intern(op), "number!", other.kind())),
        }
    }

    fn decimal(self) -> Decimal {
        match self {
            Number::Int(n) => Decimal::from_i64(n),
            Number::Dec(d) => d,
        }
    }
}

fn operands(args: &CallArgs, op: &str) -> Result<(Number, Number), EvalError> {
    Ok((
        Number::of(&args.value(0), op)?,
        Number::of(&args.value(1), op)?,
    ))
}

fn arithmetic(
    args: &CallArgs,
    op: &str,
    int: fn(i64, i64) -> Option<i64>,
    dec: fn(&Decimal, &Decimal) -> Result<Decimal, EvalError>,
) -> EvalResult {
    match operands(args, op)? {
        (Number::Int(a), Number::Int(b)) => int(a, b)
            .map(Value::Integer)
            .ok_or_else(|| overflow(op)),
        (a, b) => dec(&a.decimal(), &b.decimal()).map(Value::Decimal),
    }
}

fn add(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    arithmetic(&args, "+", i64::checked_add, Decimal::checked_add)
}

fn subtract(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    arithmetic(&args, "-", i64::checked_sub, Decimal::checked_sub)
}

fn multiply(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    arithmetic(&args, "*", i64::checked_mul, Decimal::checked_mul)
}

fn divide(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    match operands(&args, "/")? {
        (Number::Int(_), Number::Int(0)) => Err(zero_divide()),
        (Number::Int(a), Number::Int(b)) if a.checked_rem(b) == Some(0) => a
            .checked_div(b)
            .map(Value::Integer)
            .ok_or_else(|| overflow("/")),
        (a, b) => a.decimal().checked_div(&b.decimal()).map(Value::Decimal),
    }
}

/// Numbers compare by value across integer and decimal; everything else
/// compares structurally.
fn equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(x), Value::Decimal(y)) | (Value::Decimal(y), Value::Integer(x)) => {
            Decimal::from_i64(*x).numeric_cmp(y) == Ordering::Equal
        }
        _ => a == b,
    }
}

fn order(args: &CallArgs, op: &str) -> Result<Ordering, EvalError> {
    let (a, b) = (args.value(0), args.value(1));
    match (&a, &b) {
        (Value::Integer(x), Value::Integer(y)) => Ok(x.cmp(y)),
        (Value::String(x), Value::String(y)) => {
            Ok(x.with_items(|left| y.with_items(|right| left.cmp(right))))
        }
        _ => {
            let (x, y) = operands(args, op)?;
            Ok(x.decimal().numeric_cmp(&y.decimal()))
        }
    }
}

fn equal(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(Value::Logic(equals(&args.value(0), &args.value(1))))
}

fn not_equal(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(Value::Logic(!equals(&args.value(0), &args.value(1))))
}

fn lesser(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(Value::Logic(order(&args, "<")? == Ordering::Less))
}

fn greater(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(Value::Logic(order(&args, ">")? == Ordering::Greater))
}
