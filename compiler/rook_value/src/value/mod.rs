//! The runtime value type.
//!
//! `Value` is a closed sum over everything a script can hold. Scalars and
//! words are stored inline; series, functions and paths are cheap handles to
//! shared storage, so cloning a `Value` never deep-copies.
//!
//! # Construction
//!
//! Use the factory methods (`Value::string`, `Value::block`, ...). Payload
//! types that carry invariants (`Series` cursors, `Decimal` digits, `Path`
//! heads) cannot be built invalid.

use std::fmt::{self, Write as _};

use rook_ir::Name;

use crate::datatype::TypeKind;
use crate::decimal::Decimal;
use crate::function::{ActionValue, FunctionValue};
use crate::object::ObjectValue;
use crate::path::Path;
use crate::port::PortHandle;
use crate::series::Series;

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    None,
    Logic(bool),
    Integer(i64),
    Decimal(Decimal),
    String(Series<char>),
    Binary(Series<u8>),
    Word(Name),
    SetWord(Name),
    GetWord(Name),
    LitWord(Name),
    Block(Series<Value>),
    Paren(Series<Value>),
    Function(FunctionValue),
    Action(ActionValue),
    Object(ObjectValue),
    Path(Path),
    GetPath(Path),
    SetPath(Path),
    Datatype(TypeKind),
    Port(PortHandle),
}

// Factory methods
impl Value {
    #[inline]
    pub fn logic(b: bool) -> Self {
        Value::Logic(b)
    }

    #[inline]
    pub fn integer(n: i64) -> Self {
        Value::Integer(n)
    }

    #[inline]
    pub fn decimal(d: Decimal) -> Self {
        Value::Decimal(d)
    }

    /// String value with its cursor at the head.
    pub fn string(s: &str) -> Self {
        Value::String(Series::new(s.chars().collect()))
    }

    /// Binary value with its cursor at the head.
    pub fn binary(bytes: Vec<u8>) -> Self {
        Value::Binary(Series::new(bytes))
    }

    #[inline]
    pub fn word(name: Name) -> Self {
        Value::Word(name)
    }

    #[inline]
    pub fn set_word(name: Name) -> Self {
        Value::SetWord(name)
    }

    #[inline]
    pub fn get_word(name: Name) -> Self {
        Value::GetWord(name)
    }

    #[inline]
    pub fn lit_word(name: Name) -> Self {
        Value::LitWord(name)
    }

    /// Block value with its cursor at the head.
    pub fn block(items: Vec<Value>) -> Self {
        Value::Block(Series::new(items))
    }

    /// Paren value with its cursor at the head.
    pub fn paren(items: Vec<Value>) -> Self {
        Value::Paren(Series::new(items))
    }

    #[inline]
    pub fn function(f: FunctionValue) -> Self {
        Value::Function(f)
    }

    #[inline]
    pub fn action(a: ActionValue) -> Self {
        Value::Action(a)
    }

    #[inline]
    pub fn object(o: ObjectValue) -> Self {
        Value::Object(o)
    }

    #[inline]
    pub fn path(p: Path) -> Self {
        Value::Path(p)
    }

    #[inline]
    pub fn get_path(p: Path) -> Self {
        Value::GetPath(p)
    }

    #[inline]
    pub fn set_path(p: Path) -> Self {
        Value::SetPath(p)
    }

    #[inline]
    pub fn datatype(kind: TypeKind) -> Self {
        Value::Datatype(kind)
    }

    #[inline]
    pub fn port(handle: PortHandle) -> Self {
        Value::Port(handle)
    }
}

impl Value {
    /// Runtime type tag.
    pub fn kind(&self) -> TypeKind {
        match self {
            Value::None => TypeKind::None,
            Value::Logic(_) => TypeKind::Logic,
            Value::Integer(_) => TypeKind::Integer,
            Value::Decimal(_) => TypeKind::Decimal,
            Value::String(_) => TypeKind::String,
            Value::Binary(_) => TypeKind::Binary,
            Value::Word(_) => TypeKind::Word,
            Value::SetWord(_) => TypeKind::SetWord,
            Value::GetWord(_) => TypeKind::GetWord,
            Value::LitWord(_) => TypeKind::LitWord,
            Value::Block(_) => TypeKind::Block,
            Value::Paren(_) => TypeKind::Paren,
            Value::Function(_) => TypeKind::Function,
            Value::Action(_) => TypeKind::Action,
            Value::Object(_) => TypeKind::Object,
            Value::Path(_) => TypeKind::Path,
            Value::GetPath(_) => TypeKind::GetPath,
            Value::SetPath(_) => TypeKind::SetPath,
            Value::Datatype(_) => TypeKind::Datatype,
            Value::Port(_) => TypeKind::Port,
        }
    }

    /// Only `none` and `false` are false.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::None | Value::Logic(false))
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Whether this value is invoked when reached through a word.
    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Action(_))
    }

    /// Symbol of any word variant.
    pub fn as_name(&self) -> Option<Name> {
        match self {
            Value::Word(n) | Value::SetWord(n) | Value::GetWord(n) | Value::LitWord(n) => {
                Some(*n)
            }
            _ => None,
        }
    }

    /// Human-readable rendering: like `Display`, but strings appear without
    /// quotes.
    pub fn form(&self) -> String {
        match self {
            Value::String(s) => s.with_items(|chars| chars.iter().collect()),
            other => other.to_string(),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    /// Source form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("none"),
            Value::Logic(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::String(s) => s.with_items(|chars| {
                f.write_char('"')?;
                for c in chars {
                    match c {
                        '"' => f.write_str("^\"")?,
                        '^' => f.write_str("^^")?,
                        '\n' => f.write_str("^/")?,
                        c => f.write_char(*c)?,
                    }
                }
                f.write_char('"')
            }),
            Value::Binary(b) => b.with_items(|bytes| {
                f.write_str("#{")?;
                for byte in bytes {
                    write!(f, "{byte:02X}")?;
                }
                f.write_char('}')
            }),
            Value::Word(n) => write!(f, "{n}"),
            Value::SetWord(n) => write!(f, "{n}:"),
            Value::GetWord(n) => write!(f, ":{n}"),
            Value::LitWord(n) => write!(f, "'{n}"),
            Value::Block(items) => items.with_items(|items| {
                f.write_char('[')?;
                write_items(f, items)?;
                f.write_char(']')
            }),
            Value::Paren(items) => items.with_items(|items| {
                f.write_char('(')?;
                write_items(f, items)?;
                f.write_char(')')
            }),
            Value::Function(func) => {
                if func.is_infix() {
                    f.write_str("#[op]")
                } else {
                    f.write_str("#[function]")
                }
            }
            Value::Action(action) => write!(f, "#[action {}]", action.name()),
            Value::Object(obj) => write!(f, "#[object {}]", obj.frame()),
            Value::Path(p) => write!(f, "{p}"),
            Value::GetPath(p) => write!(f, ":{p}"),
            Value::SetPath(p) => write!(f, "{p}:"),
            Value::Datatype(kind) => write!(f, "{kind}"),
            Value::Port(port) => write!(f, "{port}"),
        }
    }
}

impl PartialEq for Value {
    /// Same variant and equal payload. Numbers compare numerically within
    /// their own variant; series compare their remaining elements; functions
    /// and actions compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Logic(a), Value::Logic(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::Word(a), Value::Word(b))
            | (Value::SetWord(a), Value::SetWord(b))
            | (Value::GetWord(a), Value::GetWord(b))
            | (Value::LitWord(a), Value::LitWord(b)) => a == b,
            (Value::Block(a), Value::Block(b)) | (Value::Paren(a), Value::Paren(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Action(a), Value::Action(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Path(a), Value::Path(b))
            | (Value::GetPath(a), Value::GetPath(b))
            | (Value::SetPath(a), Value::SetPath(b)) => a == b,
            (Value::Datatype(a), Value::Datatype(b)) => a == b,
            (Value::Port(a), Value::Port(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Logic(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
