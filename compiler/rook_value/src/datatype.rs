//! Datatype tags.

use std::fmt;

/// The runtime type of a [`Value`](crate::Value).
///
/// One variant per `Value` variant. `TypeKind` is what `type?` returns
/// (wrapped in `Value::Datatype`) and the key of the type registry that
/// routes polymorphic actions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKind {
    None,
    Logic,
    Integer,
    Decimal,
    String,
    Binary,
    Word,
    SetWord,
    GetWord,
    LitWord,
    Block,
    Paren,
    Function,
    Action,
    Object,
    Path,
    GetPath,
    SetPath,
    Datatype,
    Port,
}

impl TypeKind {
    /// Every datatype, in declaration order.
    pub const ALL: [TypeKind; 20] = [
        TypeKind::None,
        TypeKind::Logic,
        TypeKind::Integer,
        TypeKind::Decimal,
        TypeKind::String,
        TypeKind::Binary,
        TypeKind::Word,
        TypeKind::SetWord,
        TypeKind::GetWord,
        TypeKind::LitWord,
        TypeKind::Block,
        TypeKind::Paren,
        TypeKind::Function,
        TypeKind::Action,
        TypeKind::Object,
        TypeKind::Path,
        TypeKind::GetPath,
        TypeKind::SetPath,
        TypeKind::Datatype,
        TypeKind::Port,
    ];

    /// Script-facing spelling, e.g. `block!`.
    pub const fn name(self) -> &'static str {
        match self {
            TypeKind::None => "none!",
            TypeKind::Logic => "logic!",
            TypeKind::Integer => "integer!",
            TypeKind::Decimal => "decimal!",
            TypeKind::String => "string!",
            TypeKind::Binary => "binary!",
            TypeKind::Word => "word!",
            TypeKind::SetWord => "set-word!",
            TypeKind::GetWord => "get-word!",
            TypeKind::LitWord => "lit-word!",
            TypeKind::Block => "block!",
            TypeKind::Paren => "paren!",
            TypeKind::Function => "function!",
            TypeKind::Action => "action!",
            TypeKind::Object => "object!",
            TypeKind::Path => "path!",
            TypeKind::GetPath => "get-path!",
            TypeKind::SetPath => "set-path!",
            TypeKind::Datatype => "datatype!",
            TypeKind::Port => "port!",
        }
    }

    /// Look a datatype up by its script spelling.
    pub fn from_name(name: &str) -> Option<TypeKind> {
        TypeKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether values of this type carry a series cursor.
    pub const fn is_series(self) -> bool {
        matches!(
            self,
            TypeKind::String | TypeKind::Binary | TypeKind::Block | TypeKind::Paren
        )
    }

    /// Whether values of this type are numbers.
    pub const fn is_number(self) -> bool {
        matches!(self, TypeKind::Integer | TypeKind::Decimal)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
