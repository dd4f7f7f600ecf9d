//! Core prelude: the minimal native library installed through the public
//! extension points.
//!
//! - natives bound in the root frame (`fn`, `if`, `loop`, `set`, ...)
//! - infix operators (`+ - * / = <> < >`)
//! - the words `none`, `true`, `false` and one word per datatype
//! - series actions bound as [`ActionValue`]s, with one type-frame per series
//!   datatype registered through [`TypeRegistryBuilder`]

mod math;
mod natives;
mod series;

use rook_ir::Name;
use rook_value::{ActionValue, FunctionValue, NativeFn, ParamSpec, TypeKind, Value};

use crate::evaluator::Evaluator;
use crate::registry::{RegistryError, SharedTypeRegistry, TypeRegistryBuilder};

/// Series actions and their parameter specs.
pub const SERIES_ACTIONS: [&str; 12] = [
    "first", "next", "back", "skip", "copy", "append", "insert", "remove", "length", "head",
    "tail", "pick",
];

/// Parameter spec of a series action.
pub(crate) fn action_spec(action: &str) -> ParamSpec {
    let series = ParamSpec::new().param("series");
    match action {
        "skip" => series.param("offset"),
        "pick" => series.param("index"),
        "copy" | "remove" => series.option("part", "length"),
        "append" | "insert" => series.param("value").flag("only"),
        _ => series,
    }
}

/// Register the `block!`, `paren!`, `string!` and `binary!` type-frames.
pub fn register_series_actions(builder: &mut TypeRegistryBuilder) -> Result<(), RegistryError> {
    builder
        .register(TypeKind::Block, series::type_frame::<series::BlockType>())?
        .register(TypeKind::Paren, series::type_frame::<series::ParenType>())?
        .register(TypeKind::String, series::type_frame::<series::StringType>())?
        .register(TypeKind::Binary, series::type_frame::<series::BinaryType>())?;
    Ok(())
}

/// A frozen registry holding the prelude's type-frames.
pub fn core_registry() -> Result<SharedTypeRegistry, RegistryError> {
    let mut builder = TypeRegistryBuilder::new();
    register_series_actions(&mut builder)?;
    Ok(builder.build())
}

/// Bind the prelude into `ev`'s root frame.
pub fn install(ev: &mut Evaluator) {
    ev.bind_global("none", Value::None);
    ev.bind_global("true", Value::Logic(true));
    ev.bind_global("false", Value::Logic(false));
    for kind in TypeKind::ALL {
        ev.bind_global(kind.name(), Value::Datatype(kind));
    }

    for (name, spec, native) in natives::table() {
        ev.bind_global(name, Value::Function(FunctionValue::native(spec, native)));
    }
    for (name, native) in math::table() {
        let spec = ParamSpec::new().param("value1").param("value2");
        ev.bind_global(name, Value::Function(FunctionValue::native_infix(spec, native)));
    }
    for action in SERIES_ACTIONS {
        let value = ActionValue::new(Name::intern(action), action_spec(action));
        ev.bind_global(action, Value::Action(value));
    }
    tracing::debug!("prelude installed");
}

type NativeEntry = (&'static str, ParamSpec, NativeFn);

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
