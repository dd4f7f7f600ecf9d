use pretty_assertions::assert_eq;
use rook_value::{CallArgs, EvalResult, Executor, ParamSpec};

use super::*;

fn one(_: &mut dyn Executor, _: CallArgs) -> EvalResult {
    Ok(Value::Integer(1))
}

fn native() -> FunctionValue {
    FunctionValue::native(ParamSpec::new().param("value"), one)
}

#[test]
fn resolve_registered_action() {
    let first = Name::intern("first");
    let mut builder = TypeRegistryBuilder::new();
    builder.register(TypeKind::Block, [(first, native())]).unwrap();
    let registry = builder.build();

    assert!(registry.contains(TypeKind::Block));
    assert!(matches!(
        registry.resolve(TypeKind::Block, first),
        Some(Value::Function(_))
    ));
    assert_eq!(registry.resolve(TypeKind::String, first), None);
    assert_eq!(registry.resolve(TypeKind::Block, Name::intern("last")), None);
    assert_eq!(registry.kinds(), vec![TypeKind::Block]);
}

#[test]
fn duplicate_type_rejected() {
    let mut builder = TypeRegistryBuilder::new();
    builder.register(TypeKind::String, std::iter::empty()).unwrap();
    let err = builder.register(TypeKind::String, std::iter::empty()).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateType(TypeKind::String));
    assert_eq!(err.to_string(), "datatype string! is already registered");
}

#[test]
fn duplicate_action_rejected() {
    let first = Name::intern("first");
    let mut builder = TypeRegistryBuilder::new();
    let err = builder
        .register(TypeKind::Block, [(first, native()), (first, native())])
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateAction {
            kind: TypeKind::Block,
            action: first
        }
    );
}

#[test]
fn clones_share_one_registry() {
    let registry = TypeRegistryBuilder::new().build();
    let other = registry.clone();
    assert!(registry.ptr_eq(&other));
    assert!(other.is_empty());
}
