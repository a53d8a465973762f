use pretty_assertions::assert_eq;
use serein_ir::ScriptType;

use super::Counter;
use crate::{
    ConstructorDescriptor, EvalError, EvalErrorKind, ExternalType, IndexerDescriptor,
    MethodDescriptor, MountedFunction, PropertyDescriptor, Value,
};

fn counter_type() -> ExternalType {
    ExternalType::new("Counter")
        .with_property(
            PropertyDescriptor::new("Value", ScriptType::Int, |this| {
                let counter = this
                    .as_external()
                    .and_then(|e| e.downcast_ref::<Counter>())
                    .ok_or_else(|| EvalError::host("not a counter"))?;
                Ok(Value::Int(*counter.value.lock()))
            })
            .with_setter(|this, value| {
                let counter = this
                    .as_external()
                    .and_then(|e| e.downcast_ref::<Counter>())
                    .ok_or_else(|| EvalError::host("not a counter"))?;
                *counter.value.lock() = value.as_i128().unwrap_or_default() as i32;
                Ok(())
            }),
        )
        .with_property(PropertyDescriptor::new("Name", ScriptType::String, |_| {
            Ok(Value::string("counter"))
        }))
        .with_method(MethodDescriptor::new(
            "Describe",
            vec![ScriptType::Int],
            ScriptType::String,
            |_, args| Ok(Value::string(format!("int {}", args[0]))),
        ))
        .with_method(MethodDescriptor::new(
            "Describe",
            vec![ScriptType::String],
            ScriptType::String,
            |_, args| Ok(Value::string(format!("string {}", args[0]))),
        ))
        .with_method(MethodDescriptor::new(
            "Describe",
            vec![ScriptType::Double],
            ScriptType::String,
            |_, args| Ok(Value::string(format!("double {}", args[0]))),
        ))
        .with_method(MethodDescriptor::new_async(
            "Wait",
            vec![],
            ScriptType::Void,
            |_, _| async { Ok(Value::Null) },
        ))
        .with_indexer(IndexerDescriptor::new(
            ScriptType::Int,
            ScriptType::Int,
            |_, key| Ok(Value::Int(key.as_index().unwrap_or_default() as i32 * 10)),
        ))
        .with_constructor(ConstructorDescriptor::new(vec![], |_| {
            Ok(Value::external("Counter", Counter::default()))
        }))
        .with_constructor(ConstructorDescriptor::new(vec![ScriptType::Int], |args| {
            let counter = Counter::default();
            *counter.value.lock() = args[0].as_i128().unwrap_or_default() as i32;
            Ok(Value::external("Counter", counter))
        }))
}

#[test]
fn test_property_get_set() {
    let ty = counter_type();
    let this = Value::external("Counter", Counter::default());
    let value = ty.property("Value").unwrap();
    value.set(&this, Value::Int(3)).unwrap();
    assert_eq!(value.get(&this).unwrap(), Value::Int(3));
    assert!(value.is_writable());

    let name = ty.property("Name").unwrap();
    let err = name.set(&this, Value::string("x")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::HostFailure);
    assert!(ty.property("Missing").is_none());
}

#[test]
fn test_static_overload_prefers_exact_match() {
    let ty = counter_type();
    let exact = ty.resolve_method("Describe", &[ScriptType::Double]).unwrap();
    assert_eq!(exact.params(), &[ScriptType::Double]);
    // `short` is assignable to `int` and `double`; the first declared wins.
    let widened = ty.resolve_method("Describe", &[ScriptType::Short]).unwrap();
    assert_eq!(widened.params(), &[ScriptType::Int]);
    assert!(ty.resolve_method("Describe", &[ScriptType::Bool]).is_none());
    assert!(ty.resolve_method("Describe", &[]).is_none());
    assert!(ty.resolve_method("Nope", &[]).is_none());
}

#[test]
fn test_runtime_overload_selection() {
    let ty = counter_type();
    let m = ty.select_method("Describe", &[Value::string("a")]).unwrap();
    assert_eq!(m.params(), &[ScriptType::String]);
    let m = ty.select_method("Describe", &[Value::Null]).unwrap();
    assert_eq!(m.params(), &[ScriptType::String]);
    let m = ty.select_method("Describe", &[Value::Float(1.0)]).unwrap();
    assert_eq!(m.params(), &[ScriptType::Double]);
}

#[tokio::test]
async fn test_method_invocation_is_uniformly_awaitable() {
    let ty = counter_type();
    let this = Value::external("Counter", Counter::default());
    let describe = ty.select_method("Describe", &[Value::Int(2)]).unwrap();
    assert!(!describe.is_async());
    let out = describe.invoke(this.clone(), vec![Value::Int(2)]).await.unwrap();
    assert_eq!(out, Value::string("int 2"));

    let wait = ty.resolve_method("Wait", &[]).unwrap();
    assert!(wait.is_async());
    assert_eq!(wait.return_type(), &ScriptType::task(None));
    assert_eq!(wait.invoke(this, vec![]).await.unwrap(), Value::Null);
}

#[test]
fn test_indexer_and_constructors() {
    let ty = counter_type();
    let this = Value::external("Counter", Counter::default());
    let indexer = ty.indexer().unwrap();
    assert!(!indexer.is_writable());
    assert_eq!(indexer.get(&this, &Value::Int(4)).unwrap(), Value::Int(40));
    assert!(indexer.set(&this, Value::Int(1), Value::Int(1)).is_err());

    let ctor = ty.select_constructor(&[Value::Int(7)]).unwrap();
    let made = ctor.construct(vec![Value::Int(7)]).unwrap();
    let counter = made.as_external().unwrap().downcast_ref::<Counter>().unwrap();
    assert_eq!(*counter.value.lock(), 7);
    assert!(ty.resolve_constructor(&[]).is_some());
    assert!(ty.resolve_constructor(&[ScriptType::String]).is_none());
}

#[test]
fn test_renamed_keeps_members() {
    let ty = counter_type().renamed("Tally");
    assert_eq!(ty.name(), "Tally");
    assert!(ty.has_method("Describe"));
}

#[tokio::test]
async fn test_mounted_function_shapes() {
    let add = MountedFunction::new(vec![ScriptType::Int, ScriptType::Int], ScriptType::Int, |args| {
        match (&args[0], &args[1]) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
            _ => Err(EvalError::type_mismatch("int", "other")),
        }
    });
    assert!(!add.is_async());
    assert_eq!(
        add.call(vec![Value::Int(2), Value::Int(3)]).await.unwrap(),
        Value::Int(5)
    );

    let fetch = MountedFunction::new_async(vec![], ScriptType::String, |_| async {
        Ok(Value::string("done"))
    });
    assert!(fetch.is_async());
    assert_eq!(fetch.return_type(), &ScriptType::task(Some(ScriptType::String)));
    assert_eq!(fetch.call(vec![]).await.unwrap(), Value::string("done"));
}
