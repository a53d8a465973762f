use pretty_assertions::assert_eq;
use serein_ir::ScriptType;
use serein_runtime::{
    ConstructorDescriptor, ExternalType, MethodDescriptor, MountedFunction, PropertyDescriptor,
    Registries, Value,
};

use super::{body, emit_in};
use crate::ParamInfo;

fn registries() -> Registries {
    let registries = Registries::new();
    let clock = ExternalType::new("Clock")
        .with_property(PropertyDescriptor::new("Ticks", ScriptType::Long, |_| {
            Ok(Value::Long(0))
        }))
        .with_method(MethodDescriptor::new_async(
            "Wait",
            vec![ScriptType::Int],
            ScriptType::Void,
            |_, _| async { Ok(Value::Null) },
        ))
        .with_constructor(ConstructorDescriptor::new(vec![], |_| Ok(Value::Null)))
        .with_constructor(ConstructorDescriptor::new(vec![ScriptType::Long], |_| {
            Ok(Value::Null)
        }));
    registries.types.register_external(clock, None);
    registries.functions.register(
        "fetch",
        MountedFunction::new_async(vec![ScriptType::String], ScriptType::String, |_| async {
            Ok(Value::Null)
        }),
    );
    registries.functions.register(
        "log",
        MountedFunction::new(vec![ScriptType::Object], ScriptType::Void, |_| Ok(Value::Null)),
    );
    registries
}

#[test]
fn test_async_calls_are_awaited() {
    let method = emit_in(
        "c = new Clock(); c.Wait(10); s = fetch(\"url\"); log(s); return s.Length;",
        &registries(),
        &[],
    );
    assert!(method.is_async);
    assert_eq!(method.return_type, ScriptType::Int);
    assert!(method.source.contains("public static async Task<int> Run()"));
    assert_eq!(
        body(&method),
        vec![
            "Clock c = default;",
            "string s = default;",
            "c = new Clock();",
            "await c.Wait(10);",
            "s = (await ScriptFunctions.fetch(\"url\"));",
            "ScriptFunctions.log(s);",
            "return s.Length;",
        ]
    );
}

#[test]
fn test_async_void_method_returns_task() {
    let method = emit_in("c = new Clock(5); c.Wait(1);", &registries(), &[]);
    assert!(method.is_async);
    assert_eq!(method.return_type, ScriptType::Void);
    assert!(method.source.contains("public static async Task Run()"));
    assert!(!method.source.contains("return default;"));
}

#[test]
fn test_sync_host_calls_are_not_awaited() {
    let method = emit_in("c = new Clock(); log(c.Ticks);", &registries(), &[]);
    assert!(!method.is_async);
    assert!(method.source.contains("public static void Run()"));
    assert!(body(&method).contains(&"ScriptFunctions.log(c.Ticks);"));
}

#[test]
fn test_parameters_are_not_redeclared() {
    let params = [
        ("count", ScriptType::Int),
        ("names", ScriptType::list(ScriptType::String)),
    ];
    let method = emit_in(
        "total = count + names.Count; names.Add(\"x\"); return total;",
        &Registries::new(),
        &params,
    );
    assert!(method
        .source
        .contains("public static int Run(int count, List<string> names)"));
    assert_eq!(
        body(&method),
        vec![
            "int total = default;",
            "total = (count + names.Count);",
            "names.Add(\"x\");",
            "return total;",
        ]
    );
    assert_eq!(
        method.params,
        vec![
            ParamInfo {
                name: "count".to_owned(),
                ty: ScriptType::Int,
                cs_type: "int".to_owned(),
            },
            ParamInfo {
                name: "names".to_owned(),
                ty: ScriptType::list(ScriptType::String),
                cs_type: "List<string>".to_owned(),
            },
        ]
    );
}

#[test]
fn test_object_receivers_go_through_dynamic() {
    let method = emit_in(
        "o.Name = \"x\"; n = o.Size; o.Reset(); return o[0];",
        &Registries::new(),
        &[("o", ScriptType::Object)],
    );
    assert_eq!(method.return_type, ScriptType::Object);
    assert_eq!(
        body(&method),
        vec![
            "object n = default;",
            "((dynamic)o).Name = \"x\";",
            "n = ((dynamic)o).Size;",
            "((dynamic)o).Reset();",
            "return ((dynamic)o)[0];",
        ]
    );
}

#[test]
fn test_object_operands_and_conditions_go_through_dynamic() {
    let method = emit_in(
        "x = null; x = 5; if (x) { x = 2; } while (o) { o = false; } \
         if (o == null) { x = 3; } return x + 1;",
        &Registries::new(),
        &[("o", ScriptType::Object)],
    );
    assert_eq!(method.return_type, ScriptType::Object);
    assert_eq!(
        body(&method),
        vec![
            "object x = default;",
            "x = null;",
            "x = 5;",
            "if (((dynamic)x) == true)",
            "{",
            "x = 2;",
            "}",
            "while (((dynamic)o) == true)",
            "{",
            "o = false;",
            "}",
            "if ((((dynamic)o) == null) == true)",
            "{",
            "x = 3;",
            "}",
            "return (((dynamic)x) + 1);",
        ]
    );
}

#[test]
fn test_dynamic_results_are_not_cast_twice() {
    let method = emit_in("return o.Count + 1;", &Registries::new(), &[("o", ScriptType::Object)]);
    assert_eq!(body(&method), vec!["return (((dynamic)o).Count + 1);"]);
}

#[test]
fn test_returning_a_void_call() {
    let method = emit_in("if (true) { return log(1); } log(2);", &registries(), &[]);
    assert_eq!(method.return_type, ScriptType::Void);
    assert!(method.source.contains("public static void Run()"));
    assert_eq!(
        body(&method),
        vec![
            "if (true == true)",
            "{",
            "ScriptFunctions.log(1);",
            "return;",
            "}",
            "ScriptFunctions.log(2);",
        ]
    );
}

#[test]
fn test_dictionary_parameter() {
    let method = emit_in(
        "m[\"a\"] = 1; return m.ContainsKey(\"a\");",
        &Registries::new(),
        &[("m", ScriptType::dictionary(ScriptType::String, ScriptType::Int))],
    );
    assert!(method
        .source
        .contains("public static bool Run(Dictionary<string, int> m)"));
    assert_eq!(
        body(&method),
        vec!["m[\"a\"] = 1;", "return m.ContainsKey(\"a\");"]
    );
}
