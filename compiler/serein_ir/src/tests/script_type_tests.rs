use crate::ScriptType;

#[test]
fn test_promotion_ladder() {
    use ScriptType::{Byte, Decimal, Double, Float, Int, Long, SByte, Short, UInt, ULong, UShort};
    let ladder = [SByte, Byte, Short, UShort, Int, UInt, Long, ULong, Float, Double, Decimal];
    for (i, low) in ladder.iter().enumerate() {
        for high in &ladder[i..] {
            assert_eq!(ScriptType::promote(low, high), Some(high.clone()));
            assert_eq!(ScriptType::promote(high, low), Some(high.clone()));
        }
    }
    assert_eq!(ScriptType::promote(&Int, &ScriptType::String), None);
}

#[test]
fn test_int_plus_double_is_double() {
    assert_eq!(
        ScriptType::promote(&ScriptType::Int, &ScriptType::Double),
        Some(ScriptType::Double)
    );
}

#[test]
fn test_accepts_widening() {
    assert!(ScriptType::Long.accepts(&ScriptType::Int));
    assert!(ScriptType::Double.accepts(&ScriptType::Int));
    assert!(ScriptType::UInt.accepts(&ScriptType::Byte));
    assert!(!ScriptType::Int.accepts(&ScriptType::Long));
    assert!(!ScriptType::UInt.accepts(&ScriptType::Int));
    assert!(!ScriptType::ULong.accepts(&ScriptType::SByte));
    assert!(!ScriptType::Int.accepts(&ScriptType::String));
}

#[test]
fn test_accepts_object_and_covariance() {
    assert!(ScriptType::Object.accepts(&ScriptType::Int));
    assert!(ScriptType::Object.accepts(&ScriptType::named("Person")));
    assert!(ScriptType::array(ScriptType::Object).accepts(&ScriptType::array(ScriptType::String)));
    assert!(!ScriptType::array(ScriptType::String).accepts(&ScriptType::array(ScriptType::Object)));
    assert!(ScriptType::list(ScriptType::Object).accepts(&ScriptType::list(ScriptType::Int)));
}

#[test]
fn test_primitive_aliases() {
    for alias in ["int", "Int32", "System.Int32"] {
        assert_eq!(ScriptType::primitive(alias), Some(ScriptType::Int));
    }
    assert_eq!(ScriptType::primitive("Single"), Some(ScriptType::Float));
    assert_eq!(ScriptType::primitive("System.String"), Some(ScriptType::String));
    assert_eq!(ScriptType::primitive("Person"), None);
}

#[test]
fn test_task_result() {
    assert_eq!(ScriptType::task(None).task_result(), Some(ScriptType::Void));
    assert_eq!(
        ScriptType::task(Some(ScriptType::Int)).task_result(),
        Some(ScriptType::Int)
    );
    assert_eq!(ScriptType::Int.task_result(), None);
}

#[test]
fn test_display_uses_csharp_spelling() {
    assert_eq!(ScriptType::array(ScriptType::Int).to_string(), "int[]");
    assert_eq!(
        ScriptType::dictionary(ScriptType::String, ScriptType::list(ScriptType::Double)).to_string(),
        "Dictionary<string, List<double>>"
    );
    assert_eq!(ScriptType::task(Some(ScriptType::Bool)).to_string(), "Task<bool>");
}
