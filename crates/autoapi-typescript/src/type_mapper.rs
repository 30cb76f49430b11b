use autoapi_core::ir::IrType;

/// Spelling used wherever no type could be resolved.
pub const UNKNOWN: &str = "unknown";

/// Map an `IrType` to its TypeScript type string representation.
pub fn ir_type_to_ts(ir_type: &IrType) -> String {
    match ir_type {
        IrType::Number => "number".to_string(),
        IrType::String => "string".to_string(),
        IrType::Boolean => "boolean".to_string(),
        IrType::Object => "object".to_string(),
        IrType::Array(inner) => format!("{}[]", ir_type_to_ts(inner)),
        IrType::EmptyArray => "[]".to_string(),
        IrType::Ref(model) => model.name.clone(),
        IrType::Unknown => UNKNOWN.to_string(),
    }
}
