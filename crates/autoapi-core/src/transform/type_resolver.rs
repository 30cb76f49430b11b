use crate::ir::{IrType, ModelRef};
use crate::parse::type_node::{ScalarType, TypeNode};

use super::name_normalizer::sanitize_model_name;

/// Map a classified type node to its IR type.
///
/// Used for parameters, properties and responses alike. Never fails:
/// nodes with nothing to resolve become `IrType::Unknown`.
pub fn resolve_type(node: &TypeNode) -> IrType {
    match node {
        TypeNode::Scalar(scalar) => resolve_scalar(*scalar),
        TypeNode::Array(Some(items)) => IrType::Array(Box::new(resolve_type(items))),
        TypeNode::Array(None) => IrType::EmptyArray,
        TypeNode::Reference(key) => IrType::Ref(ModelRef {
            key: key.clone(),
            name: sanitize_model_name(key),
        }),
        TypeNode::Unknown => IrType::Unknown,
    }
}

fn resolve_scalar(scalar: ScalarType) -> IrType {
    match scalar {
        ScalarType::Number | ScalarType::Integer => IrType::Number,
        ScalarType::String => IrType::String,
        ScalarType::Boolean => IrType::Boolean,
        ScalarType::Object => IrType::Object,
    }
}
