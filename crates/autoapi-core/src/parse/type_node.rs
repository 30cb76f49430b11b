use crate::error::MalformedSchemaError;
use crate::transform::name_normalizer::sanitize_model_name;

use super::parameter::Parameter;
use super::schema::Schema;

/// Scalar `type` keywords understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Number,
    Integer,
    String,
    Boolean,
    Object,
}

impl ScalarType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "number" => Some(ScalarType::Number),
            "integer" => Some(ScalarType::Integer),
            "string" => Some(ScalarType::String),
            "boolean" => Some(ScalarType::Boolean),
            "object" => Some(ScalarType::Object),
            _ => None,
        }
    }
}

/// A schema type node classified by the fields it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Scalar(ScalarType),
    /// `type: array`, with the item node when `items` is present.
    Array(Option<Box<TypeNode>>),
    /// The trailing segment of a `$ref` pointer, not yet sanitized.
    Reference(String),
    Unknown,
}

impl TypeNode {
    /// Classify a schema node. `type` takes precedence over `$ref`.
    pub fn from_schema(schema: &Schema) -> Result<Self, MalformedSchemaError> {
        Self::classify(
            schema.schema_type.as_deref(),
            schema.items.as_deref(),
            schema.ref_path.as_deref(),
        )
    }

    /// Classify a parameter: the inline `type` wins, then `schema`.
    pub fn from_parameter(param: &Parameter) -> Result<Self, MalformedSchemaError> {
        match (param.param_type.as_deref(), param.schema.as_ref()) {
            (Some(keyword), _) => Self::classify(Some(keyword), param.items.as_deref(), None),
            (None, Some(schema)) => Self::from_schema(schema),
            (None, None) => Ok(TypeNode::Unknown),
        }
    }

    fn classify(
        keyword: Option<&str>,
        items: Option<&Schema>,
        pointer: Option<&str>,
    ) -> Result<Self, MalformedSchemaError> {
        match (keyword, pointer) {
            (Some("array"), _) => {
                let items = items.map(Self::from_schema).transpose()?;
                Ok(TypeNode::Array(items.map(Box::new)))
            }
            (Some(keyword), _) => Ok(ScalarType::from_keyword(keyword)
                .map(TypeNode::Scalar)
                .unwrap_or(TypeNode::Unknown)),
            (None, Some(pointer)) => reference_segment(pointer).map(TypeNode::Reference),
            (None, None) => Ok(TypeNode::Unknown),
        }
    }
}

/// Extract the trailing segment of a reference pointer such as `#/definitions/Foo`.
pub fn reference_segment(pointer: &str) -> Result<String, MalformedSchemaError> {
    let segment = pointer.rsplit('/').next().unwrap_or_default();
    if sanitize_model_name(segment).is_empty() {
        return Err(MalformedSchemaError::UnresolvableRef(pointer.to_string()));
    }
    Ok(segment.to_string())
}
