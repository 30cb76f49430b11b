pub mod operation;
pub mod parameter;
pub mod resource;
pub mod response;
pub mod schema;
pub mod spec;
pub mod type_node;

use crate::error::ParseError;
use spec::SwaggerSpec;

/// Parse a Swagger document from YAML.
pub fn from_yaml(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a Swagger document from JSON.
pub fn from_json(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a document whose format is not known up front.
///
/// JSON documents always open with `{`; everything else is handed to the YAML parser.
pub fn from_text(input: &str) -> Result<SwaggerSpec, ParseError> {
    if input.trim_start().starts_with('{') {
        from_json(input)
    } else {
        from_yaml(input)
    }
}

fn validate_version(spec: &SwaggerSpec) -> Result<(), ParseError> {
    if let Some(ref openapi) = spec.openapi {
        return Err(ParseError::UnsupportedVersion(format!("openapi {openapi}")));
    }
    match spec.swagger {
        Some(ref version) if !version.starts_with('2') => Err(ParseError::UnsupportedVersion(
            format!("swagger {version}"),
        )),
        _ => Ok(()),
    }
}
