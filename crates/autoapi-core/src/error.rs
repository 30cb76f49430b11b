use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema dialect: {0}")]
    UnsupportedVersion(String),
}

/// Structural problems that make a document impossible to transform.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedSchemaError {
    #[error("operation {method} {path} has no 200 response")]
    MissingSuccessResponse { method: String, path: String },

    #[error("reference pointer has no resolvable trailing segment: {0:?}")]
    UnresolvableRef(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("malformed schema: {0}")]
    Malformed(#[from] MalformedSchemaError),
}
