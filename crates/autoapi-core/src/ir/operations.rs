use std::fmt;

use super::schemas::{IrProperty, IrType};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Lower-case spelling, as used in path items and request helpers.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }

    /// Methods whose request helper takes a data argument before the config.
    pub fn takes_data(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved operation.
#[derive(Debug, Clone, PartialEq)]
pub struct IrApi {
    /// Identifier derived from path and method.
    pub name: String,
    /// The tag bucket key (first tag string, or empty).
    pub tag: String,
    pub operation_id: Option<String>,
    pub method: HttpMethod,
    /// Path template as declared, e.g. `/items/{id}`.
    pub path: String,
    pub description: Option<String>,
    pub body: Option<IrType>,
    /// Name of the synthesized query-parameter model.
    pub query: Option<String>,
    pub path_params: Vec<IrProperty>,
    pub response: IrType,
    /// Models referenced by body, query and response, in that order.
    pub model_names: Vec<String>,
}
