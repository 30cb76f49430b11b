use super::operations::IrApi;
use super::schemas::IrModel;

/// File stem of the emitted models file; no tag may use it.
pub const MODELS_FILE: &str = "models";

/// File stem of the emitted index file; no tag may use it.
pub const INDEX_FILE: &str = "index";

/// A fully resolved, emitter-ready representation of one Swagger document.
#[derive(Debug, Clone, PartialEq)]
pub struct IrDocument {
    /// Identifier derived from the title and base path, used as the
    /// subdirectory name in multi-document builds.
    pub name: String,
    pub title: String,
    pub base_path: String,
    /// Query-parameter models first, then definitions, in source order.
    pub models: Vec<IrModel>,
    /// Declared tags in declaration order, then synthetic tags.
    pub tags: Vec<IrTag>,
}

impl IrDocument {
    pub fn apis(&self) -> impl Iterator<Item = &IrApi> {
        self.tags.iter().flat_map(|t| t.apis.iter())
    }
}

/// A group of apis emitted into one file.
#[derive(Debug, Clone, PartialEq)]
pub struct IrTag {
    /// File identifier.
    pub name: String,
    pub description: String,
    pub apis: Vec<IrApi>,
}
