pub mod operations;
pub mod schemas;
pub mod types;

pub use operations::*;
pub use schemas::*;
pub use types::{INDEX_FILE, IrDocument, IrTag, MODELS_FILE};
