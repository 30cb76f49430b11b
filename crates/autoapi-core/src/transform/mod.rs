pub mod name_normalizer;
pub mod spec_to_ir;
pub mod type_resolver;

pub use spec_to_ir::transform;
