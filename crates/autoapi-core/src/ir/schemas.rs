/// A named structural type: a definition or a synthesized query model.
#[derive(Debug, Clone, PartialEq)]
pub struct IrModel {
    pub name: String,
    pub description: Option<String>,
    pub props: Vec<IrProperty>,
}

/// A model field or a bare path parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct IrProperty {
    pub key: String,
    pub required: bool,
    pub prop_type: IrType,
    pub description: Option<String>,
}

/// A resolved type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrType {
    Number,
    String,
    Boolean,
    Object,
    Array(Box<IrType>),
    /// `type: array` without `items`.
    EmptyArray,
    Ref(ModelRef),
    Unknown,
}

/// A reference to a named model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    /// Trailing pointer segment as written in the document.
    pub key: String,
    /// Identifier the model is emitted under.
    pub name: String,
}

impl IrType {
    /// The model this type names, looking through arrays. Scalars, empty
    /// arrays and unknown types name no model.
    pub fn model_name(&self) -> Option<&str> {
        match self {
            IrType::Array(inner) => inner.model_name(),
            IrType::Ref(model) => Some(&model.name),
            _ => None,
        }
    }

    pub(crate) fn rename_refs(&mut self, rename: &impl Fn(&str) -> Option<String>) {
        match self {
            IrType::Array(inner) => inner.rename_refs(rename),
            IrType::Ref(model) => {
                if let Some(name) = rename(&model.key) {
                    model.name = name;
                }
            }
            _ => {}
        }
    }
}
