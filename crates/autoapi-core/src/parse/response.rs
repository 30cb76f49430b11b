use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// A response definition. Only the schema matters for code generation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}
