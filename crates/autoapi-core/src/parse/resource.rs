use serde::{Deserialize, Serialize};

/// One entry of the `/swagger-resources` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerResource {
    pub name: String,

    #[serde(default)]
    pub location: String,

    /// Newer listings repeat the location under `url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "swaggerVersion", skip_serializing_if = "Option::is_none")]
    pub swagger_version: Option<String>,
}

impl SwaggerResource {
    /// The path the document is served from.
    pub fn target(&self) -> &str {
        match self.url {
            Some(ref url) if self.location.is_empty() => url,
            _ => &self.location,
        }
    }
}
