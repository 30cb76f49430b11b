use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level project configuration loaded from `.autoapi.yaml`.
///
/// The upper-case aliases accept configuration files written for the
/// environment-variable based setup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutoApiConfig {
    /// Origin serving `/swagger-resources` and the api documents.
    #[serde(alias = "BASE_URL")]
    pub base_url: Option<String>,
    /// Fixed document location; skips the resource listing when set.
    #[serde(alias = "API_VERSION")]
    pub api_version: Option<String>,
    /// Session cookie sent with every request.
    #[serde(alias = "COOKIE")]
    pub cookie: String,
    #[serde(alias = "OUTPUT")]
    pub output: String,
    /// Import statement placed in every tag file. `${basePath}` is replaced
    /// with the effective base path.
    #[serde(alias = "IMPORT")]
    pub import: String,
    /// Path prepended to the document base path in call paths.
    #[serde(alias = "PREFIX")]
    pub prefix: Option<String>,
}

impl Default for AutoApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_version: None,
            cookie: String::new(),
            output: "src/api".to_string(),
            import: "import { request } from '@/request'".to_string(),
            prefix: None,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".autoapi.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<AutoApiConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: AutoApiConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# autoapi configuration
base_url: http://localhost:8080
# api_version: /v2/api-docs      # fixed document; omit to build every /swagger-resources entry
cookie: ""                       # session cookie sent with each request
output: src/api
import: "import { request } from '@/request'"
# prefix: /gateway               # prepended to the document basePath in call paths
"#
}
