use std::path::{Path, PathBuf};

use async_trait::async_trait;
use autoapi_core::parse::resource::SwaggerResource;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, REFERER};
use url::Url;

use crate::error::FetchError;

const RESOURCES_PATH: &str = "/swagger-resources";
const SWAGGER_UI_PATH: &str = "/swagger-ui.html";

const RESOURCES_ACCEPT: &str = "application/json, text/plain, */*";
const DOCUMENT_ACCEPT: &str = "application/json;charset=utf-8,*/*";
const LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Headers a browser sends along with requests made by the swagger-ui page.
const BROWSER_HEADERS: [(&str, &str); 7] = [
    (
        "sec-ch-ua",
        "\"Not.A/Brand\";v=\"8\", \"Chromium\";v=\"114\", \"Google Chrome\";v=\"114\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-origin"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

/// Where schema documents come from.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Every document the source publishes.
    async fn list_resources(&self) -> Result<Vec<SwaggerResource>, FetchError>;

    /// Raw text of the document at `location`.
    async fn fetch_document(&self, location: &str) -> Result<String, FetchError>;
}

/// Fetches documents from a running service, authenticated by its session cookie.
pub struct HttpSchemaSource {
    client: reqwest::Client,
    base_url: Url,
    cookie: String,
}

impl HttpSchemaSource {
    pub fn new(base_url: &str, cookie: impl Into<String>) -> Result<Self, FetchError> {
        let parsed = Url::parse(base_url).map_err(|source| FetchError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: parsed,
            cookie: cookie.into(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|source| FetchError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                source,
            })
    }

    async fn get(&self, path: &str, accept: &str) -> Result<reqwest::Response, FetchError> {
        let url = self.url(path)?;
        let referer = self.url(SWAGGER_UI_PATH)?;
        log::debug!("GET {url}");

        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, accept)
            .header(ACCEPT_LANGUAGE, LANGUAGE)
            .header(REFERER, referer.as_str());
        if !self.cookie.is_empty() {
            request = request.header(COOKIE, self.cookie.as_str());
        }
        for (name, value) in BROWSER_HEADERS {
            request = request.header(name, value);
        }

        request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })
    }
}

#[async_trait]
impl SchemaSource for HttpSchemaSource {
    async fn list_resources(&self) -> Result<Vec<SwaggerResource>, FetchError> {
        let response = self.get(RESOURCES_PATH, RESOURCES_ACCEPT).await?;
        let url = response.url().to_string();
        response
            .json()
            .await
            .map_err(|source| FetchError::Http { url, source })
    }

    async fn fetch_document(&self, location: &str) -> Result<String, FetchError> {
        let response = self.get(location, DOCUMENT_ACCEPT).await?;
        let url = response.url().to_string();
        response
            .text()
            .await
            .map_err(|source| FetchError::Http { url, source })
    }
}

/// Reads a document from the local filesystem. Locations are file paths.
pub struct FileSchemaSource {
    path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl SchemaSource for FileSchemaSource {
    async fn list_resources(&self) -> Result<Vec<SwaggerResource>, FetchError> {
        let name = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(vec![SwaggerResource {
            name,
            location: self.location(),
            url: None,
            swagger_version: None,
        }])
    }

    async fn fetch_document(&self, location: &str) -> Result<String, FetchError> {
        let path = Path::new(location);
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COOKIE_VALUE: &str = "SESSION=5f2c";

    #[tokio::test]
    async fn test_list_resources() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/swagger-resources"))
            .and(header("cookie", COOKIE_VALUE))
            .and(header(
                "referer",
                format!("{}/swagger-ui.html", server.uri()).as_str(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "scm", "location": "/v2/api-docs?group=scm", "swaggerVersion": "2.0"},
                {"name": "mall", "url": "/mall/v2/api-docs"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpSchemaSource::new(&server.uri(), COOKIE_VALUE).unwrap();
        let resources = source.list_resources().await.unwrap();

        let targets: Vec<_> = resources.iter().map(SwaggerResource::target).collect();
        assert_eq!(targets, ["/v2/api-docs?group=scm", "/mall/v2/api-docs"]);
        assert_eq!(resources[0].swagger_version.as_deref(), Some("2.0"));
    }

    #[tokio::test]
    async fn test_fetch_document_keeps_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/api-docs"))
            .and(query_param("group", "scm"))
            .and(header("sec-fetch-mode", "cors"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"swagger": "2.0"}"#))
            .mount(&server)
            .await;

        let source = HttpSchemaSource::new(&server.uri(), COOKIE_VALUE).unwrap();
        let text = source
            .fetch_document("/v2/api-docs?group=scm")
            .await
            .unwrap();
        assert_eq!(text, r#"{"swagger": "2.0"}"#);
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/api-docs"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let source = HttpSchemaSource::new(&server.uri(), "").unwrap();
        let err = source.fetch_document("/v2/api-docs").await.unwrap_err();
        match err {
            FetchError::Http { url, source } => {
                assert!(url.ends_with("/v2/api-docs"));
                assert_eq!(source.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpSchemaSource::new("localhost without scheme", "").err();
        assert!(matches!(err, Some(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("mall.json");
        std::fs::write(&file, r#"{"swagger": "2.0"}"#).unwrap();

        let source = FileSchemaSource::new(&file);
        let resources = source.list_resources().await.unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "mall");

        let text = source.fetch_document(resources[0].target()).await.unwrap();
        assert_eq!(text, r#"{"swagger": "2.0"}"#);

        let err = source
            .fetch_document(&dir.path().join("missing.json").display().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }
}
