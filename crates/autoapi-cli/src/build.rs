use std::path::PathBuf;

use autoapi_core::transform::name_normalizer::{NameRegistry, sanitize_model_name};
use autoapi_core::{CodeGenerator, GeneratedFile, parse, transform};
use autoapi_typescript::{TypeScriptConfig, TypeScriptGenerator};
use futures::future::join_all;

use crate::error::{BuildError, DocumentError};
use crate::sink::OutputSink;
use crate::source::SchemaSource;

/// Directory used when neither the document nor its resource yields a name.
const FALLBACK_DOCUMENT_DIR: &str = "api";

/// Where a document's files land below the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Directly in the output root.
    Flat,
    /// In a subdirectory named after the document.
    PerDocument,
}

/// Everything a build needs besides its collaborators.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Single document location. When unset, every listed resource is built.
    pub api_version: Option<String>,
    pub generator: TypeScriptConfig,
}

/// A document that was generated and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub location: String,
    pub name: String,
    pub files: Vec<PathBuf>,
}

/// A selected document: where to fetch it and the resource name to fall
/// back on for its directory.
struct Target {
    location: String,
    resource: String,
}

/// A document rendered in memory, not yet written.
struct Rendered {
    location: String,
    resource: String,
    name: String,
    files: Vec<GeneratedFile>,
}

/// Build every document the options select.
///
/// The output root is reset once before any document work starts. Documents
/// are built concurrently and independently: a failing document does not
/// stop its siblings, and all failures are reported together afterwards.
/// Output directories are claimed in listing order once every document is
/// rendered, so two documents never share a directory.
pub async fn build<S, O>(
    source: &S,
    sink: &O,
    options: &BuildOptions,
) -> Result<Vec<DocumentReport>, BuildError>
where
    S: SchemaSource + ?Sized,
    O: OutputSink + ?Sized,
{
    let (targets, layout) = match options.api_version {
        Some(ref location) => (
            vec![Target {
                location: location.clone(),
                resource: String::new(),
            }],
            Layout::Flat,
        ),
        None => {
            let resources = source
                .list_resources()
                .await
                .map_err(BuildError::Resources)?;
            let targets = resources
                .iter()
                .map(|r| Target {
                    location: r.target().to_string(),
                    resource: r.name.clone(),
                })
                .collect();
            (targets, Layout::PerDocument)
        }
    };
    log::info!("building {} document(s)", targets.len());

    sink.reset().await.map_err(BuildError::Reset)?;

    let rendered = join_all(
        targets
            .iter()
            .map(|target| render_document(source, target, &options.generator)),
    )
    .await;
    let total = rendered.len();

    let mut dirs = NameRegistry::for_paths([]);
    let mut failures = Vec::new();
    let mut pending = Vec::with_capacity(total);
    for result in rendered {
        match result {
            Ok(doc) => {
                let dir = match layout {
                    Layout::Flat => PathBuf::new(),
                    Layout::PerDocument => {
                        PathBuf::from(dirs.claim(&document_dir(&doc)))
                    }
                };
                pending.push((doc, dir));
            }
            Err(e) => failures.push(e),
        }
    }

    let written = join_all(
        pending
            .into_iter()
            .map(|(doc, dir)| write_document(sink, doc, dir)),
    )
    .await;

    let mut reports = Vec::with_capacity(total);
    for result in written {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => failures.push(e),
        }
    }
    for e in &failures {
        log::warn!("document {} failed: {e}", e.location());
    }

    if failures.is_empty() {
        Ok(reports)
    } else {
        Err(BuildError::Documents { failures, total })
    }
}

/// Fetch, parse, transform and render one document.
async fn render_document<S>(
    source: &S,
    target: &Target,
    config: &TypeScriptConfig,
) -> Result<Rendered, DocumentError>
where
    S: SchemaSource + ?Sized,
{
    let location = target.location.as_str();
    let text = source
        .fetch_document(location)
        .await
        .map_err(|source| DocumentError::Fetch {
            location: location.to_string(),
            source,
        })?;
    let spec = parse::from_text(&text).map_err(|source| DocumentError::Parse {
        location: location.to_string(),
        source,
    })?;
    let ir = transform::transform(&spec).map_err(|source| DocumentError::Transform {
        location: location.to_string(),
        source,
    })?;
    let files = TypeScriptGenerator
        .generate(&ir, config)
        .map_err(|source| DocumentError::Render {
            location: location.to_string(),
            source,
        })?;

    Ok(Rendered {
        location: target.location.clone(),
        resource: target.resource.clone(),
        name: ir.name,
        files,
    })
}

/// The directory a document wants before collisions are resolved.
fn document_dir(doc: &Rendered) -> String {
    if !doc.name.is_empty() {
        return doc.name.clone();
    }
    let resource = sanitize_model_name(&doc.resource);
    if resource.is_empty() {
        FALLBACK_DOCUMENT_DIR.to_string()
    } else {
        resource
    }
}

/// Write a rendered document's files below `dir`.
async fn write_document<O>(
    sink: &O,
    doc: Rendered,
    dir: PathBuf,
) -> Result<DocumentReport, DocumentError>
where
    O: OutputSink + ?Sized,
{
    let paths: Vec<PathBuf> = doc.files.iter().map(|f| dir.join(&f.path)).collect();

    let writes = join_all(
        doc.files
            .iter()
            .zip(&paths)
            .map(|(file, path)| sink.write(path, &file.content)),
    )
    .await;
    writes
        .into_iter()
        .collect::<Result<Vec<()>, _>>()
        .map_err(|source| DocumentError::Write {
            location: doc.location.clone(),
            source,
        })?;

    log::info!(
        "generated api document {} from {} into {}",
        doc.name,
        doc.location,
        dir.display()
    );
    Ok(DocumentReport {
        location: doc.location,
        name: doc.name,
        files: paths,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use autoapi_core::parse::resource::SwaggerResource;

    use super::*;
    use crate::error::{FetchError, WriteError};

    const SUPPLIER: &str = r#"{
        "swagger": "2.0",
        "info": {"title": "supplier"},
        "basePath": "/api/v1/scm/",
        "tags": [{"name": "供应商订单", "description": "Supply Order Controller"}],
        "paths": {
            "/myItem/sku": {"get": {
                "tags": ["供应商订单"],
                "summary": "我的供货-sku列表",
                "responses": {"200": {"schema": {"type": "string"}}}
            }}
        }
    }"#;

    const MALL: &str = r#"
swagger: "2.0"
info:
  title: mall
basePath: /mall
paths:
  /ping:
    get:
      responses:
        "200":
          description: OK
"#;

    const BROKEN: &str = r#"{
        "info": {"title": "broken"},
        "paths": {"/a": {"get": {"responses": {"500": {"description": "boom"}}}}}
    }"#;

    const SHARED_TITLE_ORDERS: &str = r#"{
        "swagger": "2.0",
        "info": {"title": "Api Documentation"},
        "basePath": "/",
        "tags": [{"name": "orders", "description": "a"}],
        "paths": {"/orders": {"get": {"tags": ["orders"], "responses": {"200": {"description": "OK"}}}}}
    }"#;

    const SHARED_TITLE_USERS: &str = r#"{
        "swagger": "2.0",
        "info": {"title": "Api Documentation"},
        "basePath": "/",
        "tags": [{"name": "users", "description": "b"}],
        "paths": {"/users": {"get": {"tags": ["users"], "responses": {"200": {"description": "OK"}}}}}
    }"#;

    const UNTITLED: &str = r#"{"swagger": "2.0", "info": {"title": ""}, "paths": {}}"#;

    struct FakeSource {
        documents: HashMap<&'static str, &'static str>,
    }

    impl FakeSource {
        fn new(documents: &[(&'static str, &'static str)]) -> Self {
            Self {
                documents: documents.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl SchemaSource for FakeSource {
        async fn list_resources(&self) -> Result<Vec<SwaggerResource>, FetchError> {
            let mut locations: Vec<_> = self.documents.keys().copied().collect();
            locations.sort_unstable();
            Ok(locations
                .into_iter()
                .map(|location| SwaggerResource {
                    name: location.to_string(),
                    location: location.to_string(),
                    url: None,
                    swagger_version: Some("2.0".to_string()),
                })
                .collect())
        }

        async fn fetch_document(&self, location: &str) -> Result<String, FetchError> {
            self.documents
                .get(location)
                .map(|text| text.to_string())
                .ok_or_else(|| FetchError::Io {
                    path: PathBuf::from(location),
                    source: std::io::ErrorKind::NotFound.into(),
                })
        }
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Reset,
        Write(PathBuf, String),
    }

    #[derive(Default)]
    struct MemorySink {
        events: Mutex<Vec<Event>>,
    }

    impl MemorySink {
        fn events(&self) -> std::sync::MutexGuard<'_, Vec<Event>> {
            self.events.lock().unwrap()
        }

        fn written(&self, path: &str) -> Option<String> {
            self.events().iter().find_map(|e| match e {
                Event::Write(p, content) if p == Path::new(path) => Some(content.clone()),
                _ => None,
            })
        }
    }

    #[async_trait]
    impl OutputSink for MemorySink {
        async fn reset(&self) -> Result<(), WriteError> {
            self.events().push(Event::Reset);
            Ok(())
        }

        async fn write(&self, path: &Path, content: &str) -> Result<(), WriteError> {
            self.events()
                .push(Event::Write(path.to_path_buf(), format!("{content}\n")));
            Ok(())
        }
    }

    fn options(api_version: Option<&str>) -> BuildOptions {
        BuildOptions {
            api_version: api_version.map(String::from),
            generator: TypeScriptConfig {
                import: "import { request } from '@/request'".to_string(),
                prefix: None,
            },
        }
    }

    #[tokio::test]
    async fn test_single_location_writes_flat_files() {
        let source = FakeSource::new(&[("/v2/api-docs", SUPPLIER), ("/mall", MALL)]);
        let sink = MemorySink::default();

        let reports = build(&source, &sink, &options(Some("/v2/api-docs")))
            .await
            .unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, "SupplierScmV1Api");
        let files: Vec<_> = reports[0].files.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(files, ["models.ts", "index.ts", "SupplyOrderController.ts"]);
        assert_eq!(
            sink.written("SupplyOrderController.ts").as_deref(),
            Some(
                "import { request } from '@/request'\n\n/* 我的供货-sku列表 */\nexport const MyItemSkuGet = (): Promise<string> => request.get(`/api/v1/scm/myItem/sku`)\n"
            )
        );
        assert_eq!(sink.written("models.ts").as_deref(), Some("\n"));
    }

    #[tokio::test]
    async fn test_resource_list_writes_one_directory_per_document() {
        let source = FakeSource::new(&[("/v2/api-docs", SUPPLIER), ("/mall", MALL)]);
        let sink = MemorySink::default();

        let reports = build(&source, &sink, &options(None)).await.unwrap();

        let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["MallMall", "SupplierScmV1Api"]);
        assert!(sink.written("MallMall/default.ts").is_some());
        assert!(sink.written("MallMall/index.ts").is_some());
        assert!(sink.written("SupplierScmV1Api/SupplyOrderController.ts").is_some());
    }

    #[tokio::test]
    async fn test_reset_happens_once_before_writes() {
        let source = FakeSource::new(&[("/v2/api-docs", SUPPLIER), ("/mall", MALL)]);
        let sink = MemorySink::default();

        build(&source, &sink, &options(None)).await.unwrap();

        let events = sink.events();
        assert_eq!(events[0], Event::Reset);
        assert_eq!(events.iter().filter(|e| **e == Event::Reset).count(), 1);
        assert_eq!(events.len(), 1 + 3 + 3);
    }

    #[tokio::test]
    async fn test_failed_documents_do_not_stop_siblings() {
        let source = FakeSource::new(&[("/broken", BROKEN), ("/mall", MALL)]);
        let sink = MemorySink::default();

        let err = build(&source, &sink, &options(None)).await.unwrap_err();

        match err {
            BuildError::Documents { failures, total } => {
                assert_eq!(total, 2);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].location(), "/broken");
                assert!(matches!(failures[0], DocumentError::Transform { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sink.written("MallMall/default.ts").is_some());
    }

    #[tokio::test]
    async fn test_missing_document_is_fetch_failure() {
        let source = FakeSource::new(&[]);
        let sink = MemorySink::default();

        let err = build(&source, &sink, &options(Some("/v3/api-docs")))
            .await
            .unwrap_err();

        match err {
            BuildError::Documents { failures, .. } => {
                assert!(matches!(failures[0], DocumentError::Fetch { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(*sink.events(), [Event::Reset]);
    }

    #[tokio::test]
    async fn test_unparseable_document_is_parse_failure() {
        let source = FakeSource::new(&[("/v2/api-docs", "{ not json")]);
        let sink = MemorySink::default();

        let err = build(&source, &sink, &options(Some("/v2/api-docs")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Documents { ref failures, .. } if matches!(failures[0], DocumentError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_documents_with_same_name_get_distinct_directories() {
        let source = FakeSource::new(&[("/a", SHARED_TITLE_ORDERS), ("/b", SHARED_TITLE_USERS)]);
        let sink = MemorySink::default();

        let reports = build(&source, &sink, &options(None)).await.unwrap();

        let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Api_Documentation", "Api_Documentation"]);
        assert_eq!(
            sink.written("Api_Documentation/index.ts").as_deref(),
            Some("/* orders */\nexport * from './a'\n")
        );
        assert_eq!(
            sink.written("Api_Documentation_2/index.ts").as_deref(),
            Some("/* users */\nexport * from './b'\n")
        );
        assert!(sink.written("Api_Documentation/a.ts").is_some());
        assert!(sink.written("Api_Documentation/b.ts").is_none());
        assert!(sink.written("Api_Documentation_2/b.ts").is_some());
    }

    #[tokio::test]
    async fn test_unnamed_document_falls_back_to_resource_name() {
        let source = FakeSource::new(&[("/untitled", UNTITLED)]);
        let sink = MemorySink::default();

        let reports = build(&source, &sink, &options(None)).await.unwrap();

        assert_eq!(reports[0].name, "");
        let files: Vec<_> = reports[0].files.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(files, ["untitled/models.ts", "untitled/index.ts"]);
    }
}
