use autoapi_core::ir::{INDEX_FILE, IrDocument, MODELS_FILE};
use autoapi_core::{CodeGenerator, GeneratedFile};
use thiserror::Error;

use crate::emitters;

#[derive(Debug, Error)]
pub enum TypeScriptError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// Configuration for the TypeScript generator.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptConfig {
    /// Import block placed at the top of every tag file. `${basePath}` is
    /// replaced with the effective base path.
    pub import: String,
    /// Prepended to the document base path in every call path.
    pub prefix: Option<String>,
}

/// TypeScript request-binding generator.
pub struct TypeScriptGenerator;

impl CodeGenerator for TypeScriptGenerator {
    type Config = TypeScriptConfig;
    type Error = TypeScriptError;

    fn generate(
        &self,
        ir: &IrDocument,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        let prefix = config.prefix.as_deref();
        let env = emitters::environment()?;

        let mut files = Vec::with_capacity(ir.tags.len() + 2);
        files.push(GeneratedFile {
            path: ts_file(MODELS_FILE),
            content: emitters::models::render_models_file(&env, &ir.models)?,
        });
        files.push(GeneratedFile {
            path: ts_file(INDEX_FILE),
            content: emitters::index::render_index_file(&env, &ir.tags)?,
        });

        for tag in &ir.tags {
            files.push(GeneratedFile {
                path: ts_file(&tag.name),
                content: emitters::tag::render_tag_file(
                    &env,
                    tag,
                    &ir.base_path,
                    prefix,
                    &config.import,
                )?,
            });
        }

        log::debug!("rendered {} files for {}", files.len(), ir.name);
        Ok(files)
    }
}

fn ts_file(stem: &str) -> String {
    format!("{stem}.ts")
}
