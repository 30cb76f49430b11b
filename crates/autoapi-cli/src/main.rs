mod build;
mod error;
mod sink;
mod source;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use autoapi_core::config::{self, AutoApiConfig, CONFIG_FILE_NAME};
use autoapi_core::ir::IrDocument;
use autoapi_core::{parse, transform};
use autoapi_typescript::TypeScriptConfig;

use crate::build::{BuildOptions, DocumentReport};
use crate::error::BuildError;
use crate::sink::FsSink;
use crate::source::{FileSchemaSource, HttpSchemaSource};

#[derive(Parser)]
#[command(
    name = "autoapi",
    about = "Generate TypeScript request bindings from Swagger 2 documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch Swagger documents and generate bindings
    Generate(GenerateArgs),

    /// Inspect the IR of a local Swagger document
    Inspect {
        /// Path to the Swagger document (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new autoapi configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Flags of `generate`. Each one overrides the matching config key.
#[derive(Args)]
struct GenerateArgs {
    /// Build a local Swagger document instead of fetching from a service
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Origin serving /swagger-resources
    #[arg(long)]
    base_url: Option<String>,

    /// Build only this document location
    #[arg(long)]
    api_version: Option<String>,

    /// Session cookie sent with every request
    #[arg(long)]
    cookie: Option<String>,

    /// Output directory, cleared before writing
    #[arg(short, long)]
    output: Option<String>,

    /// Import block placed at the top of every tag file
    #[arg(long)]
    import: Option<String>,

    /// Path prepended to the document base path in call paths
    #[arg(long)]
    prefix: Option<String>,
}

impl GenerateArgs {
    fn apply(self, cfg: &mut AutoApiConfig) -> Option<PathBuf> {
        if self.base_url.is_some() {
            cfg.base_url = self.base_url;
        }
        if self.api_version.is_some() {
            cfg.api_version = self.api_version;
        }
        if let Some(cookie) = self.cookie {
            cfg.cookie = cookie;
        }
        if let Some(output) = self.output {
            cfg.output = output;
        }
        if let Some(import) = self.import {
            cfg.import = import;
        }
        if self.prefix.is_some() {
            cfg.prefix = self.prefix;
        }
        self.input
    }
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => cmd_generate(args).await,

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "autoapi", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<AutoApiConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_document(path: &Path) -> Result<IrDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = parse::from_text(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let ir = transform::transform(&parsed)?;
    Ok(ir)
}

async fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    let input = args.apply(&mut cfg);

    let sink = FsSink::new(&cfg.output);
    let generator = TypeScriptConfig {
        import: cfg.import.clone(),
        prefix: cfg.prefix.clone(),
    };

    let result = match input {
        Some(path) => {
            let source = FileSchemaSource::new(path);
            let options = BuildOptions {
                api_version: Some(source.location()),
                generator,
            };
            build::build(&source, &sink, &options).await
        }
        None => {
            let base_url = cfg.base_url.as_deref().with_context(|| {
                format!("no base_url configured; set it in {CONFIG_FILE_NAME} or pass --base-url")
            })?;
            let source = HttpSchemaSource::new(base_url, cfg.cookie.clone())?;
            let options = BuildOptions {
                api_version: cfg.api_version.clone(),
                generator,
            };
            build::build(&source, &sink, &options).await
        }
    };

    match result {
        Ok(reports) => {
            for report in &reports {
                print_report(&sink, report);
            }
            eprintln!("All {} document(s) generated.", reports.len());
            Ok(())
        }
        Err(BuildError::Documents { failures, total }) => {
            for failure in &failures {
                eprintln!("  failed {failure}");
            }
            anyhow::bail!("{} of {total} documents failed", failures.len())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(sink: &FsSink, report: &DocumentReport) {
    eprintln!("Generated {} from {}", report.name, report.location);
    for file in &report.files {
        eprintln!("  wrote {}", sink.root().join(file).display());
    }
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let ir = load_document(&input)?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrDocument) -> serde_json::Value {
    let models: Vec<serde_json::Value> = ir
        .models
        .iter()
        .map(|m| {
            serde_json::json!({
                "name": m.name,
                "description": m.description,
                "props": m.props.iter().map(|p| &p.key).collect::<Vec<_>>(),
            })
        })
        .collect();

    let tags: Vec<serde_json::Value> = ir
        .tags
        .iter()
        .map(|tag| {
            let apis: Vec<serde_json::Value> = tag
                .apis
                .iter()
                .map(|api| {
                    serde_json::json!({
                        "name": api.name,
                        "method": api.method.as_str(),
                        "path": api.path,
                        "operation_id": api.operation_id,
                        "models": api.model_names,
                    })
                })
                .collect();
            serde_json::json!({
                "name": tag.name,
                "description": tag.description,
                "apis": apis,
            })
        })
        .collect();

    serde_json::json!({
        "name": ir.name,
        "title": ir.title,
        "base_path": ir.base_path,
        "models": models,
        "tags": tags,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
