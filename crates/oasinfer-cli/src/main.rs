//! oasinfer CLI
//!
//! Folds a JSON-lines recording of HTTP exchanges into an OpenAPI document:
//!
//! ```text
//! oasinfer --input recordings.jsonl --base openapi.yaml --mode gen --output openapi.yaml
//! ```

use std::{
    fs,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use oasinfer::{HttpExchange, OpenApi, UpdateConfig, UpdateMode, Updater};

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "oasinfer=info";

#[derive(Parser)]
#[command(name = "oasinfer")]
#[command(
    version,
    about = "Infer an OpenAPI document from recorded HTTP exchanges"
)]
struct Cli {
    /// JSON-lines file of recorded exchanges, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Document to start from (JSON or YAML); an empty document if omitted
    #[arg(short, long)]
    base: Option<PathBuf>,

    /// Update mode: gen, replay or mixed. Overrides the config file
    #[arg(short, long)]
    mode: Option<UpdateMode>,

    /// Maximum response differences for two paths to be unified. Overrides the config file
    #[arg(long)]
    reconciliation_threshold: Option<usize>,

    /// TOML file with the update configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the document; YAML for `.yaml`/`.yml`, JSON otherwise. Stdout if
    /// omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = load_config(&cli)?;
    tracing::info!(
        mode = %config.mode,
        threshold = config.reconciliation_threshold,
        "configuration loaded"
    );
    let updater = Updater::new(config);

    let mut doc = match &cli.base {
        Some(path) => read_document(path)?,
        None => OpenApi::default(),
    };

    let reader: Box<dyn BufRead> = if cli.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = fs::File::open(&cli.input)
            .with_context(|| format!("failed to open input {}", cli.input))?;
        Box::new(BufReader::new(file))
    };

    let mut merged = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let exchange: HttpExchange = serde_json::from_str(&line)
            .with_context(|| format!("line {line_no} is not a valid exchange"))?;

        doc = match updater.update_openapi(&doc, &exchange) {
            Ok(updated) => updated,
            Err(err) => {
                tracing::error!(
                    line = line_no,
                    method = %exchange.request.method,
                    path = %exchange.request.pathname,
                    error = %err,
                    "failed to merge exchange"
                );
                return Err(err)
                    .with_context(|| format!("failed to merge exchange on line {line_no}"));
            }
        };
        merged += 1;
    }
    tracing::info!(exchanges = merged, paths = doc.paths.len(), "document updated");

    write_document(&doc, cli.output.as_deref())
}

/// Reads the configuration file, if any, and applies flag overrides.
fn load_config(cli: &Cli) -> Result<UpdateConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => UpdateConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(threshold) = cli.reconciliation_threshold {
        config.reconciliation_threshold = threshold;
    }
    Ok(config)
}

fn read_document(path: &Path) -> Result<OpenApi> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let doc = if is_yaml(path) {
        serde_norway::from_str(&contents).map_err(anyhow::Error::from)
    } else {
        serde_json::from_str(&contents).map_err(anyhow::Error::from)
    };
    doc.with_context(|| format!("failed to parse document {}", path.display()))
}

fn write_document(doc: &OpenApi, output: Option<&Path>) -> Result<()> {
    let Some(path) = output else {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, doc).context("failed to write document")?;
        writeln!(stdout).context("failed to write document")?;
        return Ok(());
    };

    let contents = if is_yaml(path) {
        serde_norway::to_string(doc).context("failed to serialize document to YAML")?
    } else {
        serde_json::to_string_pretty(doc).context("failed to serialize document to JSON")?
    };
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "document written");
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
