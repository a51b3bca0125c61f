use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use summarizer_core::config_file::resolve_config;
use summarizer_core::{
    PdfBackend, Summarizer, SummarizerConfig, chunk_text, extract_raw_text, normalize_text,
};
use summarizer_pdf_mupdf::MupdfBackend;

/// PDF Summarizer - Summarize PDF documents chunk by chunk with a remote model
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a PDF file
    Summarize {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Summarization API key (overrides HF_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Summarization endpoint URL (overrides HF_API_URL)
        #[arg(long)]
        api_url: Option<String>,

        /// Maximum characters per chunk
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Write the summary to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the normalized text of a PDF and its chunking, without summarizing
    Extract {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Maximum characters per chunk
        #[arg(long)]
        chunk_size: Option<usize>,
    },
}

/// Flag values that take precedence over config files and the environment.
#[derive(Debug, Default)]
struct Overrides {
    api_key: Option<String>,
    api_url: Option<String>,
    chunk_size: Option<usize>,
    timeout: Option<u64>,
}

impl Overrides {
    fn apply(self, config: &mut SummarizerConfig) {
        if let Some(key) = self.api_key {
            config.api_key = Some(key);
        }
        if let Some(url) = self.api_url {
            config.api_url = url;
        }
        if let Some(n) = self.chunk_size {
            config.chunk_size = n;
        }
        if let Some(secs) = self.timeout {
            config.request_timeout_secs = secs;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Summarize {
            file_path,
            api_key,
            api_url,
            chunk_size,
            timeout,
            output,
        } => {
            let overrides = Overrides {
                api_key,
                api_url,
                chunk_size,
                timeout,
            };
            summarize(file_path, overrides, output).await
        }
        Command::Extract {
            file_path,
            chunk_size,
        } => {
            let overrides = Overrides {
                chunk_size,
                ..Overrides::default()
            };
            extract(file_path, overrides).await
        }
    }
}

async fn summarize(
    file_path: PathBuf,
    overrides: Overrides,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(overrides)?;
    let backend = backend_for(&config);
    let summarizer = Arc::new(Summarizer::from_config(config)?);

    ensure_exists(&file_path)?;
    let raw = {
        let summarizer = summarizer.clone();
        let path = file_path.clone();
        tokio::task::spawn_blocking(move || summarizer.extract_text(&path, &backend)).await??
    };

    let chunks = summarizer.prepare_text(&raw)?;
    let summary = summarizer.summarize_chunks(&chunks).await?;

    tracing::info!(
        chunks = summary.stats.chunks,
        summarized = summary.stats.summarized,
        too_short = summary.stats.too_short,
        failed = summary.stats.failed,
        unavailable = summary.stats.unavailable,
        "summary complete"
    );

    let mut writer: Box<dyn Write> = match output {
        Some(ref path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    writeln!(writer, "{}", summary.text())?;
    Ok(())
}

async fn extract(file_path: PathBuf, overrides: Overrides) -> anyhow::Result<()> {
    let config = load_config(overrides)?;
    let backend = backend_for(&config);

    ensure_exists(&file_path)?;
    let pages = tokio::task::spawn_blocking(move || backend.extract_pages(&file_path)).await??;

    let normalized = normalize_text(&extract_raw_text(&pages, config.gap_threshold));
    if normalized.is_empty() {
        anyhow::bail!("No text found in PDF");
    }
    let chunks = chunk_text(&normalized, config.chunk_size);

    println!("{}", normalized);
    eprintln!();
    eprintln!(
        "{} pages, {} characters, {} chunks",
        pages.len(),
        normalized.chars().count(),
        chunks.len()
    );
    for chunk in &chunks {
        let note = if chunk.char_len() < config.min_chunk_chars {
            " (too short, skipped)"
        } else {
            ""
        };
        eprintln!("  chunk {}: {} chars{}", chunk.index, chunk.char_len(), note);
    }
    Ok(())
}

/// Configuration precedence: CLI flags > env vars > config files > defaults.
fn load_config(overrides: Overrides) -> anyhow::Result<SummarizerConfig> {
    let mut config = resolve_config();
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

fn backend_for(config: &SummarizerConfig) -> MupdfBackend {
    MupdfBackend::new().with_tolerances(config.x_tolerance, config.y_tolerance)
}

fn ensure_exists(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
