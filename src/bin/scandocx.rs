//! CLI binary for scandocx.
//!
//! A thin shim over the library crate: `convert` maps flags to a
//! `ConversionConfig` and writes the docx next to the input; `serve` starts
//! the HTTP upload service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scandocx::{convert_file, server, ConversionConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a scanned PDF (writes scan.docx next to the input)
  scandocx convert scan.pdf

  # Convert to an explicit output path with extra languages
  scandocx convert scan.pdf -o out.docx --languages eng,ara,fra

  # Start the HTTP service on port 3000, serving ./public as the upload page
  scandocx serve --port 3000 --static-dir public

REQUIREMENTS:
  pdftoppm   poppler-utils must be installed (apt install poppler-utils)
  tesseract  with the language packs you request (apt install
             tesseract-ocr tesseract-ocr-eng tesseract-ocr-ara)

ENVIRONMENT VARIABLES:
  SCANDOCX_DPI          Rendering resolution (default 300)
  SCANDOCX_LANGUAGES    Comma-separated OCR languages (default eng,ara)
  SCANDOCX_PDFTOPPM     Path to the pdftoppm binary
  SCANDOCX_TESSERACT    Path to the tesseract binary
  RUST_LOG              Tracing filter override
"#;

/// Convert scanned PDFs into editable Word documents via OCR.
#[derive(Parser, Debug)]
#[command(
    name = "scandocx",
    version,
    about = "Convert scanned PDFs into editable Word documents via OCR",
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Rendering DPI (72–600).
    #[arg(long, global = true, env = "SCANDOCX_DPI", default_value_t = 300)]
    dpi: u32,

    /// Comma-separated OCR language codes.
    #[arg(
        long,
        global = true,
        env = "SCANDOCX_LANGUAGES",
        default_value = "eng,ara",
        value_delimiter = ','
    )]
    languages: Vec<String>,

    /// Path to the pdftoppm binary.
    #[arg(long, global = true, env = "SCANDOCX_PDFTOPPM", default_value = "pdftoppm")]
    pdftoppm: PathBuf,

    /// Path to the tesseract binary.
    #[arg(long, global = true, env = "SCANDOCX_TESSERACT", default_value = "tesseract")]
    tesseract: PathBuf,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one PDF file to a Word document.
    Convert {
        /// Path to the scanned PDF.
        input: PathBuf,

        /// Output path. Defaults to the input path with a .docx extension.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the HTTP upload/convert service.
    Serve {
        /// Address to bind.
        #[arg(long, env = "SCANDOCX_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on.
        #[arg(short, long, env = "PORT", default_value_t = 3000)]
        port: u16,

        /// Directory of static assets (upload page) to serve.
        #[arg(long, env = "SCANDOCX_STATIC_DIR")]
        static_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ConversionConfig::builder()
        .dpi(cli.dpi)
        .languages(cli.languages.clone())
        .pdftoppm_path(cli.pdftoppm.clone())
        .tesseract_path(cli.tesseract.clone())
        .build()
        .context("Invalid configuration")?;

    match cli.command {
        Command::Convert { input, output } => {
            let output_path = output.unwrap_or_else(|| input.with_extension("docx"));

            let result = convert_file(&input, &config)
                .await
                .context("Conversion failed")?;

            tokio::fs::write(&output_path, &result.docx)
                .await
                .with_context(|| format!("Failed to write {}", output_path.display()))?;

            eprintln!(
                "✔ {} pages → {} paragraphs in {}ms → {}",
                result.stats.page_count,
                result.stats.paragraph_count,
                result.stats.total_duration_ms,
                output_path.display(),
            );
        }
        Command::Serve {
            host,
            port,
            static_dir,
        } => {
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("Invalid bind address {host}:{port}"))?;

            server::serve(addr, config, static_dir)
                .await
                .context("Server error")?;
        }
    }

    Ok(())
}
