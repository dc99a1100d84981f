//! ATS Resume Analysis Server
//!
//! Scores resumes for applicant-tracking-system compatibility and reports
//! the sections it could find. Two modes:
//!
//! - `serve`: REST API over positioned tokens, page streams, raw text or PDF bytes
//! - `analyze`: one-shot analysis of a PDF, JSON token file or text file
//!
//! ## Architecture
//!
//! Analysis is CPU-bound and runs on the blocking pool. Each request gets a
//! cancellation token that fires when the request timeout passes, so a
//! large document stops at the next page boundary instead of running on.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use ats_core::{CancellationToken, DocumentAnalysis, DocumentAnalyzer};
use ats_types::AnalysisConfig;
use axum::{
    routing::{get, post},
    Router,
};
use clap::{Parser, Subcommand, ValueEnum};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod input;

use api::{handle_analyze, handle_analyze_pdf, handle_config, handle_health, handle_sections};
use input::DocumentInput;

/// Command-line arguments for the ATS server
#[derive(Parser, Debug)]
#[command(name = "ats-server")]
#[command(about = "Resume ATS compatibility analysis")]
struct Args {
    /// TOML file overriding the default analysis configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Analysis timeout in milliseconds
        #[arg(long, default_value = "10000")]
        timeout_ms: u64,
    },

    /// Analyze a single file and print the report
    Analyze {
        /// PDF, JSON token file, or plain text
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<DocumentAnalyzer>,
    /// Analysis timeout in milliseconds
    pub timeout_ms: u64,
}

/// Router with every API route and its middleware
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/analyze", post(handle_analyze))
        .route("/api/analyze/pdf", post(handle_analyze_pdf))
        .route("/api/sections", post(handle_sections))
        .route("/api/config", get(handle_config))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let config = AnalysisConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let analyzer = Arc::new(DocumentAnalyzer::new(load_config(args.config.as_deref())?));

    match args.command {
        Command::Serve {
            port,
            host,
            timeout_ms,
        } => serve(analyzer, &host, port, timeout_ms).await,
        Command::Analyze { file, format } => analyze(&analyzer, &file, format),
    }
}

async fn serve(
    analyzer: Arc<DocumentAnalyzer>,
    host: &str,
    port: u16,
    timeout_ms: u64,
) -> anyhow::Result<()> {
    info!("Starting ATS server on {}:{}", host, port);

    let state = AppState {
        analyzer,
        timeout_ms,
    };

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Analysis timeout: {}ms", timeout_ms);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn analyze(analyzer: &DocumentAnalyzer, file: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let input = DocumentInput::from_path(file)?;
    let analysis = input
        .analyze(analyzer, &CancellationToken::new())
        .with_context(|| format!("Failed to analyze {}", file.display()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => print!("{}", render_report(&analysis)),
    }

    Ok(())
}

/// Human-readable report: stats, sections, then the score report
fn render_report(analysis: &DocumentAnalysis) -> String {
    let mut out = String::new();
    let stats = &analysis.stats;

    out.push_str(&format!(
        "Document: {} pages, {} words, {} characters\n\n",
        stats.page_count, stats.word_count, stats.char_count
    ));

    out.push_str("SECTIONS\n");
    for section in &analysis.sections {
        let mark = if section.was_extracted { '✓' } else { '✗' };
        out.push_str(&format!("  {} {} (line {})", mark, section.name, section.line_number));
        if section.has_table {
            out.push_str(" [table]");
        }
        if section.has_image {
            out.push_str(" [image]");
        }
        out.push('\n');
        if let Some(reason) = &section.issue_reason {
            out.push_str(&format!("      {}\n", reason));
        }
    }
    out.push('\n');

    out.push_str(&analysis.result.to_text());
    out
}
