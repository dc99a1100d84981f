//! API handlers for the ATS server
//!
//! Provides REST endpoints for:
//! - Full resume analysis (stats, sections, score) from tokens, text or raw PDF bytes
//! - Section detection only
//! - The active analysis configuration

use std::time::Duration;

use ats_core::{CancellationToken, DocumentAnalysis};
use ats_types::{
    AnalysisConfig, AnalysisResult, DocumentStats, PageTokens, PositionedToken, Section,
};
use axum::{body::Bytes, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ServerError;
use crate::input::DocumentInput;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "ats-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Highest page count a request may describe
const MAX_PAGES: usize = 1000;

/// Analysis request body
///
/// Exactly one of `tokens`, `pages` or `text` must be present.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Flat token stream; tokens carry their own page index
    pub tokens: Option<Vec<PositionedToken>>,

    /// Per-page token streams
    pub pages: Option<Vec<PageTokens>>,

    /// Already-extracted text, pages separated by form feeds
    pub text: Option<String>,

    /// Page count for `text` input
    pub page_count: Option<usize>,
}

impl AnalyzeRequest {
    pub(crate) fn into_input(self) -> Result<DocumentInput, ServerError> {
        let highest_page = self
            .tokens
            .iter()
            .flatten()
            .map(|t| t.page_index)
            .chain(self.pages.iter().flatten().map(|p| p.page_index))
            .max();
        if highest_page.is_some_and(|page| page >= MAX_PAGES) {
            return Err(ServerError::InvalidRequest(format!(
                "Page indices must be below {}",
                MAX_PAGES
            )));
        }

        match (self.tokens, self.pages, self.text) {
            (Some(tokens), None, None) => Ok(DocumentInput::Tokens(tokens)),
            (None, Some(pages), None) => Ok(DocumentInput::Pages(pages)),
            (None, None, Some(text)) => Ok(DocumentInput::text(text, self.page_count)),
            (None, None, None) => Err(ServerError::InvalidRequest(
                "One of 'tokens', 'pages' or 'text' is required".to_string(),
            )),
            _ => Err(ServerError::InvalidRequest(
                "Only one of 'tokens', 'pages' or 'text' may be given".to_string(),
            )),
        }
    }
}

/// Analysis response
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis_id: String,
    pub analyzed_at: DateTime<Utc>,
    pub stats: DocumentStats,
    pub sections: Vec<Section>,
    pub result: AnalysisResult,
}

/// Handler: POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    let analysis = run_analysis(&state, req.into_input()?).await?;
    Ok(Json(analysis_response(analysis)))
}

/// Handler: POST /api/analyze/pdf
///
/// The body is the PDF file itself. Unreadable or encrypted files fail with
/// `EXTRACTION_FAILED`.
pub async fn handle_analyze_pdf(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    if body.is_empty() {
        return Err(ServerError::InvalidRequest(
            "Request body must contain a PDF file".to_string(),
        ));
    }

    let analysis = run_analysis(&state, DocumentInput::Pdf(body.to_vec())).await?;
    Ok(Json(analysis_response(analysis)))
}

fn analysis_response(analysis: DocumentAnalysis) -> AnalyzeResponse {
    let analysis_id = Uuid::new_v4().to_string();

    info!(
        analysis_id = %analysis_id,
        overall_score = analysis.result.overall_score,
        tier = analysis.result.tier.label(),
        "Analysis complete"
    );

    AnalyzeResponse {
        success: true,
        analysis_id,
        analyzed_at: Utc::now(),
        stats: analysis.stats,
        sections: analysis.sections,
        result: analysis.result,
    }
}

/// Section list response
#[derive(Serialize)]
pub struct SectionsResponse {
    pub success: bool,
    pub sections: Vec<Section>,
    pub count: usize,
}

/// Handler: POST /api/sections
pub async fn handle_sections(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<SectionsResponse>, ServerError> {
    let analysis = run_analysis(&state, req.into_input()?).await?;
    let count = analysis.sections.len();

    Ok(Json(SectionsResponse {
        success: true,
        sections: analysis.sections,
        count,
    }))
}

/// Active configuration response
#[derive(Serialize)]
pub struct ConfigResponse {
    pub success: bool,
    pub config: AnalysisConfig,
}

/// Handler: GET /api/config
pub async fn handle_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        success: true,
        config: state.analyzer.config().clone(),
    })
}

/// Run an analysis on the blocking pool, cancelling it once the timeout passes
async fn run_analysis(
    state: &AppState,
    input: DocumentInput,
) -> Result<DocumentAnalysis, ServerError> {
    let analyzer = state.analyzer.clone();
    let cancel = CancellationToken::new();
    let worker_cancel = cancel.clone();

    debug!(timeout_ms = state.timeout_ms, "Dispatching analysis");
    let task = tokio::task::spawn_blocking(move || input.analyze(&analyzer, &worker_cancel));

    match tokio::time::timeout(Duration::from_millis(state.timeout_ms), task).await {
        Ok(joined) => joined
            .map_err(|e| ServerError::Internal(format!("Analysis task failed: {}", e)))?
            .map_err(ServerError::from),
        Err(_) => {
            cancel.cancel();
            warn!(timeout_ms = state.timeout_ms, "Analysis timed out, cancelling");
            Err(ServerError::Cancelled(format!(
                "analysis exceeded {}ms",
                state.timeout_ms
            )))
        }
    }
}
