//! API handlers for the gap analyzer server
//!
//! Provides REST endpoints for:
//! - Checklist listing
//! - Document classification
//! - Batch gap analysis (JSON and Markdown)

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use checklist_engine::{classify, GapAnalyzer};
use shared_types::{BatchEntry, DocumentType};

use crate::error::ServerError;
use crate::render::render_markdown;
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
        service: "gap-analyzer-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Checklist list response
#[derive(Serialize)]
pub struct ChecklistListResponse {
    pub success: bool,
    pub checklists: Vec<ChecklistInfo>,
    pub default_selection: Vec<String>,
    pub count: usize,
}

/// Checklist metadata
#[derive(Serialize)]
pub struct ChecklistInfo {
    pub key: String,
    pub name: String,
    pub requirements: Vec<String>,
}

/// Handler: GET /api/checklists
pub async fn handle_list_checklists(State(state): State<AppState>) -> Json<ChecklistListResponse> {
    let checklists: Vec<ChecklistInfo> = state
        .registry
        .iter()
        .map(|c| ChecklistInfo {
            key: c.key().to_string(),
            name: c.name().to_string(),
            requirements: c.requirements().to_vec(),
        })
        .collect();

    let count = checklists.len();

    Json(ChecklistListResponse {
        success: true,
        checklists,
        default_selection: state.default_standards.to_vec(),
        count,
    })
}

/// Classification request body
#[derive(Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// Classification response
#[derive(Serialize)]
pub struct ClassifyResponse {
    pub success: bool,
    pub document_type: DocumentType,
}

/// Handler: POST /api/classify
pub async fn handle_classify(Json(req): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let document_type = classify(&req.text);
    debug!("Classified {} chars as {}", req.text.len(), document_type);

    Json(ClassifyResponse {
        success: true,
        document_type,
    })
}

/// One uploaded document.
///
/// Either `text` (already extracted) or `content_base64` (raw file bytes)
/// must be given; `text` wins when both are present.
#[derive(Deserialize)]
pub struct DocumentUpload {
    #[serde(default = "default_filename")]
    pub filename: String,

    pub text: Option<String>,

    pub content_base64: Option<String>,

    /// MIME type, e.g. "application/pdf" or "text/plain"
    pub content_type: Option<String>,
}

fn default_filename() -> String {
    "document.txt".to_string()
}

/// Analysis request body
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub documents: Vec<DocumentUpload>,

    /// Checklist keys or names; the server default selection when absent
    pub standards: Option<Vec<String>>,
}

/// Analysis response
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub documents: Vec<BatchEntry>,
    pub analyzed_count: usize,
    pub failed_count: usize,
    pub generated_at: String,
}

/// Handler: POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    let documents = run_analysis(state, req).await?;

    let failed_count = documents
        .iter()
        .filter(|d| matches!(d, BatchEntry::Failed { .. }))
        .count();

    Ok(Json(AnalyzeResponse {
        success: true,
        analyzed_count: documents.len() - failed_count,
        failed_count,
        documents,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Handler: POST /api/report
pub async fn handle_report(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let documents = run_analysis(state, req).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_markdown(&documents),
    ))
}

/// Extract and score every document off the async runtime
async fn run_analysis(
    state: AppState,
    req: AnalyzeRequest,
) -> Result<Vec<BatchEntry>, ServerError> {
    if req.documents.is_empty() {
        return Err(ServerError::InvalidRequest(
            "At least one document is required".to_string(),
        ));
    }

    let standards = req
        .standards
        .unwrap_or_else(|| state.default_standards.to_vec());

    info!(
        "Analysis request: documents={}, standards={:?}",
        req.documents.len(),
        standards
    );

    let documents = req.documents;
    let max_bytes = state.max_upload_bytes;
    tokio::task::spawn_blocking(move || -> Result<Vec<BatchEntry>, ServerError> {
        let analyzer = GapAnalyzer::with_registry(&state.registry);
        let selection = analyzer.select(&standards)?;

        let extracted = documents.into_iter().map(|upload| {
            let text = extract_upload(&upload, max_bytes);
            (upload.filename, text)
        });

        Ok(analyzer.analyze_batch(extracted, &selection))
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Analysis task failed: {}", e)))?
}

/// Resolve an upload to plain text. Failures stay scoped to this document.
fn extract_upload(upload: &DocumentUpload, max_bytes: usize) -> Result<String, String> {
    if let Some(text) = &upload.text {
        check_size(text.len(), max_bytes)?;
        return Ok(text.clone());
    }

    let encoded = upload
        .content_base64
        .as_deref()
        .ok_or_else(|| "Document has neither text nor content_base64".to_string())?;

    let data = BASE64
        .decode(encoded.trim())
        .map_err(|e| format!("Invalid base64 content: {}", e))?;

    check_size(data.len(), max_bytes)?;

    shared_pdf::extract_text(&upload.filename, upload.content_type.as_deref(), &data)
        .map_err(|e| e.to_string())
}

fn check_size(len: usize, max_bytes: usize) -> Result<(), String> {
    if len > max_bytes {
        return Err(format!(
            "Document is {} bytes, exceeding the {} byte limit",
            len, max_bytes
        ));
    }
    Ok(())
}
