//! Router and request handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::client::{AnalysisClient, PdfProxyClient, SearchClient};
use crate::config::{Config, endpoints};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Paper, UploadReport};
use crate::pipeline;
use crate::store::CollectionStore;

/// Shared state for HTTP handlers.
pub struct AppState {
    pub search: SearchClient,
    pub analysis: AnalysisClient,
    pub pdf_proxy: PdfProxyClient,
    pub store: CollectionStore,
}

impl AppState {
    /// Build the upstream clients and store from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            search: SearchClient::new(config)?,
            analysis: AnalysisClient::new(config)?,
            pdf_proxy: PdfProxyClient::new(config)?,
            store: CollectionStore::new(),
        })
    }
}

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/concepts", post(handle_concepts))
        .route("/api/search", post(handle_search))
        .route("/api/uploads", post(handle_uploads))
        .route(
            "/api/analyze",
            post(handle_analyze).layer(DefaultBodyLimit::max(endpoints::MAX_UPLOAD_BYTES)),
        )
        .route("/api/semantic-parts", post(handle_semantic_parts))
        .route("/api/chat", post(handle_chat))
        .route("/api/chat/clear", post(handle_chat_clear))
        .route("/api/collections", get(handle_collections_list).post(handle_collection_create))
        .route(
            "/api/collections/{id}",
            get(handle_collection_get).delete(handle_collection_delete),
        )
        .route("/api/collections/{id}/papers", post(handle_collection_add_papers))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Client(_) | Self::Unavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Serialization(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::debug!(status = %status, error = %self, "request failed");
        (status, Json(json!({ "error": self.to_user_message() }))).into_response()
    }
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "paperdeck",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Deserialize)]
struct ThesisRequest {
    thesis: String,
}

/// Extract sub-concepts from a thesis statement.
async fn handle_concepts(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ThesisRequest>,
) -> ServiceResult<Json<serde_json::Value>> {
    let thesis = validated_thesis(&req)?;
    let concepts = pipeline::extract_concepts(&state.analysis, thesis).await?;
    Ok(Json(json!({ "concepts": concepts })))
}

/// Full search flow: extract concepts, then fan one search out per concept.
async fn handle_search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ThesisRequest>,
) -> ServiceResult<Json<serde_json::Value>> {
    let thesis = validated_thesis(&req)?;

    let concepts = pipeline::extract_concepts(&state.analysis, thesis).await?;
    tracing::info!(thesis = %thesis, concepts = concepts.len(), "searching per concept");

    let groups = pipeline::search_concepts(&state.search, &concepts).await;
    Ok(Json(json!({ "concepts": concepts, "groups": groups })))
}

fn validated_thesis(req: &ThesisRequest) -> ServiceResult<&str> {
    let thesis = req.thesis.trim();
    if thesis.is_empty() {
        return Err(ServiceError::validation("thesis", "cannot be empty"));
    }
    Ok(thesis)
}

#[derive(Debug, Deserialize)]
struct PapersRequest {
    papers: Vec<Paper>,
}

/// Upload the selected papers' PDFs to the analysis backend.
async fn handle_uploads(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PapersRequest>,
) -> Json<UploadReport> {
    let report = pipeline::upload_batch(&state.pdf_proxy, &state.analysis, &req.papers).await;
    Json(report)
}

/// Forward an uploaded PDF to analyze-and-summarize.
async fn handle_analyze(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ServiceResult<Json<serde_json::Value>> {
    while let Some(field) =
        multipart.next_field().await.map_err(|e| ServiceError::validation("pdf", e.to_string()))?
    {
        if field.name() == Some("pdf") {
            let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServiceError::validation("pdf", e.to_string()))?;

            let envelope = state.analysis.summarize_pdf(&file_name, bytes.to_vec()).await?;
            return Ok(Json(envelope));
        }
    }

    Err(ServiceError::validation("pdf", "missing `pdf` file field"))
}

/// Pass a semantic-parsing request through to the backend.
async fn handle_semantic_parts(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> ServiceResult<Json<serde_json::Value>> {
    let response = state.analysis.semantic_parts(body).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    /// Collection whose chat history this message belongs to, if any.
    #[serde(default)]
    collection_id: Option<String>,

    /// Remaining payload, forwarded to the backend untouched.
    #[serde(flatten)]
    body: serde_json::Value,
}

/// Forward a chat message to the backend; record the exchange on the
/// collection when one is named.
async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> ServiceResult<Json<serde_json::Value>> {
    let envelope = state.analysis.chat(req.body.clone()).await?;

    if let Some(collection_id) = &req.collection_id {
        if let Some(message) = req.body.get("message").and_then(serde_json::Value::as_str) {
            state.store.append_message(collection_id, "user", message).await;
        }
        if let Some(reply) = envelope.get("response").and_then(serde_json::Value::as_str) {
            state.store.append_message(collection_id, "assistant", reply).await;
        }
    }

    Ok(Json(envelope))
}

/// Clear the backend's chat history.
async fn handle_chat_clear(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> ServiceResult<Json<serde_json::Value>> {
    let response = state.analysis.clear_history(body).await?;
    Ok(Json(response))
}

async fn handle_collections_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.list().await)
}

#[derive(Debug, Deserialize)]
struct CreateCollectionRequest {
    name: String,

    #[serde(default)]
    thesis: Option<String>,
}

async fn handle_collection_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCollectionRequest>,
) -> ServiceResult<impl IntoResponse> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServiceError::validation("name", "cannot be empty"));
    }

    let collection = state.store.create(name, req.thesis).await;
    Ok((StatusCode::CREATED, Json(collection)))
}

async fn handle_collection_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    let collection = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ServiceError::not_found(format!("collection {id}")))?;
    Ok(Json(collection))
}

async fn handle_collection_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    if state.store.delete(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::not_found(format!("collection {id}")))
    }
}

async fn handle_collection_add_papers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PapersRequest>,
) -> ServiceResult<impl IntoResponse> {
    let collection = state
        .store
        .add_papers(&id, req.papers)
        .await
        .ok_or_else(|| ServiceError::not_found(format!("collection {id}")))?;
    Ok(Json(collection))
}
