//! Request handlers.
//!
//! Signing and verification hash and exercise RSA keys, so those
//! handlers push the engine call onto the blocking pool instead of
//! stalling the async runtime.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use seal_engine::{
    DocSeal, DocumentId, DocumentKey, DocumentRecord, EngineError, SignerId, StoredRef,
    VerifyReport,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Query parameters accepted by the signing endpoint.
#[derive(Debug, Deserialize)]
pub struct SignParams {
    pub identity: String,
    pub display_name: String,
    pub publisher_label: Option<String>,
}

/// Response body for a successful signing request.
#[derive(Debug, Serialize)]
pub struct SignReceipt {
    pub id: u64,
    pub stored_ref: String,
    pub display_name: String,
    pub content_hash: String,
    pub signature: String,
    pub signer_identity: String,
    pub signer_public_key: String,
    pub publisher_label: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DocumentRecord> for SignReceipt {
    fn from(record: DocumentRecord) -> Self {
        Self {
            id: record.id.value(),
            stored_ref: record.stored_ref.to_string(),
            display_name: record.display_name,
            content_hash: record.content_hash.to_hex(),
            signature: record.signature.to_hex(),
            signer_identity: record.signer_identity.to_string(),
            signer_public_key: record.signer_public_key,
            publisher_label: record.publisher_label,
            created_at: record.created_at,
        }
    }
}

/// Response body for `/v1/info`.
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub documents: u64,
    pub identities: u64,
}

async fn run_blocking<T, F>(task: F) -> ServerResult<T>
where
    F: FnOnce() -> Result<T, EngineError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ServerError::Internal(format!("worker task failed: {e}")))?
        .map_err(ServerError::from)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn info(State(state): State<AppState>) -> ServerResult<Json<ServerInfo>> {
    let stats = state.engine.stats()?;
    Ok(Json(ServerInfo {
        name: "seal-server",
        version: env!("CARGO_PKG_VERSION"),
        documents: stats.documents,
        identities: stats.identities,
    }))
}

/// `POST /v1/documents` with the document bytes as the request body.
pub async fn sign_document(
    State(state): State<AppState>,
    Query(params): Query<SignParams>,
    body: Bytes,
) -> ServerResult<(StatusCode, Json<SignReceipt>)> {
    let identity = SignerId::parse(params.identity)
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;
    let engine = state.engine.clone();
    let display_name = params.display_name;
    let publisher_label = params.publisher_label;

    let record = run_blocking(move || {
        engine.sign(&identity, &display_name, &body, publisher_label)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(SignReceipt::from(record))))
}

pub async fn list_documents(
    State(state): State<AppState>,
) -> ServerResult<Json<Vec<DocumentRecord>>> {
    Ok(Json(state.engine.documents()?))
}

pub async fn show_document(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<Json<DocumentRecord>> {
    let key = DocumentKey::Id(DocumentId::new(id));
    let record = state
        .engine
        .document(&key)?
        .ok_or_else(|| ServerError::NotFound(key.to_string()))?;
    Ok(Json(record))
}

/// Verification always answers 200; the outcome lives in the report's
/// `status` field, including NOT_FOUND for unknown documents.
pub async fn verify_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<Json<VerifyReport>> {
    verify(state.engine, DocumentKey::Id(DocumentId::new(id))).await
}

pub async fn verify_by_ref(
    State(state): State<AppState>,
    Path(stored_ref): Path<String>,
) -> ServerResult<Json<VerifyReport>> {
    let stored_ref =
        StoredRef::parse(stored_ref).map_err(|e| ServerError::BadRequest(e.to_string()))?;
    verify(state.engine, DocumentKey::Ref(stored_ref)).await
}

async fn verify(engine: DocSeal, key: DocumentKey) -> ServerResult<Json<VerifyReport>> {
    let report = run_blocking(move || engine.verify(&key)).await?;
    Ok(Json(report))
}

/// `GET /v1/documents/{id}/content` serves the stored bytes back.
pub async fn download_content(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    let engine = state.engine.clone();
    let key = DocumentKey::Id(DocumentId::new(id));
    let (record, bytes) = run_blocking(move || engine.content(&key)).await?;

    let filename = disposition_filename(&record.display_name);
    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes))
}

/// Display names are arbitrary; keep the disposition header safe.
fn disposition_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '\'',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}
