//! HTTP API for signing and verifying sealed documents.
//!
//! The server is a thin layer over [`seal_engine::DocSeal`]: handlers
//! translate HTTP requests into engine calls and engine outcomes into
//! JSON responses. Verification endpoints always answer 200 and report
//! the outcome (VALID, INVALID, NOT_FOUND, CONTENT_MISSING) in the
//! body, so a missing record is not an HTTP error for them.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::SealServer;

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use seal_engine::DocSeal;
    use tower::util::ServiceExt;

    use crate::router::{build_router, AppState};

    fn test_app() -> Router {
        app_with_limit(1024 * 1024)
    }

    fn app_with_limit(max_upload_bytes: usize) -> Router {
        let engine = DocSeal::in_memory_with_key_bits(seal_crypto::MIN_KEY_BITS);
        build_router(AppState { engine }, max_upload_bytes)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn sign_request(identity: &str, display_name: &str, content: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!(
                "/v1/documents?identity={identity}&display_name={display_name}"
            ))
            .body(Body::from(content.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let app = test_app();
        let response = app.oneshot(get("/v1/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn sign_then_verify_roundtrip() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(sign_request("u1", "hello.txt", "hello-sig"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let receipt = json_body(response).await;
        assert_eq!(receipt["id"], 1);
        assert_eq!(receipt["signer_identity"], "u1");
        assert_eq!(receipt["display_name"], "hello.txt");
        assert_eq!(receipt["content_hash"].as_str().unwrap().len(), 64);
        assert!(!receipt["signature"].as_str().unwrap().is_empty());
        let stored_ref = receipt["stored_ref"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(get("/v1/documents/1/verify"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report = json_body(response).await;
        assert_eq!(report["status"], "VALID");
        assert_eq!(report["hash_matches"], true);

        let response = app
            .oneshot(get(&format!("/v1/refs/{stored_ref}/verify")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report = json_body(response).await;
        assert_eq!(report["status"], "VALID");
    }

    #[tokio::test]
    async fn verify_unknown_document_reports_not_found() {
        let app = test_app();
        let response = app.oneshot(get("/v1/documents/99/verify")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report = json_body(response).await;
        assert_eq!(report["status"], "NOT_FOUND");
        assert!(report["record"].is_null());
    }

    #[tokio::test]
    async fn show_unknown_document_is_404() {
        let app = test_app();
        let response = app.oneshot(get("/v1/documents/99")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert!(body["message"].as_str().unwrap().contains("99"));
    }

    #[tokio::test]
    async fn invalid_identity_is_rejected() {
        let app = test_app();
        let response = app
            .oneshot(sign_request("a/b", "doc.txt", "content"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_sign_params_are_rejected() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/v1/documents")
            .body(Body::from("content"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_returns_every_record() {
        let app = test_app();
        for name in ["a.txt", "b.txt"] {
            let response = app
                .clone()
                .oneshot(sign_request("u1", name, "content"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.oneshot(get("/v1/documents")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["display_name"], "a.txt");
        assert_eq!(records[1]["display_name"], "b.txt");
    }

    #[tokio::test]
    async fn download_returns_original_bytes() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(sign_request("u1", "data.bin", "raw document bytes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(get("/v1/documents/1/content"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("data.bin"));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"raw document bytes");
    }

    #[tokio::test]
    async fn oversized_upload_is_413() {
        let app = app_with_limit(16);
        let response = app
            .oneshot(sign_request("u1", "big.bin", &"x".repeat(64)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn info_counts_documents_and_identities() {
        let app = test_app();
        let before = json_body(app.clone().oneshot(get("/v1/info")).await.unwrap()).await;
        assert_eq!(before["documents"], 0);
        assert_eq!(before["identities"], 0);

        app.clone()
            .oneshot(sign_request("u1", "doc.txt", "content"))
            .await
            .unwrap();

        let after = json_body(app.oneshot(get("/v1/info")).await.unwrap()).await;
        assert_eq!(after["documents"], 1);
        assert_eq!(after["identities"], 1);
        assert_eq!(after["name"], "seal-server");
    }
}
