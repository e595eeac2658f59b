use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use wbw_progress::application::ServiceContainer;
use wbw_progress::http::router;

/// 一時ディレクトリ上の JSON ドキュメントを使うコンテナ
pub fn temp_container() -> (TempDir, ServiceContainer) {
    let tmp = TempDir::new().expect("create temp dir");
    let container = ServiceContainer::open(tmp.path());
    (tmp, container)
}

pub fn test_router() -> (TempDir, ServiceContainer, Router) {
    let (tmp, container) = temp_container();
    let app = router(container.clone());
    (tmp, container, app)
}

/// JSON 本文付きリクエストを送り、ステータスと JSON 本文を返す
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), String> {
    let raw = body
        .map(|payload| serde_json::to_vec(&payload).map_err(|err| format!("serialize: {err}")))
        .transpose()?;
    send_raw(app, method, uri, raw).await
}

/// 任意バイト列の本文でリクエストを送る
#[allow(dead_code)]
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Vec<u8>>,
) -> Result<(StatusCode, Value), String> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(bytes) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes)),
        None => builder.body(Body::empty()),
    }
    .map_err(|err| format!("build request: {err}"))?;

    let response = app
        .clone()
        .oneshot(req)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .map_err(|err| format!("read response body: {err}"))?;

    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).map_err(|err| format!("parse response body: {err}"))?
    };
    Ok((status, parsed))
}
