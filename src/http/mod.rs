//! HTTP 境界（axum）
//!
//! ストアを呼ぶだけの薄いハンドラ群。入力エラーは 400、それ以外は 500。

pub mod error;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;

use crate::application::ServiceContainer;

const MAX_HTTP_BODY_BYTES: usize = 1024 * 1024;

/// ルーターを組み立てる
pub fn router(container: ServiceContainer) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/api/known-lemmas",
            get(routes::get_lemmas).post(routes::post_lemmas),
        )
        .route("/api/word-progress", get(routes::list_progress))
        .route("/api/word-progress/flags", post(routes::post_flags))
        .route("/api/word-progress/screenshot", post(routes::post_screenshot))
        // 旧クライアント向けのパス
        .route(
            "/api/word-knowledge",
            get(routes::list_progress).post(routes::post_flags),
        )
        .with_state(container)
        .layer(DefaultBodyLimit::max(MAX_HTTP_BODY_BYTES))
}

/// `bind_addr` で待ち受け、Ctrl-C で停止する
pub async fn serve(container: ServiceContainer, bind_addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "wbw-progressd listening");

    axum::serve(listener, router(container))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
