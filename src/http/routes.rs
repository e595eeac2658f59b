//! エンドポイント実装
//!
//! ハンドラはリクエストを検証して型に落とし、ストア呼び出しは
//! `spawn_blocking` 上で行う（ファイル書き込みを含むため）。

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::ServiceContainer;
use crate::domain::progress::{DisplayFields, FlagUpdates};
use crate::domain::word_key::WordKey;
use crate::error::Result;
use crate::http::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LemmaRequest {
    words: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagsRequest {
    word_key: Option<String>,
    updates: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRequest {
    arabic: Option<String>,
    translation: Option<String>,
    root: Option<String>,
    surah: Option<i64>,
    ayah: Option<i64>,
    start_word_index: Option<i64>,
    end_word_index: Option<i64>,
}

impl ScreenshotRequest {
    fn key(&self) -> ApiResult<WordKey> {
        let field = |name: &str, value: Option<i64>| {
            value.ok_or_else(|| ApiError::bad_request(format!("Missing {name}")))
        };
        Ok(WordKey::new(
            field("surah", self.surah)?,
            field("ayah", self.ayah)?,
            field("startWordIndex", self.start_word_index)?,
            field("endWordIndex", self.end_word_index)?,
        )?)
    }
}

async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("store task failed: {e}")))?
        .map_err(ApiError::from)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /api/known-lemmas`: 既知レマの配列をそのまま返す
pub async fn get_lemmas(State(container): State<ServiceContainer>) -> ApiResult<Json<Vec<String>>> {
    let lemmas = container.lemmas.clone();
    let words = run_blocking(move || Ok(lemmas.all())).await?;
    Ok(Json(words))
}

/// `POST /api/known-lemmas`: `{ words: string[] }` で全体を置き換える
pub async fn post_lemmas(
    State(container): State<ServiceContainer>,
    body: std::result::Result<Json<LemmaRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let words = request
        .words
        .ok_or_else(|| ApiError::bad_request("Expected { words: string[] }"))?;

    let lemmas = container.lemmas.clone();
    let count = run_blocking(move || lemmas.replace_all_json(&words)).await?;
    Ok(Json(json!({ "ok": true, "count": count })))
}

/// `GET /api/word-progress`: 全レコード
pub async fn list_progress(State(container): State<ServiceContainer>) -> ApiResult<Json<Value>> {
    let progress = container.progress.clone();
    let words = run_blocking(move || Ok(progress.snapshot())).await?;
    Ok(Json(json!({ "words": words })))
}

/// `POST /api/word-progress/flags`: `{ wordKey, updates: { known?, bookmarked? } }`
///
/// 全フラグが false になった場合は `entry: null`。
pub async fn post_flags(
    State(container): State<ServiceContainer>,
    body: std::result::Result<Json<FlagsRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let (Some(word_key), Some(updates)) = (request.word_key, request.updates) else {
        return Err(ApiError::bad_request("Missing wordKey or updates"));
    };
    let key: WordKey = word_key.parse()?;
    let updates = FlagUpdates::try_from(&updates)?;

    let progress = container.progress.clone();
    let entry = run_blocking(move || progress.upsert_flags(key, updates)).await?;
    Ok(Json(json!({ "ok": true, "entry": entry })))
}

/// `POST /api/word-progress/screenshot`: 出現ごとのスクリーンショット回数を加算
pub async fn post_screenshot(
    State(container): State<ServiceContainer>,
    body: std::result::Result<Json<ScreenshotRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let key = request.key()?;
    let display = DisplayFields::new(
        request.arabic.unwrap_or_default(),
        request.translation.unwrap_or_default(),
        request.root,
    )?;

    let progress = container.progress.clone();
    let entry = run_blocking(move || progress.record_screenshot(key, display)).await?;
    Ok(Json(json!({ "ok": true, "entry": entry })))
}
