//! wbw-progressd: 学習進捗ストアを HTTP で公開する常駐プロセス
//!
//! # 概要
//! 起動時に既知レマ集合と単語出現進捗を一度だけ読み込み、
//! 各更新リクエストでメモリ上の状態を変更してドキュメント全体を書き直します。
//!
//! *保存先*: `PROGRESSION_DIR`（未設定ならプラットフォームのデータディレクトリ）
//! *待受*: `WBW_PROGRESS_ADDR`（既定 `127.0.0.1:8787`）

use std::error::Error;

use wbw_progress::{
    application::ServiceContainer,
    http,
    infrastructure::config::data_dir,
    observability::init_logging,
    utils::{config::EnvConfig, env::load_env},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let env_file = load_env();
    let config = EnvConfig::init();
    init_logging(config.log_format);
    if let Some(path) = &env_file {
        tracing::info!(path = %path.display(), "environment file loaded");
    }
    if let Some(raw) = &config.unrecognized_log_format {
        tracing::warn!(value = %raw, "unknown WBW_PROGRESS_LOG value; using pretty output");
    }

    let dir = data_dir(&config);
    let container = ServiceContainer::open(&dir);
    http::serve(container, &config.bind_addr).await?;
    Ok(())
}
