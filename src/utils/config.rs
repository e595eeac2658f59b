//! グローバル環境変数設定
//!
//! アプリケーション全体で使用する環境変数を一元管理。
//! プロセス起動時に一度だけ初期化し、以降はどこからでもアクセス可能。

use crate::observability::LogFormat;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// グローバル環境変数設定
static ENV_CONFIG: OnceCell<Arc<EnvConfig>> = OnceCell::new();

/// 待受アドレスの既定値
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// 環境変数設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// 進捗ドキュメントの保存ディレクトリ（`PROGRESSION_DIR`）
    pub progression_dir: Option<String>,
    /// HTTP 待受アドレス（`WBW_PROGRESS_ADDR`）
    pub bind_addr: String,
    /// ログ出力形式（`WBW_PROGRESS_LOG`）
    pub log_format: LogFormat,
    /// 認識できなかった `WBW_PROGRESS_LOG` の値（ロギング開始後に警告する）
    pub unrecognized_log_format: Option<String>,
}

impl EnvConfig {
    /// 任意の参照関数から設定を組み立てる（テストでプロセス環境を汚さないため）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let (log_format, unrecognized_log_format) = match get("WBW_PROGRESS_LOG") {
            Some(raw) => match raw.parse::<LogFormat>() {
                Ok(format) => (format, None),
                Err(_) => (LogFormat::default(), Some(raw)),
            },
            None => (LogFormat::default(), None),
        };

        EnvConfig {
            progression_dir: get("PROGRESSION_DIR"),
            bind_addr: get("WBW_PROGRESS_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            log_format,
            unrecognized_log_format,
        }
    }

    /// プロセス環境変数から設定を読む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 環境変数から設定を初期化
    ///
    /// 既に初期化済みの場合は何もしない（冪等）。
    pub fn init() -> Arc<EnvConfig> {
        ENV_CONFIG
            .get_or_init(|| Arc::new(Self::from_env()))
            .clone()
    }

    /// 設定を取得（未初期化なら環境変数から初期化する）
    pub fn get() -> Arc<EnvConfig> {
        Self::init()
    }
}
