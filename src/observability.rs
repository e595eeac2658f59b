//! ログ出力の初期化
//!
//! `RUST_LOG` でレベルを制御します（未設定時は `info`）。

use crate::domain::word_key::WordKey;
use std::str::FromStr;
use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// ログ出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON 構造化ログ
    Json,
    /// 開発用の整形出力
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// ロギングを初期化します。2 回目以降の呼び出しは何もしません。
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
        }
    });
}

/// 単語出現 1 件に対する更新操作のスパン
///
/// ```rust
/// use wbw_progress::observability::progress_span;
///
/// let key = "2:255:3".parse().unwrap();
/// let _guard = progress_span("record_screenshot", &key).entered();
/// ```
#[must_use]
pub fn progress_span(operation: &'static str, word_key: &WordKey) -> Span {
    tracing::info_span!("word_progress", op = operation, word_key = %word_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(LogFormat::Pretty);
        init_logging(LogFormat::Json);
        let key = "18:10:12-14".parse().unwrap();
        let _guard = progress_span("upsert_flags", &key).entered();
        tracing::info!("logging initialised");
    }

    #[test]
    fn parses_log_format() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" Pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
