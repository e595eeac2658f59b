//! 統一エラーハンドリング
//!
//! 進捗ストア全体で使用するエラー型を定義します。
//! 入力起因のエラー（クライアントが修正可能）と永続化の失敗を区別し、
//! HTTP 層ではそれぞれ 400 / 500 に対応付けます。

use thiserror::Error;

/// wbw_progress 全体で使用する統一エラー型
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    // ========================================
    // 入力検証エラー（変更前に検出）
    // ========================================
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Invalid update: {0}")]
    InvalidUpdate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================
    // 永続化エラー
    // ========================================
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

/// 統一Result型エイリアス
pub type Result<T> = std::result::Result<T, ProgressError>;

impl From<std::io::Error> for ProgressError {
    fn from(error: std::io::Error) -> Self {
        ProgressError::PersistenceFailure(error.to_string())
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(error: serde_json::Error) -> Self {
        ProgressError::PersistenceFailure(error.to_string())
    }
}

impl From<tempfile::PersistError> for ProgressError {
    fn from(error: tempfile::PersistError) -> Self {
        ProgressError::PersistenceFailure(error.error.to_string())
    }
}

impl From<ProgressError> for String {
    fn from(error: ProgressError) -> Self {
        error.to_string()
    }
}

// ========================================
// ヘルパー関数
// ========================================

impl ProgressError {
    /// クライアントがリクエストを直せば解決するエラーか
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ProgressError::InvalidIdentity(_)
                | ProgressError::InvalidUpdate(_)
                | ProgressError::InvalidInput(_)
        )
    }

    /// 安定した機械可読コード
    pub fn code(&self) -> &'static str {
        match self {
            ProgressError::InvalidIdentity(_) => "INVALID_IDENTITY",
            ProgressError::InvalidUpdate(_) => "INVALID_UPDATE",
            ProgressError::InvalidInput(_) => "INVALID_INPUT",
            ProgressError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
        }
    }

    /// エラーの重要度レベルを取得
    pub fn severity(&self) -> ErrorSeverity {
        if self.is_client_error() {
            ErrorSeverity::Warning
        } else {
            ErrorSeverity::Error
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        assert!(ProgressError::InvalidIdentity("x".into()).is_client_error());
        assert!(ProgressError::InvalidUpdate("x".into()).is_client_error());
        assert!(ProgressError::InvalidInput("x".into()).is_client_error());
        assert!(!ProgressError::PersistenceFailure("x".into()).is_client_error());
    }

    #[test]
    fn io_errors_become_persistence_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ProgressError = io.into();
        assert_eq!(err.code(), "PERSISTENCE_FAILURE");
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(err.to_string().contains("denied"));
    }
}
