//! サービスコンテナ
//!
//! # 責任
//! - 2 つのストアの構築と共有（プロセス全体で 1 インスタンスずつ）
//! - テスト時のリポジトリ差し替えサポート

use std::path::Path;
use std::sync::Arc;

use crate::application::{LemmaStore, ProgressStore};
use crate::domain::{lemma::LemmaRepository, progress::ProgressRepository};
use crate::infrastructure::storage::{JsonFileLemmaRepo, JsonFileProgressRepo};

/// サービスコンテナ（クローンは同じストアを共有）
#[derive(Clone)]
pub struct ServiceContainer {
    pub progress: Arc<ProgressStore>,
    pub lemmas: Arc<LemmaStore>,
}

impl ServiceContainer {
    /// `dir` 配下の JSON ドキュメントを使って作成
    pub fn open(dir: &Path) -> Self {
        tracing::info!(dir = %dir.display(), "opening progress documents");
        Self::with_dependencies(JsonFileProgressRepo::in_dir(dir), JsonFileLemmaRepo::in_dir(dir))
    }

    /// 依存関係を注入して作成（テスト用）
    pub fn with_dependencies(
        progress_repo: impl ProgressRepository + 'static,
        lemma_repo: impl LemmaRepository + 'static,
    ) -> Self {
        Self {
            progress: Arc::new(ProgressStore::open(progress_repo)),
            lemmas: Arc::new(LemmaStore::open(lemma_repo)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progress::FlagUpdates;
    use tempfile::TempDir;

    #[test]
    fn open_uses_documents_in_dir() {
        let tmp = TempDir::new().unwrap();
        let container = ServiceContainer::open(tmp.path());
        container
            .progress
            .upsert_flags("1:1:1".parse().unwrap(), FlagUpdates::known(true))
            .unwrap();
        container.lemmas.replace_all(vec!["قال".to_string()]).unwrap();

        assert!(tmp.path().join("word-knowledge.json").exists());
        assert!(tmp.path().join("known-lemmas.json").exists());

        let reopened = ServiceContainer::open(tmp.path());
        assert_eq!(reopened.progress.len(), 1);
        assert_eq!(reopened.lemmas.all(), vec!["قال".to_string()]);
    }

    #[test]
    fn clones_share_stores() {
        let tmp = TempDir::new().unwrap();
        let a = ServiceContainer::open(tmp.path());
        let b = a.clone();
        a.lemmas.replace_all(vec!["x".to_string()]).unwrap();
        assert!(b.lemmas.contains("x"));
    }
}
