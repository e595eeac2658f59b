//! 単語出現進捗ストア
//!
//! # 責任
//! - 起動時に一度だけドキュメントを読み込み、メモリ上に保持
//! - 変更ごとに「読み取り → 計算 → 永続化」を 1 つの書き込みロック内で実行
//! - 読み取りは並行可能、書き込み中の読み取りは待たされる
//!
//! 永続化に失敗した場合もメモリ上の変更は取り消さない（再起動で失われる可能性がある
//! ことを呼び出し側へ `PersistenceFailure` で伝える）。

use crate::domain::progress::{
    DisplayFields, FlagUpdates, ProgressBook, ProgressRecord, ProgressRepository,
};
use crate::domain::word_key::WordKey;
use crate::error::{ProgressError, Result};
use crate::observability::progress_span;
use chrono::Utc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub struct ProgressStore {
    book: RwLock<ProgressBook>,
    repo: Box<dyn ProgressRepository>,
}

impl ProgressStore {
    /// リポジトリから読み込んでストアを作成します。
    ///
    /// ドキュメントが無い・壊れている場合は警告を出して空で開始します。
    pub fn open(repo: impl ProgressRepository + 'static) -> Self {
        let book = match repo.load() {
            Ok(records) => {
                let book = ProgressBook::from_records(records);
                tracing::info!(count = book.len(), "word progress loaded");
                book
            }
            Err(e) => {
                tracing::warn!(error = %e, "word progress unreadable; starting empty");
                ProgressBook::new()
            }
        };
        Self {
            book: RwLock::new(book),
            repo: Box::new(repo),
        }
    }

    /// フラグを浅くマージして永続化します。削除された場合は `None`。
    pub fn upsert_flags(
        &self,
        key: WordKey,
        updates: FlagUpdates,
    ) -> Result<Option<ProgressRecord>> {
        let _span = progress_span("upsert_flags", &key).entered();
        let mut book = self.write();
        let entry = book.upsert_flags(key, updates);
        self.persist(&book)?;
        tracing::debug!(removed = entry.is_none(), "flags updated");
        Ok(entry)
    }

    /// スクリーンショットを 1 回記録して永続化します。
    ///
    /// 同じキーで呼ぶたびに回数が増える（冪等ではない）。
    pub fn record_screenshot(&self, key: WordKey, display: DisplayFields) -> Result<ProgressRecord> {
        let _span = progress_span("record_screenshot", &key).entered();
        let mut book = self.write();
        let entry = book.record_screenshot(key, display, Utc::now());
        self.persist(&book)?;
        tracing::debug!(screenshots = entry.screenshot_count, "screenshot recorded");
        Ok(entry)
    }

    pub fn get(&self, key: &WordKey) -> Option<ProgressRecord> {
        self.read().get(key).cloned()
    }

    /// キー順の全レコード
    pub fn snapshot(&self) -> Vec<ProgressRecord> {
        self.read().to_vec()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// ディスクから明示的に読み直します。失敗時は現在の状態を保持します。
    pub fn reload(&self) -> Result<usize> {
        let mut book = self.write();
        let records = self.repo.load()?;
        *book = ProgressBook::from_records(records);
        Ok(book.len())
    }

    fn persist(&self, book: &ProgressBook) -> Result<()> {
        self.repo.save(&book.to_vec()).map_err(|e| {
            tracing::error!(error = %e, "failed to persist word progress");
            match e {
                ProgressError::PersistenceFailure(_) => e,
                other => ProgressError::PersistenceFailure(other.to_string()),
            }
        })?;
        tracing::info!(count = book.len(), "word progress saved");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, ProgressBook> {
        self.book.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProgressBook> {
        self.book.write().unwrap_or_else(PoisonError::into_inner)
    }
}
