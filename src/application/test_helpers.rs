//! テスト用のヘルパー実装（メモリ上のリポジトリ）

use crate::domain::lemma::LemmaRepository;
use crate::domain::progress::{ProgressRecord, ProgressRepository};
use crate::error::{ProgressError, Result};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Slot<T> {
    saved: Vec<T>,
    save_count: usize,
    fail_loads: bool,
    fail_saves: bool,
}

/// 失敗を注入できるメモリ上のドキュメント（クローンは同じ中身を共有）
#[derive(Debug, Clone)]
pub struct MemoryRepo<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Default for MemoryRepo<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                saved: Vec::new(),
                save_count: 0,
                fail_loads: false,
                fail_saves: false,
            })),
        }
    }
}

pub type MemoryProgressRepo = MemoryRepo<ProgressRecord>;
pub type MemoryLemmaRepo = MemoryRepo<String>;

impl<T: Clone> MemoryRepo<T> {
    /// 最後に保存された内容
    pub fn saved(&self) -> Vec<T> {
        self.lock().saved.clone()
    }

    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// 外部からドキュメントを書き換える
    pub fn replace(&self, contents: Vec<T>) {
        self.lock().saved = contents;
    }

    pub fn fail_loads(&self, fail: bool) {
        self.lock().fail_loads = fail;
    }

    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_inner(&self) -> Result<Vec<T>> {
        let slot = self.lock();
        if slot.fail_loads {
            return Err(ProgressError::PersistenceFailure(
                "simulated corrupt document".into(),
            ));
        }
        Ok(slot.saved.clone())
    }

    fn save_inner(&self, all: &[T]) -> Result<()> {
        let mut slot = self.lock();
        if slot.fail_saves {
            return Err(ProgressError::PersistenceFailure(
                "simulated disk full".into(),
            ));
        }
        slot.saved = all.to_vec();
        slot.save_count += 1;
        Ok(())
    }
}

impl ProgressRepository for MemoryProgressRepo {
    fn load(&self) -> Result<Vec<ProgressRecord>> {
        self.load_inner()
    }

    fn save(&self, all: &[ProgressRecord]) -> Result<()> {
        self.save_inner(all)
    }
}

impl LemmaRepository for MemoryLemmaRepo {
    fn load(&self) -> Result<Vec<String>> {
        self.load_inner()
    }

    fn save(&self, all: &[String]) -> Result<()> {
        self.save_inner(all)
    }
}
