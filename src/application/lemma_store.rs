//! 既知レマストア（全体置換のみ）

use crate::domain::lemma::{LemmaRepository, LemmaSet};
use crate::error::{ProgressError, Result};
use serde_json::Value;
use std::sync::{PoisonError, RwLock};

pub struct LemmaStore {
    set: RwLock<LemmaSet>,
    repo: Box<dyn LemmaRepository>,
}

impl LemmaStore {
    /// 読み込みに失敗した場合は空集合で開始します。
    pub fn open(repo: impl LemmaRepository + 'static) -> Self {
        let set = match repo.load() {
            Ok(words) => {
                let set = LemmaSet::from_words(words);
                tracing::info!(count = set.len(), "known lemmas loaded");
                set
            }
            Err(e) => {
                tracing::warn!(error = %e, "known lemmas unreadable; starting empty");
                LemmaSet::default()
            }
        };
        Self {
            set: RwLock::new(set),
            repo: Box::new(repo),
        }
    }

    /// 集合全体を置き換えて永続化し、置換後の件数を返します。
    pub fn replace_all(&self, lemmas: impl IntoIterator<Item = String>) -> Result<usize> {
        self.replace(LemmaSet::from_words(lemmas))
    }

    /// JSON 配列を検証してから置き換えます。検証に失敗した場合は何も変えません。
    pub fn replace_all_json(&self, lemmas: &Value) -> Result<usize> {
        self.replace(LemmaSet::from_json(lemmas)?)
    }

    pub fn all(&self) -> Vec<String> {
        self.set
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_slice()
            .to_vec()
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.set
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(lemma)
    }

    fn replace(&self, next: LemmaSet) -> Result<usize> {
        let mut set = self.set.write().unwrap_or_else(PoisonError::into_inner);
        *set = next;
        let count = set.len();

        self.repo.save(set.as_slice()).map_err(|e| {
            tracing::error!(error = %e, "failed to persist known lemmas");
            match e {
                ProgressError::PersistenceFailure(_) => e,
                other => ProgressError::PersistenceFailure(other.to_string()),
            }
        })?;
        tracing::info!(count, "known lemmas saved");
        Ok(count)
    }
}
