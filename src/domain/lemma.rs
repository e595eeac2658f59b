//! 既知レマ（語彙）集合とリポジトリ抽象 – ドメイン層

use crate::error::{ProgressError, Result};
use serde_json::Value;
use std::collections::HashSet;

/// 既知レマの集合。書き込みは常に全体置換。
///
/// 並び順は往復時の再現性のためだけに保持し、意味は持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LemmaSet {
    words: Vec<String>,
}

impl LemmaSet {
    /// 重複は最初の出現だけを残して畳み込む
    pub fn from_words(words: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .filter(|w| seen.insert(w.clone()))
            .collect();
        Self { words }
    }

    /// `["…", …]` 以外は `InvalidInput`
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(ProgressError::InvalidInput(
                "expected { words: string[] }".into(),
            ));
        };
        let words = items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(ProgressError::InvalidInput(format!(
                    "words[{i}] is not a string"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_words(words))
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.words.iter().any(|w| w == lemma)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

/// 既知レマ永続化 I/F
pub trait LemmaRepository: Send + Sync {
    fn load(&self) -> Result<Vec<String>>;
    fn save(&self, all: &[String]) -> Result<()>;
}
