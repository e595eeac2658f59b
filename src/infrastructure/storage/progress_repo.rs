//! JSON ファイル版 ProgressRepository 実装
//!
//! 保存形式は `{ "words": [Record, …] }`。
//! 旧形式 `{ "2:255:3": { "known": true }, … }` も読み込める。

use crate::domain::progress::{ProgressRecord, ProgressRepository};
use crate::domain::word_key::WordKey;
use crate::error::Result;
use crate::infrastructure::storage::json_file::{read_json, write_json_atomic};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const PROGRESS_FILE_NAME: &str = "word-knowledge.json";

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Records { words: Vec<Value> },
    KeyedFlags(Map<String, Value>),
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    words: &'a [ProgressRecord],
}

pub struct JsonFileProgressRepo {
    path: PathBuf,
}

impl JsonFileProgressRepo {
    /// `dir/word-knowledge.json` を使うリポジトリ
    pub fn in_dir(dir: &Path) -> Self {
        Self::at_path(dir.join(PROGRESS_FILE_NAME))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressRepository for JsonFileProgressRepo {
    fn load(&self) -> Result<Vec<ProgressRecord>> {
        let Some(doc) = read_json::<StoredDocument>(&self.path)? else {
            return Ok(vec![]);
        };
        Ok(match doc {
            StoredDocument::Records { words } => words
                .into_iter()
                .enumerate()
                .filter_map(|(i, raw)| match serde_json::from_value::<ProgressRecord>(raw) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(index = i, error = %e, "skipping unreadable progress record");
                        None
                    }
                })
                .collect(),
            StoredDocument::KeyedFlags(map) => map
                .into_iter()
                .filter_map(|(word_key, flags)| keyed_flags_to_record(&word_key, &flags))
                .collect(),
        })
    }

    fn save(&self, all: &[ProgressRecord]) -> Result<()> {
        write_json_atomic(&self.path, &DocumentRef { words: all })
    }
}

/// 旧形式の 1 エントリをレコードへ変換。キーが読めなければ捨てる。
fn keyed_flags_to_record(word_key: &str, flags: &Value) -> Option<ProgressRecord> {
    let key = match word_key.parse::<WordKey>() {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(word_key, error = %e, "skipping legacy entry with unreadable key");
            return None;
        }
    };
    let flag = |name: &str| flags.get(name).and_then(Value::as_bool).unwrap_or(false);

    let mut record = ProgressRecord::empty(key);
    record.known = flag("known");
    record.bookmarked = flag("bookmarked");
    Some(record)
}
