//! JSON ファイル版 LemmaRepository 実装（文字列のフラット配列）

use crate::domain::lemma::LemmaRepository;
use crate::error::Result;
use crate::infrastructure::storage::json_file::{read_json, write_json_atomic};
use std::path::{Path, PathBuf};

pub const LEMMA_FILE_NAME: &str = "known-lemmas.json";

pub struct JsonFileLemmaRepo {
    path: PathBuf,
}

impl JsonFileLemmaRepo {
    /// `dir/known-lemmas.json` を使うリポジトリ
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(LEMMA_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LemmaRepository for JsonFileLemmaRepo {
    fn load(&self) -> Result<Vec<String>> {
        Ok(read_json::<Vec<String>>(&self.path)?.unwrap_or_default())
    }

    fn save(&self, all: &[String]) -> Result<()> {
        write_json_atomic(&self.path, all)
    }
}
