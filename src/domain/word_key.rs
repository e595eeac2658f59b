//! 単語出現の識別キー – ドメイン層
//!
//! `(surah, ayah, startWordIndex, endWordIndex)` の 4 つ組で 1 つの出現を表します。
//! 文字列表現は `"surah:ayah:index"`（単語 1 つ）または
//! `"surah:ayah:start-end"`（複数語の範囲）です。

use crate::error::{ProgressError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 単語出現の識別キー（生成後は不変）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWordKey")]
pub struct WordKey {
    surah: u32,
    ayah: u32,
    start_word_index: u32,
    end_word_index: u32,
}

/// 検証前の素の値（JSON 読み込み用）
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWordKey {
    surah: i64,
    ayah: i64,
    start_word_index: i64,
    end_word_index: i64,
}

impl TryFrom<RawWordKey> for WordKey {
    type Error = ProgressError;

    fn try_from(raw: RawWordKey) -> Result<Self> {
        WordKey::new(raw.surah, raw.ayah, raw.start_word_index, raw.end_word_index)
    }
}

impl WordKey {
    /// 範囲を検証してキーを作成します。
    ///
    /// 各値は 1 以上、かつ `start_word_index <= end_word_index` である必要があります。
    pub fn new(surah: i64, ayah: i64, start_word_index: i64, end_word_index: i64) -> Result<Self> {
        let surah = positive("surah", surah)?;
        let ayah = positive("ayah", ayah)?;
        let start_word_index = positive("startWordIndex", start_word_index)?;
        let end_word_index = positive("endWordIndex", end_word_index)?;
        if end_word_index < start_word_index {
            return Err(ProgressError::InvalidIdentity(format!(
                "endWordIndex {end_word_index} is before startWordIndex {start_word_index}"
            )));
        }
        Ok(Self {
            surah,
            ayah,
            start_word_index,
            end_word_index,
        })
    }

    /// 単語 1 つ分のキー
    pub fn single(surah: i64, ayah: i64, index: i64) -> Result<Self> {
        Self::new(surah, ayah, index, index)
    }

    pub fn surah(&self) -> u32 {
        self.surah
    }

    pub fn ayah(&self) -> u32 {
        self.ayah
    }

    pub fn start_word_index(&self) -> u32 {
        self.start_word_index
    }

    pub fn end_word_index(&self) -> u32 {
        self.end_word_index
    }

    /// 複数語にまたがる範囲かどうか
    pub fn is_range(&self) -> bool {
        self.start_word_index != self.end_word_index
    }
}

fn positive(field: &str, value: i64) -> Result<u32> {
    if value < 1 {
        return Err(ProgressError::InvalidIdentity(format!(
            "{field} must be >= 1 (got {value})"
        )));
    }
    u32::try_from(value)
        .map_err(|_| ProgressError::InvalidIdentity(format!("{field} is out of range ({value})")))
}

fn parse_part(field: &str, part: &str) -> Result<i64> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProgressError::InvalidIdentity(format!(
            "{field} is not a number: {part:?}"
        )));
    }
    part.parse::<i64>()
        .map_err(|_| ProgressError::InvalidIdentity(format!("{field} is out of range: {part}")))
}

impl FromStr for WordKey {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let [surah, ayah, words] = parts.as_slice() else {
            return Err(ProgressError::InvalidIdentity(format!(
                "expected \"surah:ayah:index\" or \"surah:ayah:start-end\", got {s:?}"
            )));
        };

        let surah = parse_part("surah", surah)?;
        let ayah = parse_part("ayah", ayah)?;
        match words.split_once('-') {
            Some((start, end)) => Self::new(
                surah,
                ayah,
                parse_part("startWordIndex", start)?,
                parse_part("endWordIndex", end)?,
            ),
            None => Self::single(surah, ayah, parse_part("index", words)?),
        }
    }
}

impl fmt::Display for WordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_range() {
            write!(
                f,
                "{}:{}:{}-{}",
                self.surah, self.ayah, self.start_word_index, self.end_word_index
            )
        } else {
            write!(f, "{}:{}:{}", self.surah, self.ayah, self.start_word_index)
        }
    }
}

// === Unit tests ==========================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// 短縮形は単語 1 つのキーになる
    #[test]
    fn parses_single_word_form() {
        let key: WordKey = "2:255:3".parse().unwrap();
        assert_eq!(key, WordKey::new(2, 255, 3, 3).unwrap());
        assert!(!key.is_range());
        assert_eq!(key.to_string(), "2:255:3");
    }

    /// 範囲形式は開始・終了を保持し、同じ形式で書き戻される
    #[test]
    fn parses_range_form() {
        let key: WordKey = "18:10:12-14".parse().unwrap();
        assert_eq!(key.start_word_index(), 12);
        assert_eq!(key.end_word_index(), 14);
        assert_eq!(key.to_string(), "18:10:12-14");
    }

    /// 2 桁以上の値でも曖昧にならない
    #[test]
    fn multi_digit_parts_are_not_ambiguous() {
        let a: WordKey = "1:12:3".parse().unwrap();
        let b: WordKey = "11:2:3".parse().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "2:255", "2:255:3:4", "a:1:1", "1::1", "1:1:", "1:1:-3", "1:1:3-", "+1:1:1"] {
            let err = bad.parse::<WordKey>().unwrap_err();
            assert!(
                matches!(err, ProgressError::InvalidIdentity(_)),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(WordKey::new(0, 1, 1, 1).is_err());
        assert!(WordKey::new(1, 0, 1, 1).is_err());
        assert!(WordKey::new(1, 1, 0, 1).is_err());
        assert!(WordKey::new(1, 1, 3, 2).is_err());
        assert!(WordKey::new(1, 1, 1, i64::from(u32::MAX) + 1).is_err());
        assert!("1:1:3-2".parse::<WordKey>().is_err());
    }

    /// JSON 読み込み時にも検証が走る
    #[test]
    fn deserialization_validates() {
        let ok: WordKey = serde_json::from_str(
            r#"{"surah":1,"ayah":2,"startWordIndex":3,"endWordIndex":4}"#,
        )
        .unwrap();
        assert_eq!(ok.to_string(), "1:2:3-4");

        let bad = serde_json::from_str::<WordKey>(
            r#"{"surah":1,"ayah":2,"startWordIndex":5,"endWordIndex":4}"#,
        );
        assert!(bad.is_err());
    }
}
