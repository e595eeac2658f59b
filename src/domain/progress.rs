//! 単語出現ごとの学習進捗エンティティとリポジトリ抽象 – ドメイン層
//!
//! 1 つの `ProgressRecord` がフラグ（known / bookmarked）とスクリーンショット統計の
//! 両方を持ちます。`ProgressBook::upsert_flags` はフラグだけを、
//! `ProgressBook::record_screenshot` は統計と表示テキストだけを更新します。

use crate::domain::word_key::WordKey;
use crate::error::{ProgressError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 1 出現分の進捗
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub arabic: String,
    #[serde(default)]
    pub translation: String,
    /// 複数語の範囲や不明な場合は `null`
    #[serde(default)]
    pub root: Option<String>,
    #[serde(flatten)]
    key: WordKey,
    #[serde(default)]
    pub known: bool,
    #[serde(default)]
    pub bookmarked: bool,
    #[serde(default, alias = "numOfScreenshots")]
    pub screenshot_count: u32,
    #[serde(
        default,
        alias = "dateLastAdded",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// フラグ更新用の既定レコード（全フラグ false、表示テキストなし）
    pub fn empty(key: WordKey) -> Self {
        Self {
            arabic: String::new(),
            translation: String::new(),
            root: None,
            key,
            known: false,
            bookmarked: false,
            screenshot_count: 0,
            last_updated: None,
        }
    }

    /// 初回スクリーンショットで作られるレコード
    pub fn first_screenshot(key: WordKey, display: DisplayFields, now: DateTime<Utc>) -> Self {
        Self {
            arabic: display.arabic,
            translation: display.translation,
            root: display.root,
            key,
            known: false,
            bookmarked: false,
            screenshot_count: 1,
            last_updated: Some(now),
        }
    }

    pub fn key(&self) -> WordKey {
        self.key
    }

    /// 存在理由がない（フラグなし・スクショ履歴なし）レコードか
    pub fn is_vacant(&self) -> bool {
        !self.known && !self.bookmarked && self.screenshot_count == 0
    }

    fn apply_flags(&mut self, updates: FlagUpdates) {
        if let Some(known) = updates.known {
            self.known = known;
        }
        if let Some(bookmarked) = updates.bookmarked {
            self.bookmarked = bookmarked;
        }
    }

    fn bump_screenshot(&mut self, display: DisplayFields, now: DateTime<Utc>) {
        self.screenshot_count = self.screenshot_count.saturating_add(1);
        self.last_updated = Some(match self.last_updated {
            Some(prev) if prev > now => prev,
            _ => now,
        });

        // 表示テキストは最初に書かれたものを保持する（空のときだけ埋める）
        if self.arabic.is_empty() && self.translation.is_empty() {
            self.arabic = display.arabic;
            self.translation = display.translation;
            if self.root.is_none() {
                self.root = display.root;
            }
        }
    }

    /// 読み込み時に同じキーの重複行を 1 つへ畳み込む
    fn absorb(&mut self, other: ProgressRecord) {
        self.known |= other.known;
        self.bookmarked |= other.bookmarked;
        self.screenshot_count = self.screenshot_count.saturating_add(other.screenshot_count);
        self.last_updated = self.last_updated.max(other.last_updated);
        if self.arabic.is_empty() && self.translation.is_empty() {
            self.arabic = other.arabic;
            self.translation = other.translation;
        }
        if self.root.is_none() {
            self.root = other.root;
        }
    }
}

/// スクリーンショット時に渡される表示用テキスト（識別には使わない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    arabic: String,
    translation: String,
    root: Option<String>,
}

impl DisplayFields {
    /// `arabic` と `translation` は空でないこと。空の `root` は「なし」とみなす。
    pub fn new(
        arabic: impl Into<String>,
        translation: impl Into<String>,
        root: Option<String>,
    ) -> Result<Self> {
        let arabic = arabic.into();
        let translation = translation.into();
        if arabic.trim().is_empty() {
            return Err(ProgressError::InvalidInput("arabic must not be empty".into()));
        }
        if translation.trim().is_empty() {
            return Err(ProgressError::InvalidInput(
                "translation must not be empty".into(),
            ));
        }
        let root = root.filter(|r| !r.trim().is_empty());
        Ok(Self {
            arabic,
            translation,
            root,
        })
    }

    pub fn arabic(&self) -> &str {
        &self.arabic
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }
}

/// フラグの部分更新（指定されたフィールドだけ上書き）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagUpdates {
    pub known: Option<bool>,
    pub bookmarked: Option<bool>,
}

impl FlagUpdates {
    pub fn known(value: bool) -> Self {
        Self {
            known: Some(value),
            bookmarked: None,
        }
    }

    pub fn bookmarked(value: bool) -> Self {
        Self {
            known: None,
            bookmarked: Some(value),
        }
    }
}

impl TryFrom<&Value> for FlagUpdates {
    type Error = ProgressError;

    /// `{ "known"?: bool, "bookmarked"?: bool }` 以外は `InvalidUpdate`
    fn try_from(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ProgressError::InvalidUpdate(
                "updates must be an object".into(),
            ));
        };

        let mut updates = FlagUpdates::default();
        for (name, flag) in map {
            let Value::Bool(flag) = flag else {
                return Err(ProgressError::InvalidUpdate(format!(
                    "{name} must be a boolean"
                )));
            };
            match name.as_str() {
                "known" => updates.known = Some(*flag),
                "bookmarked" => updates.bookmarked = Some(*flag),
                other => {
                    return Err(ProgressError::InvalidUpdate(format!(
                        "unknown flag: {other}"
                    )));
                }
            }
        }
        Ok(updates)
    }
}

/// キー → 進捗レコードのコレクション（永続化は呼び出し側の責任）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressBook {
    records: BTreeMap<WordKey, ProgressRecord>,
}

impl ProgressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込んだ行からコレクションを作成します。
    ///
    /// 同じキーの行は 1 つへ畳み込み、存在理由のないレコードは捨てます。
    pub fn from_records(records: impl IntoIterator<Item = ProgressRecord>) -> Self {
        let mut map: BTreeMap<WordKey, ProgressRecord> = BTreeMap::new();
        for record in records {
            match map.get_mut(&record.key) {
                Some(existing) => existing.absorb(record),
                None => {
                    map.insert(record.key, record);
                }
            }
        }
        map.retain(|_, r| !r.is_vacant());
        Self { records: map }
    }

    /// フラグを浅くマージします。
    ///
    /// 結果が全フラグ false かつスクショ履歴なしならレコードを削除して `None`。
    pub fn upsert_flags(&mut self, key: WordKey, updates: FlagUpdates) -> Option<ProgressRecord> {
        let mut record = self
            .records
            .remove(&key)
            .unwrap_or_else(|| ProgressRecord::empty(key));
        record.apply_flags(updates);

        if record.is_vacant() {
            return None;
        }
        self.records.insert(key, record.clone());
        Some(record)
    }

    /// スクリーンショットを 1 回記録します（見つかれば加算、なければ作成）。
    pub fn record_screenshot(
        &mut self,
        key: WordKey,
        display: DisplayFields,
        now: DateTime<Utc>,
    ) -> ProgressRecord {
        match self.records.get_mut(&key) {
            Some(existing) => {
                existing.bump_screenshot(display, now);
                existing.clone()
            }
            None => {
                let record = ProgressRecord::first_screenshot(key, display, now);
                self.records.insert(key, record.clone());
                record
            }
        }
    }

    pub fn get(&self, key: &WordKey) -> Option<&ProgressRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// キー順に並んだレコード
    pub fn iter(&self) -> impl Iterator<Item = &ProgressRecord> {
        self.records.values()
    }

    pub fn to_vec(&self) -> Vec<ProgressRecord> {
        self.records.values().cloned().collect()
    }
}

/// 進捗永続化 I/F
pub trait ProgressRepository: Send + Sync {
    /// ドキュメントが存在しない場合は空を返す
    fn load(&self) -> Result<Vec<ProgressRecord>>;
    /// ドキュメント全体を書き直す
    fn save(&self, all: &[ProgressRecord]) -> Result<()>;
}
