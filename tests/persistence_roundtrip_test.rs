use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;
use wbw_progress::application::{LemmaStore, ProgressStore, ServiceContainer};
use wbw_progress::domain::progress::{DisplayFields, FlagUpdates, ProgressRecord};
use wbw_progress::domain::word_key::WordKey;
use wbw_progress::infrastructure::storage::{JsonFileLemmaRepo, JsonFileProgressRepo};

fn key(s: &str) -> WordKey {
    s.parse().unwrap()
}

fn as_set(records: Vec<ProgressRecord>) -> HashSet<String> {
    records
        .into_iter()
        .map(|r| serde_json::to_string(&r).unwrap())
        .collect()
}

/// 保存 → 再読み込みでフィールド単位に同じレコード集合になる
#[test]
fn populated_store_round_trips() {
    let tmp = TempDir::new().unwrap();
    let container = ServiceContainer::open(tmp.path());
    let progress = &container.progress;

    progress
        .record_screenshot(
            key("2:255:3"),
            DisplayFields::new("الله", "Allah", Some("أ ل ه".into())).unwrap(),
        )
        .unwrap();
    progress
        .record_screenshot(
            key("18:10:12-14"),
            DisplayFields::new("رَبَّنَا آتِنَا مِن", "Our Lord, grant us from", None).unwrap(),
        )
        .unwrap();
    progress.upsert_flags(key("1:1:1"), FlagUpdates::known(true)).unwrap();
    progress.upsert_flags(key("2:255:3"), FlagUpdates::bookmarked(true)).unwrap();
    container
        .lemmas
        .replace_all(["كتب", "قال", "أمن"].map(String::from))
        .unwrap();

    let reopened = ServiceContainer::open(tmp.path());
    assert_eq!(as_set(reopened.progress.snapshot()), as_set(progress.snapshot()));
    assert_eq!(reopened.lemmas.all(), container.lemmas.all());
}

/// 壊れたドキュメントは空として開始し、次の書き込みで健全な形に戻る
#[test]
fn corrupt_document_starts_empty_and_heals_on_write() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("word-knowledge.json");
    fs::write(&path, r#"{ "words": [ { "arabic": "#).unwrap();

    let store = ProgressStore::open(JsonFileProgressRepo::in_dir(tmp.path()));
    assert!(store.is_empty());

    store.upsert_flags(key("1:1:1"), FlagUpdates::known(true)).unwrap();
    let reopened = ProgressStore::open(JsonFileProgressRepo::in_dir(tmp.path()));
    assert_eq!(reopened.len(), 1);
}

/// 書き込み途中でクラッシュして一時ファイルが残っても、本体は読める
#[test]
fn leftover_temp_file_does_not_affect_load() {
    let tmp = TempDir::new().unwrap();
    {
        let store = LemmaStore::open(JsonFileLemmaRepo::in_dir(tmp.path()));
        store.replace_all(vec!["قال".to_string()]).unwrap();
    }
    fs::write(tmp.path().join(".tmpAbC123"), "[\"half").unwrap();

    let store = LemmaStore::open(JsonFileLemmaRepo::in_dir(tmp.path()));
    assert_eq!(store.all(), vec!["قال".to_string()]);
}

/// ディレクトリが無くても最初の書き込みで作られる
#[test]
fn missing_directory_is_created_on_first_write() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("progression").join("nested");
    let container = ServiceContainer::open(&dir);
    assert!(!dir.exists());

    container.lemmas.replace_all(vec!["x".to_string()]).unwrap();
    assert!(dir.join("known-lemmas.json").exists());
}

/// 旧形式（キー → フラグ）を読み込み、次の保存で配列形式になる
#[test]
fn legacy_keyed_document_is_rewritten_as_array() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("word-knowledge.json");
    fs::write(
        &path,
        r#"{ "2:255:3": { "known": true }, "1:1:1": { "known": false, "bookmarked": false } }"#,
    )
    .unwrap();

    let store = ProgressStore::open(JsonFileProgressRepo::in_dir(tmp.path()));
    assert_eq!(store.len(), 1);
    assert!(store.get(&key("2:255:3")).unwrap().known);

    store.upsert_flags(key("1:1:2"), FlagUpdates::bookmarked(true)).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["words"].as_array().map(Vec::len), Some(2));
}
