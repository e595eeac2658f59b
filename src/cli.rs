//! `wbw_progress` CLI の引数定義と表示ヘルパー
//!
//! デーモンを介さず、保存ディレクトリの JSON ドキュメントを直接読みます。

use crate::domain::progress::ProgressRecord;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Word progress inspector (reads progress documents)")]
pub struct Cli {
    /// 進捗ドキュメントのディレクトリ（既定: PROGRESSION_DIR かデータディレクトリ）
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Cmd {
    /// 既知レマ一覧
    Lemmas,
    /// 単語出現の進捗一覧
    Words {
        /// known のものだけ
        #[arg(long)]
        known: bool,
        /// bookmarked のものだけ
        #[arg(long)]
        bookmarked: bool,
    },
    /// スクリーンショット回数の多い順
    Top {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// 1 件表示（例: 2:255:3, 18:10:12-14）
    Show { word_key: String },
}

/// `--known` / `--bookmarked` による絞り込み（両方指定時は AND）
pub fn matches_filter(record: &ProgressRecord, known: bool, bookmarked: bool) -> bool {
    (!known || record.known) && (!bookmarked || record.bookmarked)
}

/// スクリーンショット回数の降順、同数はキー順
pub fn top_by_screenshots(records: &[ProgressRecord], limit: usize) -> Vec<&ProgressRecord> {
    let mut sorted: Vec<&ProgressRecord> = records
        .iter()
        .filter(|r| r.screenshot_count > 0)
        .collect();
    sorted.sort_by(|a, b| {
        b.screenshot_count
            .cmp(&a.screenshot_count)
            .then_with(|| a.key().cmp(&b.key()))
    });
    sorted.truncate(limit);
    sorted
}

/// 1 行表示
pub fn render_record(record: &ProgressRecord) -> String {
    let mut flags = Vec::new();
    if record.known {
        flags.push("known");
    }
    if record.bookmarked {
        flags.push("bookmarked");
    }
    let last = record
        .last_updated
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:<14} {:<20} {:<24} [{}] screenshots={} last={}",
        record.key().to_string(),
        record.arabic,
        record.translation,
        flags.join(","),
        record.screenshot_count,
        last
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progress::DisplayFields;
    use chrono::Utc;

    fn record(key: &str, count: u32, known: bool) -> ProgressRecord {
        let mut r = ProgressRecord::first_screenshot(
            key.parse().unwrap(),
            DisplayFields::new("كلمة", "word", None).unwrap(),
            Utc::now(),
        );
        r.screenshot_count = count;
        r.known = known;
        r
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["wbw_progress", "--dir", "/tmp/p", "words", "--known"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/p")));
        assert_eq!(
            cli.cmd,
            Cmd::Words {
                known: true,
                bookmarked: false
            }
        );

        let cli = Cli::try_parse_from(["wbw_progress", "top"]).unwrap();
        assert_eq!(cli.cmd, Cmd::Top { limit: 10 });
        assert!(Cli::try_parse_from(["wbw_progress"]).is_err());
    }

    #[test]
    fn top_orders_by_count_then_key() {
        let records = vec![
            record("1:1:1", 2, false),
            record("2:1:1", 5, false),
            record("1:1:2", 2, false),
            record("3:1:1", 0, true),
        ];
        let top = top_by_screenshots(&records, 3);
        let keys: Vec<String> = top.iter().map(|r| r.key().to_string()).collect();
        assert_eq!(keys, ["2:1:1", "1:1:1", "1:1:2"]);
    }

    #[test]
    fn filter_and_render() {
        let r = record("2:255:3", 1, true);
        assert!(matches_filter(&r, true, false));
        assert!(!matches_filter(&r, true, true));
        let line = render_record(&r);
        assert!(line.starts_with("2:255:3"));
        assert!(line.contains("[known]"));
        assert!(line.contains("screenshots=1"));
    }
}
