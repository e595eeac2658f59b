//! wbw_progress CLI: 保存済みの学習進捗を確認するための簡易ツール。
use clap::Parser;
use wbw_progress::{
    cli::{Cli, Cmd, matches_filter, render_record, top_by_screenshots},
    domain::{
        lemma::{LemmaRepository, LemmaSet},
        progress::{ProgressBook, ProgressRepository},
        word_key::WordKey,
    },
    infrastructure::{
        config::data_dir,
        storage::{JsonFileLemmaRepo, JsonFileProgressRepo},
    },
    utils::{config::EnvConfig, env::load_env},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env();
    let cli = Cli::parse();
    let dir = cli.dir.unwrap_or_else(|| data_dir(&EnvConfig::init()));

    match cli.cmd {
        Cmd::Lemmas => {
            let lemmas = LemmaSet::from_words(JsonFileLemmaRepo::in_dir(&dir).load()?);
            for lemma in lemmas.as_slice() {
                println!("{lemma}");
            }
            eprintln!("{} lemma(s)", lemmas.len());
        }
        Cmd::Words { known, bookmarked } => {
            let book = ProgressBook::from_records(JsonFileProgressRepo::in_dir(&dir).load()?);
            let mut shown = 0;
            for record in book.iter().filter(|r| matches_filter(r, known, bookmarked)) {
                println!("{}", render_record(record));
                shown += 1;
            }
            eprintln!("{shown} of {} record(s)", book.len());
        }
        Cmd::Top { limit } => {
            let book = ProgressBook::from_records(JsonFileProgressRepo::in_dir(&dir).load()?);
            let records = book.to_vec();
            for record in top_by_screenshots(&records, limit) {
                println!("{}", render_record(record));
            }
        }
        Cmd::Show { word_key } => {
            let key: WordKey = word_key.parse()?;
            let book = ProgressBook::from_records(JsonFileProgressRepo::in_dir(&dir).load()?);
            match book.get(&key) {
                Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
                None => {
                    eprintln!("No progress recorded for {key}");
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
