use wbw_progress::{
    domain::progress::{ProgressBook, ProgressRepository},
    infrastructure::{config::data_dir, storage::JsonFileProgressRepo},
    utils::{config::EnvConfig, env::load_env},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env();
    let dir = std::env::args()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| data_dir(&EnvConfig::init()));

    let repo = JsonFileProgressRepo::in_dir(&dir);
    let book = ProgressBook::from_records(repo.load()?);
    repo.save(&book.to_vec())?; // 旧形式（キー → フラグ）も配列形式で書き直す
    println!("✅ word progress migrated ({} entries) → {}", book.len(), repo.path().display());
    Ok(())
}
