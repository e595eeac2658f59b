use crate::utils::config::EnvConfig;
use directories::ProjectDirs;
use std::path::PathBuf;

/// 進捗ドキュメントを置くディレクトリ
///
/// `PROGRESSION_DIR` が優先。未設定ならプラットフォームのデータディレクトリ。
/// ディレクトリの作成は最初の書き込み時に行う。
pub fn data_dir(config: &EnvConfig) -> PathBuf {
    if let Some(dir) = &config.progression_dir {
        return PathBuf::from(dir);
    }

    match ProjectDirs::from("com", "user", "wbw_progress") {
        Some(proj) => proj.data_local_dir().to_path_buf(),
        None => PathBuf::from("progression"),
    }
}
