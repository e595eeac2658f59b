//! `.env` の読み込み

use std::path::PathBuf;

/// `WBW_PROGRESS_ENV_PATH` が指すファイル、なければカレントの `.env` を読み込みます。
///
/// 読み込めたファイルのパスを返します。見つからない・読めない場合は `None`
/// （設定はプロセスの環境変数だけで行う）。`EnvConfig` の初期化より前に呼ぶこと。
pub fn load_env() -> Option<PathBuf> {
    match std::env::var_os("WBW_PROGRESS_ENV_PATH") {
        Some(path) => {
            let path = PathBuf::from(path);
            dotenvy::from_path(&path).ok().map(|_| path)
        }
        None => dotenvy::dotenv().ok(),
    }
}
