pub mod json_file;
pub mod lemma_repo;
pub mod progress_repo;

pub use lemma_repo::{JsonFileLemmaRepo, LEMMA_FILE_NAME};
pub use progress_repo::{JsonFileProgressRepo, PROGRESS_FILE_NAME};
