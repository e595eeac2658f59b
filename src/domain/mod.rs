pub mod lemma;
pub mod progress;
pub mod word_key;
