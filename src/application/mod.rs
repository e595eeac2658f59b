pub mod lemma_store;
pub mod progress_store;
pub mod service_container;
pub mod test_helpers;

pub use lemma_store::LemmaStore;
pub use progress_store::ProgressStore;
pub use service_container::ServiceContainer;
