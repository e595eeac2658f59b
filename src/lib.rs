pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod http;
pub mod infrastructure;
pub mod observability;
pub mod utils {
    pub mod config;
    pub mod env;
}

pub use application::ServiceContainer;
pub use error::{ProgressError, Result};
