pub mod config;
pub mod error;
pub mod types;

pub use config::AwabConfig;
pub use error::{AwabError, Result};
pub use types::*;
