pub mod config;
pub mod error;
pub mod factory;
pub mod providers;
pub mod ranker;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::ProviderError;
pub use factory::*;
pub use ranker::ApiReranker;
pub use traits::*;
pub use types::*;
