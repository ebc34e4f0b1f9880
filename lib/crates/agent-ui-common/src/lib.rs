pub mod config;
pub mod types;

pub use config::{DEFAULT_HOST, DEFAULT_PORT, ProvisionPolicy, ServerConfig};
pub use types::*;
