//! Shared domain types and configuration for pressclip.
//!
//! Holds the env-driven application config, the YAML client catalog,
//! and the pure text helpers (accent stripping, keyword parsing, boolean
//! query building, lenient date parsing) the fetch pipeline builds on.

mod app_config;
pub mod clients;
mod config;
pub mod dates;
pub mod normalize;
pub mod query;

use thiserror::Error;

pub use app_config::AppConfig;
pub use clients::{load_clients, ClientConfig, ClientsFile};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read clients file {path}: {source}")]
    ClientsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse clients file: {0}")]
    ClientsFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
