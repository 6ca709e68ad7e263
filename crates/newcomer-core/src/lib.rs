pub mod app_config;
pub mod config;
pub mod directory;
pub mod session;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use directory::{Location, SavedLocation, Service};
pub use session::{SaveAction, Session, SessionError, User};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
