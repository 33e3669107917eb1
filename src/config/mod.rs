//! Configuration: TOML file under the platform config dir, defaults otherwise.

mod credentials;
mod loader;
mod types;

pub use credentials::{CredentialStatus, SecureString};
pub use loader::ConfigError;
pub use types::{Config, GeminiConfig, StorageConfig, UiConfig};
