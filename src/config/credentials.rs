//! Credential resolution for the remote model.
//!
//! The API key is the only secret the application handles; it is wrapped so
//! it never reaches logs through `Debug` or `Display`.

use super::loader::ConfigError;
use super::types::GeminiConfig;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

#[derive(Debug, Clone)]
pub enum CredentialStatus {
    Configured(SecureString),
    Unconfigured { reason: String },
}

impl GeminiConfig {
    /// Resolve the API key: explicit `api_key` first, then the environment.
    ///
    /// Not cached, so an exported variable is picked up on the next lookup.
    pub fn resolve_credential(&self) -> CredentialStatus {
        self.resolve_credential_with(|name| std::env::var(name).ok())
    }

    /// Same as `resolve_credential` with an injectable environment lookup.
    pub fn resolve_credential_with<F>(&self, lookup: F) -> CredentialStatus
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = self.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return CredentialStatus::Configured(SecureString::new(key.to_string()));
            }
        }

        match lookup(&self.api_key_env).map(|v| v.trim().to_string()) {
            Some(key) if !key.is_empty() => CredentialStatus::Configured(SecureString::new(key)),
            _ => CredentialStatus::Unconfigured {
                reason: format!("neither gemini.api_key nor ${} is set", self.api_key_env),
            },
        }
    }

    /// The API key, or `ConfigError::MissingApiKey`.
    pub fn require_api_key(&self) -> Result<SecureString, ConfigError> {
        match self.resolve_credential() {
            CredentialStatus::Configured(key) => Ok(key),
            CredentialStatus::Unconfigured { .. } => Err(ConfigError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            }),
        }
    }
}
