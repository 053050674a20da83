//! Credentials held behind `secrecy`
//!
//! The ClickUp token and the database password are [`SecretString`]s: redacted
//! in `Debug`, zeroed on drop, and read only through `expose_secret()`.
//!
//! ```rust
//! use ouvidoria_sync::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("pk_123".to_string());
//! assert_eq!(token.expose_secret().as_str(), "pk_123");
//! assert!(!format!("{token:?}").contains("pk_123"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Credential text; only reachable through [`SecretString`]
#[derive(Clone, Zeroize, Serialize, Deserialize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank values count as empty
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

pub type SecretString = Secret<SecretValue>;

pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_blank_secret_is_empty() {
        assert!(secret_string("  ".to_string()).expose_secret().is_empty());
        assert!(!secret_string("pk".to_string()).expose_secret().is_empty());
    }

    #[test]
    fn test_config_debug_hides_token() {
        let token = secret_string("pk_live_token".to_string());
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("pk_live_token"));
    }

    #[test]
    fn test_toml_round_trip_keeps_value() {
        #[derive(Serialize, Deserialize)]
        struct Sink {
            password: SecretString,
        }

        let sink: Sink = toml::from_str(r#"password = "s3cret""#).unwrap();
        assert_eq!(sink.password.expose_secret(), "s3cret");

        let rendered = toml::to_string(&sink).unwrap();
        assert!(rendered.contains("s3cret"));
    }
}
