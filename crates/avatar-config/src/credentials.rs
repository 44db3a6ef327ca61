use secrecy::{ExposeSecret, SecretString};

use crate::Config;

/// Placeholder value written by deployment templates in place of a real key
const PLACEHOLDER: &str = "-";

/// Whether a configured secret holds a usable value
///
/// Unset, blank and placeholder (`-`) secrets all count as absent.
pub fn has_secret(secret: Option<&SecretString>) -> bool {
    secret.is_some_and(|s| {
        let value = s.expose_secret().trim();
        !value.is_empty() && value != PLACEHOLDER
    })
}

impl Config {
    /// Whether both the completion and speech credentials are present
    pub fn credentials_ready(&self) -> bool {
        has_secret(self.llm.api_key.as_ref()) && has_secret(self.tts.api_key.as_ref())
    }
}
