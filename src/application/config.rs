// Configuration for calls to the solving service

use crate::error::{AdapterError, Result};
use std::fmt;
use std::time::Duration;

/// Timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Clone)]
pub struct ClientConfig {
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self::default().with_token(token)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured token; absent and empty tokens are both missing.
    pub fn token(&self) -> Result<&str> {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AdapterError::MissingCredential),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_one_second() {
        assert_eq!(ClientConfig::default().timeout, Duration::from_secs(1));
    }

    #[test]
    fn empty_token_is_missing() {
        assert!(matches!(
            ClientConfig::new("").token(),
            Err(AdapterError::MissingCredential)
        ));
        assert!(ClientConfig::default().token().is_err());
        assert_eq!(ClientConfig::new("abc").token().unwrap(), "abc");
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", ClientConfig::new("secret-token"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
