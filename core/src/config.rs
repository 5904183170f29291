//! Client settings read from `GIPHY_`-prefixed environment variables.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::client::DEFAULT_BASE_URL;
use crate::error::ApiError;

/// Settings for building a `GiphyClient`.
///
/// | variable             | field          | default                  |
/// |----------------------|----------------|--------------------------|
/// | `GIPHY_API_KEY`      | `api_key`      | required                 |
/// | `GIPHY_BASE_URL`     | `base_url`     | `https://api.giphy.com`  |
/// | `GIPHY_TIMEOUT_SECS` | `timeout_secs` | none (0 also means none) |
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    pub const ENV_PREFIX: &'static str = "GIPHY_";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Ok(envy::prefixed(Self::ENV_PREFIX).from_env()?)
    }

    /// Like `from_env`, but reads from the given `(name, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(Self::ENV_PREFIX).from_iter(vars)?)
    }

    /// `None` when unset or zero.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = ClientConfig::from_vars(vars(&[
            ("GIPHY_API_KEY", "abc"),
            ("GIPHY_BASE_URL", "http://localhost:3000"),
            ("GIPHY_TIMEOUT_SECS", "7"),
            ("PATH", "/usr/bin"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn defaults_apply() {
        let config = ClientConfig::from_vars(vars(&[("GIPHY_API_KEY", "abc")])).unwrap();
        assert_eq!(config, ClientConfig::new("abc"));
        assert_eq!(config.base_url, "https://api.giphy.com");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn zero_timeout_is_no_timeout() {
        let config = ClientConfig::from_vars(vars(&[
            ("GIPHY_API_KEY", "abc"),
            ("GIPHY_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.timeout_secs, Some(0));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = ClientConfig::from_vars(vars(&[("GIPHY_BASE_URL", "http://x")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn bad_timeout_is_config_error() {
        let err = ClientConfig::from_vars(vars(&[
            ("GIPHY_API_KEY", "abc"),
            ("GIPHY_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn debug_hides_api_key() {
        let out = format!("{:?}", ClientConfig::new("secret"));
        assert!(!out.contains("secret"));
    }
}
