//! Environment-driven settings.
//!
//! | Variable              | Meaning                                   |
//! |-----------------------|-------------------------------------------|
//! | `API_KEY`             | Gemini API key (also `GEMINI_API_KEY`, `GOOGLE_API_KEY`) |
//! | `PRAISE_MODEL`        | Model identifier                          |
//! | `PRAISE_BASE_URL`     | API host, for proxies and tests           |
//! | `PRAISE_TIMEOUT_SECS` | HTTP timeout; none when unset             |

use crate::backends::google::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Variables searched for the API key, in order.
pub const API_KEY_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` when no key variable is set
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    /// Reads the process environment.
    ///
    /// A missing API key is logged as an error but not treated as one: calls
    /// will then fail at the remote end.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = API_KEY_VARS.iter().find_map(|key| non_empty(key));
        if api_key.is_none() {
            log::error!("API_KEY environment variable not set.");
        }

        let timeout_seconds = non_empty("PRAISE_TIMEOUT_SECS").and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(e) => {
                    log::warn!("Ignoring PRAISE_TIMEOUT_SECS={:?}: {}", raw, e);
                    None
                }
            }
        });

        let defaults = Self::default();
        Self {
            api_key,
            model: non_empty("PRAISE_MODEL").unwrap_or(defaults.model),
            base_url: non_empty("PRAISE_BASE_URL").unwrap_or(defaults.base_url),
            timeout_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_api_key_fallback_order() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "google"),
            ("GEMINI_API_KEY", "gemini"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("gemini"));

        let config = Config::from_lookup(lookup(&[("API_KEY", "primary"), ("GOOGLE_API_KEY", "g")]));
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let config = Config::from_lookup(lookup(&[("API_KEY", "  "), ("GOOGLE_API_KEY", "g")]));
        assert_eq!(config.api_key.as_deref(), Some("g"));
    }

    #[test]
    fn test_overrides_and_bad_timeout() {
        let config = Config::from_lookup(lookup(&[
            ("PRAISE_MODEL", "gemini-test"),
            ("PRAISE_BASE_URL", "http://localhost:9"),
            ("PRAISE_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.base_url, "http://localhost:9");
        assert_eq!(config.timeout_seconds, None);

        let config = Config::from_lookup(lookup(&[("PRAISE_TIMEOUT_SECS", "30")]));
        assert_eq!(config.timeout_seconds, Some(30));
    }
}
