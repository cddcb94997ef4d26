use anyhow::{Context, Result};

use crate::extraction::language::DEFAULT_MIN_MATCHES;
use crate::templates::TemplateId;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub language_min_matches: usize,
    pub default_template: TemplateId,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            language_min_matches: DEFAULT_MIN_MATCHES,
            default_template: TemplateId::Modern,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let default_template = match lookup("DEFAULT_TEMPLATE") {
            Some(raw) => TemplateId::from_id(&raw)
                .with_context(|| format!("DEFAULT_TEMPLATE '{raw}' is not a registered template"))?,
            None => defaults.default_template,
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            language_min_matches: parse_or(
                &lookup,
                "LANGUAGE_MIN_MATCHES",
                defaults.language_min_matches,
            )
            .context("LANGUAGE_MIN_MATCHES must be a non-negative integer")?,
            default_template,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, 10_485_760);
        assert_eq!(config.language_min_matches, 2);
        assert_eq!(config.default_template, TemplateId::Modern);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("LANGUAGE_MIN_MATCHES", "3"),
            ("DEFAULT_TEMPLATE", "Classic"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.language_min_matches, 3);
        assert_eq!(config.default_template, TemplateId::Classic);
    }

    #[test]
    fn test_invalid_values_fail_with_context() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = Config::from_lookup(lookup(&[("DEFAULT_TEMPLATE", "fancy")])).unwrap_err();
        assert!(err.to_string().contains("fancy"));
    }
}
