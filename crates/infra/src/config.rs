//! Configuration loading and representation.
//!
//! Everything is read from `WEIDE_*` environment variables. `from_env` is
//! lenient: a malformed value is logged and replaced by its default. Use
//! `try_from_lookup` when a bad value should be an error instead.

use thiserror::Error;

use weide_inventory::WarningPolicy;

pub const ENV_USER: &str = "WEIDE_USER";
pub const ENV_SEED: &str = "WEIDE_SEED";
pub const ENV_RNG_SEED: &str = "WEIDE_RNG_SEED";
pub const ENV_LOW_STOCK_THRESHOLD: &str = "WEIDE_LOW_STOCK_THRESHOLD";
pub const ENV_MIN_STOCK_LEVEL: &str = "WEIDE_MIN_STOCK_LEVEL";
pub const ENV_EXPIRY_DAYS: &str = "WEIDE_EXPIRY_DAYS";

pub const DEFAULT_USER: &str = "System";
pub const DEFAULT_MIN_STOCK_LEVEL: u32 = 10;
pub const MAX_EXPIRY_DAYS: u32 = 3650;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name written into ledger and activity entries.
    pub user: String,
    /// Generate the sample dataset at startup.
    pub seed: bool,
    /// Fixed RNG seed for a reproducible dataset.
    pub rng_seed: Option<u64>,
    /// Thresholds for the startup warning snapshot.
    pub warning_policy: WarningPolicy,
    /// Rows below this level are flagged as low stock in inventory views.
    pub min_stock_level: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            seed: true,
            rng_seed: None,
            warning_policy: WarningPolicy::default(),
            min_stock_level: DEFAULT_MIN_STOCK_LEVEL,
        }
    }
}

impl StoreConfig {
    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lenient load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(user) = lenient(&lookup, ENV_USER, parse_user) {
            config.user = user;
        }
        if let Some(seed) = lenient(&lookup, ENV_SEED, parse_bool) {
            config.seed = seed;
        }
        if let Some(rng_seed) = lenient(&lookup, ENV_RNG_SEED, parse_num::<u64>) {
            config.rng_seed = Some(rng_seed);
        }
        if let Some(threshold) = lenient(&lookup, ENV_LOW_STOCK_THRESHOLD, parse_num::<u32>) {
            config.warning_policy.low_stock_threshold = threshold;
        }
        if let Some(days) = lenient(&lookup, ENV_EXPIRY_DAYS, parse_expiry_days) {
            config.warning_policy.expiry_after_days = days;
        }
        if let Some(level) = lenient(&lookup, ENV_MIN_STOCK_LEVEL, parse_num::<u32>) {
            config.min_stock_level = level;
        }

        config
    }

    /// Strict load: the first malformed value is returned as an error.
    pub fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_USER) {
            config.user = parse_user(ENV_USER, raw)?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            config.seed = parse_bool(ENV_SEED, raw)?;
        }
        if let Some(raw) = lookup(ENV_RNG_SEED) {
            config.rng_seed = Some(parse_num(ENV_RNG_SEED, raw)?);
        }
        if let Some(raw) = lookup(ENV_LOW_STOCK_THRESHOLD) {
            config.warning_policy.low_stock_threshold = parse_num(ENV_LOW_STOCK_THRESHOLD, raw)?;
        }
        if let Some(raw) = lookup(ENV_EXPIRY_DAYS) {
            config.warning_policy.expiry_after_days = parse_expiry_days(ENV_EXPIRY_DAYS, raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_STOCK_LEVEL) {
            config.min_stock_level = parse_num(ENV_MIN_STOCK_LEVEL, raw)?;
        }

        Ok(config)
    }
}

fn lenient<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    parse: impl FnOnce(&'static str, String) -> Result<T, ConfigError>,
) -> Option<T> {
    let raw = lookup(key)?;
    match parse(key, raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring bad configuration value; using default");
            None
        }
    }
}

fn invalid(key: &'static str, value: String, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value,
        reason: reason.into(),
    }
}

fn parse_user(key: &'static str, raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(key, raw, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

fn parse_bool(key: &'static str, raw: String) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw, "expected a boolean")),
    }
}

fn parse_num<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(key, raw.clone(), e.to_string()))
}

fn parse_expiry_days(key: &'static str, raw: String) -> Result<u32, ConfigError> {
    let days: u32 = parse_num(key, raw.clone())?;
    if days > MAX_EXPIRY_DAYS {
        return Err(invalid(key, raw, format!("must be at most {MAX_EXPIRY_DAYS}")));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(StoreConfig::from_lookup(lookup(&[])), StoreConfig::default());
        assert_eq!(StoreConfig::try_from_lookup(lookup(&[])).unwrap(), StoreConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = StoreConfig::try_from_lookup(lookup(&[
            (ENV_USER, " Anna "),
            (ENV_SEED, "off"),
            (ENV_RNG_SEED, "42"),
            (ENV_LOW_STOCK_THRESHOLD, "5"),
            (ENV_EXPIRY_DAYS, "14"),
            (ENV_MIN_STOCK_LEVEL, "3"),
        ]))
        .unwrap();

        assert_eq!(config.user, "Anna");
        assert!(!config.seed);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.warning_policy.low_stock_threshold, 5);
        assert_eq!(config.warning_policy.expiry_after_days, 14);
        assert_eq!(config.min_stock_level, 3);
    }

    #[test]
    fn lenient_load_falls_back_per_key() {
        let config = StoreConfig::from_lookup(lookup(&[
            (ENV_MIN_STOCK_LEVEL, "lots"),
            (ENV_RNG_SEED, "7"),
        ]));
        assert_eq!(config.min_stock_level, DEFAULT_MIN_STOCK_LEVEL);
        assert_eq!(config.rng_seed, Some(7));
    }

    #[test]
    fn strict_load_reports_key() {
        let err = StoreConfig::try_from_lookup(lookup(&[(ENV_SEED, "maybe")])).unwrap_err();
        let ConfigError::Invalid { key, .. } = err;
        assert_eq!(key, ENV_SEED);
    }

    #[test]
    fn expiry_days_out_of_range() {
        for raw in ["100000000", "-5", "3651"] {
            let err = StoreConfig::try_from_lookup(lookup(&[(ENV_EXPIRY_DAYS, raw)])).unwrap_err();
            let ConfigError::Invalid { key, .. } = err;
            assert_eq!(key, ENV_EXPIRY_DAYS);

            let config = StoreConfig::from_lookup(lookup(&[(ENV_EXPIRY_DAYS, raw)]));
            assert_eq!(config.warning_policy, WarningPolicy::default());
        }

        let config = StoreConfig::try_from_lookup(lookup(&[(ENV_EXPIRY_DAYS, "3650")])).unwrap();
        assert_eq!(config.warning_policy.expiry_after_days, MAX_EXPIRY_DAYS);
    }
}
