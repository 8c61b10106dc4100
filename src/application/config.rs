/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Layered configuration for the gateway connection.
//!
//! Each [`ConfigKey`] is resolved from, in order: explicit overrides, the
//! environment (`TXTRADER_<KEY>`), the first line of `/etc/txtrader/TXTRADER_<KEY>`,
//! and finally a built-in default. The result is frozen into a [`Config`].

use crate::constants::{
    DEFAULT_HOST, DEFAULT_HTTP_PORT, DEFAULT_MODE, DEFAULT_PROTOCOL, ENV_PREFIX,
    RTX_ACCOUNT_VALUE_FIELD, SECRET_DIR, TWS_ACCOUNT_VALUE_FIELD,
};
use crate::error::AppError;
use crate::utils::config::{non_empty, read_first_line};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Configuration parameters understood by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    /// `http` or `https`
    Protocol,
    /// Gateway host name
    Host,
    /// Gateway JSON API port
    HttpPort,
    /// Basic auth user
    Username,
    /// Basic auth password
    Password,
    /// Default trading account
    ApiAccount,
    /// Default order route
    Route,
    /// Gateway flavour, see [`GatewayMode`]
    Mode,
    /// Request timeout in seconds (optional)
    Timeout,
}

impl ConfigKey {
    /// Every key, in resolution order used by [`Config::resolve`]
    pub const ALL: [ConfigKey; 9] = [
        ConfigKey::Protocol,
        ConfigKey::Host,
        ConfigKey::HttpPort,
        ConfigKey::Username,
        ConfigKey::Password,
        ConfigKey::ApiAccount,
        ConfigKey::Route,
        ConfigKey::Mode,
        ConfigKey::Timeout,
    ];

    /// Key name without namespace, e.g. `HTTP_PORT`
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            ConfigKey::Protocol => "PROTOCOL",
            ConfigKey::Host => "HOST",
            ConfigKey::HttpPort => "HTTP_PORT",
            ConfigKey::Username => "USERNAME",
            ConfigKey::Password => "PASSWORD",
            ConfigKey::ApiAccount => "API_ACCOUNT",
            ConfigKey::Route => "ROUTE",
            ConfigKey::Mode => "MODE",
            ConfigKey::Timeout => "TIMEOUT",
        }
    }

    /// Namespaced name used for environment variables and secret files
    #[must_use]
    pub fn env_name(&self) -> String {
        format!("{ENV_PREFIX}{}", self.suffix())
    }

    /// Built-in fallback value, if the key has one
    #[must_use]
    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            ConfigKey::Protocol => Some(DEFAULT_PROTOCOL),
            ConfigKey::Host => Some(DEFAULT_HOST),
            ConfigKey::HttpPort => Some(DEFAULT_HTTP_PORT),
            ConfigKey::Mode => Some(DEFAULT_MODE),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.env_name())
    }
}

impl FromStr for ConfigKey {
    type Err = AppError;

    /// Accepts both the bare (`HOST`) and the namespaced (`TXTRADER_HOST`) form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let bare = upper.strip_prefix(ENV_PREFIX).unwrap_or(&upper);
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.suffix() == bare)
            .ok_or_else(|| AppError::Value(format!("unknown config key: {s:?}")))
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Supplied explicitly by the caller
    Override,
    /// Environment variable
    Environment,
    /// Secret file in the secret directory
    SecretFile,
    /// Built-in default
    Default,
}

/// Resolves configuration keys through overrides, environment, secret files and defaults
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    overrides: HashMap<ConfigKey, String>,
    environment: HashMap<String, String>,
    secret_dir: PathBuf,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Creates a resolver with no overrides, an empty environment and the standard secret directory
    #[must_use]
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
            environment: HashMap::new(),
            secret_dir: PathBuf::from(SECRET_DIR),
        }
    }

    /// Creates a resolver over the process environment
    ///
    /// A `.env` file in the working directory is loaded first, then the
    /// environment is snapshotted; later changes to the process environment
    /// are not seen by this resolver.
    #[must_use]
    pub fn from_env() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }
        Self::new().with_environment(env::vars())
    }

    /// Sets an explicit value for `key`; empty values are ignored at resolution time
    #[must_use]
    pub fn with_override(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.overrides.insert(key, value.into());
        self
    }

    /// Sets explicit values for several keys, skipping `None`s
    #[must_use]
    pub fn with_overrides<I, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (ConfigKey, Option<V>)>,
        V: Into<String>,
    {
        for (key, value) in overrides {
            if let Some(value) = value {
                self.overrides.insert(key, value.into());
            }
        }
        self
    }

    /// Replaces the environment snapshot
    #[must_use]
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Replaces the secret directory
    #[must_use]
    pub fn with_secret_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.secret_dir = dir.into();
        self
    }

    /// Directory searched for secret files
    #[must_use]
    pub fn secret_dir(&self) -> &Path {
        &self.secret_dir
    }

    /// Looks `key` up through every source, first non-empty match wins
    pub fn lookup(&self, key: ConfigKey) -> Option<(String, ConfigSource)> {
        let name = key.env_name();

        if let Some(value) = non_empty(self.overrides.get(&key).cloned()) {
            return Some((value, ConfigSource::Override));
        }
        if let Some(value) = non_empty(self.environment.get(&name).cloned()) {
            return Some((value, ConfigSource::Environment));
        }
        if let Some(value) = non_empty(read_first_line(&self.secret_dir.join(&name))) {
            return Some((value, ConfigSource::SecretFile));
        }
        key.default_value()
            .map(|value| (value.to_string(), ConfigSource::Default))
    }

    /// Resolves a required key
    ///
    /// # Errors
    /// [`AppError::MissingConfig`] naming the namespaced key when no source has a value.
    pub fn resolve(&self, key: ConfigKey) -> Result<String, AppError> {
        match self.lookup(key) {
            Some((value, source)) => {
                debug!("{} resolved from {:?}", key, source);
                Ok(value)
            }
            None => Err(AppError::MissingConfig {
                key: key.env_name(),
            }),
        }
    }

    /// Resolves an optional key
    #[must_use]
    pub fn resolve_optional(&self, key: ConfigKey) -> Option<String> {
        self.lookup(key).map(|(value, _)| value)
    }
}

/// Gateway flavour; decides which account field carries the account value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// Realtick / RTX backend
    #[default]
    Rtx,
    /// Interactive Brokers TWS backend
    Tws,
}

impl GatewayMode {
    /// Name of the account field holding the account value in this mode
    #[must_use]
    pub fn account_value_field(&self) -> &'static str {
        match self {
            GatewayMode::Rtx => RTX_ACCOUNT_VALUE_FIELD,
            GatewayMode::Tws => TWS_ACCOUNT_VALUE_FIELD,
        }
    }
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayMode::Rtx => f.write_str("rtx"),
            GatewayMode::Tws => f.write_str("tws"),
        }
    }
}

impl FromStr for GatewayMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rtx" => Ok(GatewayMode::Rtx),
            "tws" => Ok(GatewayMode::Tws),
            _ => Err(invalid(ConfigKey::Mode, s, "expected rtx or tws")),
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Clone)]
/// Resolved, immutable connection configuration
pub struct Config {
    /// `http` or `https`
    pub protocol: String,
    /// Gateway host name
    pub host: String,
    /// Gateway JSON API port
    pub port: u16,
    /// Basic auth user
    pub username: String,
    /// Basic auth password
    #[serde(skip_serializing)]
    pub password: String,
    /// Default trading account
    pub account: String,
    /// Default order route
    pub route: String,
    /// Gateway flavour
    pub mode: GatewayMode,
    /// Request timeout; `None` blocks until the transport gives up
    pub timeout: Option<Duration>,
}

impl Config {
    /// Resolves a configuration from the process environment, secret files and defaults
    ///
    /// # Errors
    /// Any missing or invalid key.
    pub fn new() -> Result<Self, AppError> {
        Self::resolve(&ConfigResolver::from_env())
    }

    /// Resolves every key through `resolver`
    ///
    /// # Errors
    /// [`AppError::MissingConfig`] for the first required key without a value,
    /// [`AppError::InvalidConfig`] for values that cannot be used.
    pub fn resolve(resolver: &ConfigResolver) -> Result<Self, AppError> {
        let protocol = resolver.resolve(ConfigKey::Protocol)?.to_lowercase();
        if protocol != "http" && protocol != "https" {
            return Err(invalid(ConfigKey::Protocol, &protocol, "expected http or https"));
        }

        let host = resolver.resolve(ConfigKey::Host)?;
        let port_text = resolver.resolve(ConfigKey::HttpPort)?;
        let port = port_text
            .trim()
            .parse::<u16>()
            .map_err(|e| invalid(ConfigKey::HttpPort, &port_text, &e.to_string()))?;
        let username = resolver.resolve(ConfigKey::Username)?;
        let password = resolver.resolve(ConfigKey::Password)?;
        let account = resolver.resolve(ConfigKey::ApiAccount)?;
        let route = resolver.resolve(ConfigKey::Route)?;
        let mode = resolver.resolve(ConfigKey::Mode)?.parse::<GatewayMode>()?;
        let timeout = resolver
            .resolve_optional(ConfigKey::Timeout)
            .map(|text| parse_timeout(&text))
            .transpose()?;

        Ok(Config {
            protocol,
            host,
            port,
            username,
            password,
            account,
            route,
            mode,
            timeout,
        })
    }

    /// `{protocol}://{host}:{port}`
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

fn parse_timeout(text: &str) -> Result<Duration, AppError> {
    let secs = text
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(ConfigKey::Timeout, text, &e.to_string()))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid(ConfigKey::Timeout, text, "expected a positive number of seconds"));
    }
    Ok(Duration::from_secs_f64(secs))
}

fn invalid(key: ConfigKey, value: &str, reason: &str) -> AppError {
    AppError::InvalidConfig {
        key: key.env_name(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
