//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `pinhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::collections::BTreeSet;

use serde::Deserialize;

use pinhub_adapter_virtual::VirtualBoardConfig;
use pinhub_app::platform::{DEFAULT_STREAM_CAPACITY, PlatformConfig};
use pinhub_domain::error::PinHubError;
use pinhub_domain::id::CoilNumber;
use pinhub_domain::device::DeviceKind;
use pinhub_domain::platform::CommandPolicy;
use pinhub_domain::rpc::{ConfigureHardwareRuleRequest, RegisterDeviceRequest};

const CONFIG_FILE: &str = "pinhub.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Platform behaviour.
    pub platform: PlatformSection,
    /// Simulated driver board.
    #[serde(rename = "virtual")]
    pub board: BoardSection,
    /// Named devices registered at startup.
    pub devices: Vec<DeviceConfig>,
    /// Hardware rules installed at startup.
    pub rules: Vec<RuleConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// `[platform]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlatformSection {
    /// Name reported by `GetPlatformDetails`.
    pub name: String,
    /// What to do with a coil command while another one is running.
    pub command_policy: CommandPolicy,
    /// Switch changes buffered per subscriber before a gap is reported.
    pub stream_capacity: usize,
}

/// `[virtual]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BoardSection {
    /// Whether the board can hold enabled coils.
    pub hold_power: bool,
    /// Coils wired to the board. Empty means every coil.
    pub coils: Vec<CoilNumber>,
}

/// One `[[devices]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub kind: DeviceKind,
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DeviceConfig {
    /// The request that registers this device.
    #[must_use]
    pub fn to_request(&self) -> RegisterDeviceRequest {
        RegisterDeviceRequest {
            kind: self.kind,
            name: self.name.clone(),
            number: self.number.clone(),
            label: self.label.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// One `[[rules]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub switch_number: String,
    pub coil_number: String,
    pub pulse_ms: i64,
    pub pulse_power: f64,
    #[serde(default)]
    pub hold_power: f64,
}

impl RuleConfig {
    /// The request that installs this rule.
    #[must_use]
    pub fn to_request(&self) -> ConfigureHardwareRuleRequest {
        ConfigureHardwareRuleRequest {
            coil_number: self.coil_number.clone(),
            switch_number: self.switch_number.clone(),
            pulse_ms: self.pulse_ms,
            pulse_power: self.pulse_power,
            hold_power: self.hold_power,
        }
    }
}

impl Config {
    /// Load configuration from `pinhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("PINHUB_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("PINHUB_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("PINHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("PINHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.platform.stream_capacity == 0 {
            return Err(ConfigError::Validation(
                "stream_capacity must be non-zero".to_string(),
            ));
        }
        for (index, device) in self.devices.iter().enumerate() {
            device
                .to_request()
                .validate()
                .map_err(|source| ConfigError::InvalidDevice { index, source })?;
        }
        for (index, rule) in self.rules.iter().enumerate() {
            rule.to_request()
                .validate()
                .map_err(|source| ConfigError::InvalidRule { index, source })?;
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn platform_config(&self) -> PlatformConfig {
        PlatformConfig {
            name: self.platform.name.clone(),
            command_policy: self.platform.command_policy,
            stream_capacity: self.platform.stream_capacity,
        }
    }

    #[must_use]
    pub fn board_config(&self) -> VirtualBoardConfig {
        VirtualBoardConfig {
            hold_power: self.board.hold_power,
            wired: self.board.coils.iter().cloned().collect::<BTreeSet<_>>(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5051,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pinhubd=info,pinhub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for PlatformSection {
    fn default() -> Self {
        let defaults = PlatformConfig::default();
        Self {
            name: defaults.name,
            command_policy: defaults.command_policy,
            stream_capacity: DEFAULT_STREAM_CAPACITY,
        }
    }
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            hold_power: true,
            coils: Vec::new(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A preloaded device is malformed.
    #[error("invalid device at index {index}")]
    InvalidDevice {
        index: usize,
        #[source]
        source: PinHubError,
    },
    /// A preloaded hardware rule is malformed.
    #[error("invalid hardware rule at index {index}")]
    InvalidRule {
        index: usize,
        #[source]
        source: PinHubError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5051);
        assert_eq!(config.platform.name, "pinhub");
        assert_eq!(config.platform.command_policy, CommandPolicy::Queue);
        assert_eq!(config.platform.stream_capacity, DEFAULT_STREAM_CAPACITY);
        assert!(config.board.hold_power);
        assert!(config.rules.is_empty());
        assert!(config.devices.is_empty());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5051);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'

            [platform]
            name = 'cabinet'
            command_policy = 'reject'
            stream_capacity = 32

            [virtual]
            hold_power = false
            coils = ['C1', 'C2']

            [[rules]]
            switch_number = 'S1'
            coil_number = 'C1'
            pulse_ms = 25
            pulse_power = 0.8

            [[rules]]
            switch_number = 'S2'
            coil_number = 'C2'
            pulse_ms = 10
            pulse_power = 1.0
            hold_power = 0.3
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.platform.name, "cabinet");
        assert_eq!(config.platform.command_policy, CommandPolicy::Reject);
        assert_eq!(config.platform.stream_capacity, 32);
        assert!(!config.board.hold_power);
        assert_eq!(config.board_config().wired.len(), 2);
        assert_eq!(config.rules.len(), 2);
        assert!((config.rules[0].hold_power).abs() < f64::EPSILON);
        assert!((config.rules[1].hold_power - 0.3).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 5051);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_stream_capacity() {
        let mut config = Config::default();
        config.platform.stream_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_rule_with_out_of_range_power() {
        let toml = "
            [[rules]]
            switch_number = 'S1'
            coil_number = 'C1'
            pulse_ms = 25
            pulse_power = 1.8
        ";
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { index: 0, .. }));
    }

    #[test]
    fn should_parse_device_inventory() {
        let toml = "
            [[devices]]
            kind = 'coil'
            name = 'left_flipper'
            number = 'C1'
            label = 'Left flipper'
            tags = ['flipper', 'playfield']

            [[devices]]
            kind = 'switch'
            name = 'left_flipper'
            number = 'S1'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.devices.len(), 2);
        assert_eq!(config.devices[0].kind, DeviceKind::Coil);
        assert_eq!(config.devices[0].tags, vec!["flipper", "playfield"]);
        assert!(config.devices[1].tags.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_unknown_device_kind() {
        let result: Result<Config, _> =
            toml::from_str("[[devices]]\nkind = 'magnet'\nname = 'm'\nnumber = 'C1'");
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_device_with_blank_number() {
        let toml = "
            [[devices]]
            kind = 'light'
            name = 'gi'
            number = ''
        ";
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDevice { index: 0, .. }));
    }

    #[test]
    fn should_reject_blank_wired_coil() {
        let result: Result<Config, _> = toml::from_str("[virtual]\ncoils = ['  ']");
        assert!(result.is_err());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5051");
    }

    #[test]
    fn should_override_host_and_port_from_env() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("PINHUB_HOST", "127.0.0.1"), ("PINHUB_PORT", "7000")]));
        assert_eq!(config.bind_addr(), "127.0.0.1:7000");
    }

    #[test]
    fn should_override_bind_from_env() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("PINHUB_BIND", "10.0.0.2:8080")]));
        assert_eq!(config.bind_addr(), "10.0.0.2:8080");
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("PINHUB_PORT", "nope")]));
        assert_eq!(config.server.port, 5051);
    }

    #[test]
    fn should_prefer_rust_log_over_pinhub_log() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("PINHUB_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
