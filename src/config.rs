//! Application configuration

use std::net::SocketAddr;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_with::serde_as;

use crate::errors::AisSyncError;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub receiver: ReceiverConfig,
    #[serde(default)]
    pub catcher: CatcherConfig,
}

/// UDP socket receiving NMEA sentences
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReceiverConfig {
    pub bind_address: String,
    pub channel_capacity: usize,
}

/// External AIS receiver process, forwarding sentences to the UDP socket
#[serde_as]
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatcherConfig {
    pub enabled: bool,
    pub program: String,
    /// Receiver center frequency, passed as `-f`
    pub frequency: String,
    pub extra_args: Vec<String>,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub startup_delay: Duration,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:10110".to_string(),
            channel_capacity: 100,
        }
    }
}

impl Default for CatcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "AIS-catcher".to_string(),
            frequency: "162.0M".to_string(),
            extra_args: Vec::new(),
            startup_delay: Duration::from_secs(2),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config/default")
    }

    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("AISSYNC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("catcher.extra_args"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), AisSyncError> {
        self.receiver.validate()?;
        self.catcher.validate()?;
        Ok(())
    }
}

impl ReceiverConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AisSyncError> {
        self.bind_address
            .parse()
            .map_err(|e| AisSyncError::ConfigurationError {
                message: format!("Invalid bind address {}: {}", self.bind_address, e),
            })
    }

    pub fn validate(&self) -> Result<(), AisSyncError> {
        self.socket_addr()?;
        if self.channel_capacity == 0 {
            return Err(AisSyncError::ConfigurationError {
                message: "Channel capacity must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl CatcherConfig {
    /// Command line arguments forwarding decoded sentences to `target`
    pub fn args(&self, target: SocketAddr) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.frequency.clone(),
            "-u".to_string(),
            target.ip().to_string(),
            target.port().to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }

    pub fn validate(&self) -> Result<(), AisSyncError> {
        if self.enabled && self.program.trim().is_empty() {
            return Err(AisSyncError::ConfigurationError {
                message: "Catcher program cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;

    #[test]
    fn test_load_config() {
        env::set_var("AISSYNC__RECEIVER__BIND_ADDRESS", "0.0.0.0:10111");
        env::set_var("AISSYNC__CATCHER__EXTRA_ARGS", "-q,-v");
        env::set_var("AISSYNC__CATCHER__STARTUP_DELAY", "5");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.receiver.bind_address, "0.0.0.0:10111");
        assert_eq!(config.receiver.channel_capacity, 100);
        assert_eq!(config.catcher.extra_args, vec!["-q", "-v"]);
        assert_eq!(config.catcher.startup_delay, Duration::from_secs(5));
        assert_eq!(config.catcher.program, "AIS-catcher");

        env::remove_var("AISSYNC__RECEIVER__BIND_ADDRESS");
        env::remove_var("AISSYNC__CATCHER__EXTRA_ARGS");
        env::remove_var("AISSYNC__CATCHER__STARTUP_DELAY");
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[catcher]\nenabled = false\nfrequency = \"161.975M\"\n\n[receiver]\nchannel_capacity = 8"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path().to_str().unwrap()).unwrap();
        assert!(!config.catcher.enabled);
        assert_eq!(config.catcher.frequency, "161.975M");
        assert_eq!(config.receiver.channel_capacity, 8);
    }

    #[test]
    fn test_catcher_args() {
        let config = CatcherConfig {
            extra_args: vec!["-q".to_string()],
            ..Default::default()
        };
        let args = config.args("127.0.0.1:10110".parse().unwrap());

        assert_eq!(args, vec!["-f", "162.0M", "-u", "127.0.0.1", "10110", "-q"]);
    }

    #[test]
    fn test_config_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validate_invalid_address() {
        let config = ReceiverConfig {
            bind_address: "localhost".to_string(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_zero_capacity() {
        let config = ReceiverConfig {
            channel_capacity: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_empty_program() {
        let config = CatcherConfig {
            program: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CatcherConfig {
            enabled: false,
            program: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
