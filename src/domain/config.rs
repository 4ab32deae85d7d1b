use crate::domain::error::{ChamberError, ChamberResult};
use serde::{Deserialize, Serialize};

/// Serial connection configuration
///
/// Defaults match the factory settings of ESPEC serial interfaces:
/// 19200 baud, 8N1, 3 second response timeout, CR+LF delimiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Serial port path (e.g. `/dev/ttyUSB0`, `COM3`)
    pub port: String,
    /// Baud rate
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Data bits (5-8)
    #[serde(default = "default_data_bits")]
    pub data_bits: u8,
    /// Stop bits (1 or 2)
    #[serde(default = "default_stop_bits")]
    pub stop_bits: u8,
    /// Parity
    #[serde(default = "default_parity")]
    pub parity: ParityConfig,
    /// RS-485 bus address (1-31); `None` on point-to-point RS-232 links
    #[serde(default)]
    pub address: Option<u8>,
    /// Command/response delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Per-read response timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

/// TCP connection configuration
///
/// Chambers with an Ethernet interface expose the same command protocol
/// on a raw stream socket, factory default port 10001.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    /// Controller hostname or IP address
    pub host: String,
    /// Controller TCP port
    #[serde(default = "default_tcp_port")]
    pub port: u16,
    /// Command/response delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Connect timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub connect_timeout_ms: u64,
    /// Per-read response timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub read_timeout_ms: u64,
}

/// Connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConnectionConfig {
    #[serde(rename = "serial")]
    Serial(SerialConfig),
    #[serde(rename = "tcp")]
    Tcp(TcpConfig),
}

/// Parity configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParityConfig {
    None,
    Odd,
    Even,
}

// Default value functions

fn default_baud_rate() -> u32 {
    19200
}

fn default_data_bits() -> u8 {
    8
}

fn default_stop_bits() -> u8 {
    1
}

fn default_parity() -> ParityConfig {
    ParityConfig::None
}

fn default_delimiter() -> String {
    "\r\n".to_string()
}

fn default_timeout() -> u64 {
    3000
}

fn default_tcp_port() -> u16 {
    10001
}

impl Default for ParityConfig {
    fn default() -> Self {
        default_parity()
    }
}

impl SerialConfig {
    /// Create a configuration for the given port with factory defaults
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: default_baud_rate(),
            data_bits: default_data_bits(),
            stop_bits: default_stop_bits(),
            parity: default_parity(),
            address: None,
            delimiter: default_delimiter(),
            timeout_ms: default_timeout(),
        }
    }

    /// Check parameter ranges before opening the port
    pub fn validate(&self) -> ChamberResult<()> {
        validate_delimiter(&self.delimiter)?;
        if !(5..=8).contains(&self.data_bits) {
            return Err(ChamberError::Config {
                message: format!("Invalid data bits: {}", self.data_bits),
            });
        }
        if !(1..=2).contains(&self.stop_bits) {
            return Err(ChamberError::Config {
                message: format!("Invalid stop bits: {}", self.stop_bits),
            });
        }
        // Bus addresses are 1-based; 0 is not a valid drop on an RS-485 bus
        if self.address == Some(0) {
            return Err(ChamberError::Config {
                message: "Invalid bus address: 0".to_string(),
            });
        }
        Ok(())
    }
}

impl TcpConfig {
    /// Create a configuration for the given host with factory defaults
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_tcp_port(),
            delimiter: default_delimiter(),
            connect_timeout_ms: default_timeout(),
            read_timeout_ms: default_timeout(),
        }
    }

    /// Check parameter ranges before connecting
    pub fn validate(&self) -> ChamberResult<()> {
        validate_delimiter(&self.delimiter)
    }
}

fn validate_delimiter(delimiter: &str) -> ChamberResult<()> {
    if delimiter.is_empty() {
        return Err(ChamberError::Config {
            message: "Delimiter must not be empty".to_string(),
        });
    }
    if !delimiter.is_ascii() {
        return Err(ChamberError::Config {
            message: "Delimiter must be ASCII".to_string(),
        });
    }
    Ok(())
}

impl From<SerialConfig> for ConnectionConfig {
    fn from(config: SerialConfig) -> Self {
        ConnectionConfig::Serial(config)
    }
}

impl From<TcpConfig> for ConnectionConfig {
    fn from(config: TcpConfig) -> Self {
        ConnectionConfig::Tcp(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_defaults() {
        let config = SerialConfig::new("/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 19200);
        assert_eq!(config.data_bits, 8);
        assert_eq!(config.stop_bits, 1);
        assert_eq!(config.parity, ParityConfig::None);
        assert_eq!(config.address, None);
        assert_eq!(config.delimiter, "\r\n");
        assert_eq!(config.timeout_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tcp_defaults() {
        let config = TcpConfig::new("10.30.100.55");
        assert_eq!(config.port, 10001);
        assert_eq!(config.delimiter, "\r\n");
        assert_eq!(config.connect_timeout_ms, 3000);
        assert_eq!(config.read_timeout_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serial_config_serialization() {
        let mut config = SerialConfig::new("/dev/ttyUSB0");
        config.address = Some(2);

        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: SerialConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.port, "/dev/ttyUSB0");
        assert_eq!(deserialized.address, Some(2));
        assert_eq!(deserialized.delimiter, "\r\n");
    }

    #[test]
    fn test_serial_config_defaults_applied() {
        let config: SerialConfig = toml::from_str("port = \"COM3\"").unwrap();
        assert_eq!(config.port, "COM3");
        assert_eq!(config.baud_rate, 19200);
        assert_eq!(config.address, None);
        assert_eq!(config.timeout_ms, 3000);
    }

    #[test]
    fn test_tcp_config_defaults_applied() {
        let config: TcpConfig = toml::from_str("host = \"192.168.0.20\"").unwrap();
        assert_eq!(config.port, 10001);
        assert_eq!(config.read_timeout_ms, 3000);
    }

    #[test]
    fn test_connection_config_tagged() {
        let connection: ConnectionConfig = TcpConfig::new("192.168.0.20").into();
        let toml_str = toml::to_string(&connection).unwrap();
        assert!(toml_str.contains("type = \"tcp\""));

        let deserialized: ConnectionConfig = toml::from_str(&toml_str).unwrap();
        assert!(matches!(deserialized, ConnectionConfig::Tcp(_)));
    }

    #[test]
    fn test_invalid_data_bits_rejected() {
        let mut config = SerialConfig::new("/dev/ttyUSB0");
        config.data_bits = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_stop_bits_rejected() {
        let mut config = SerialConfig::new("/dev/ttyUSB0");
        config.stop_bits = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_address_zero_rejected() {
        let mut config = SerialConfig::new("/dev/ttyUSB0");
        config.address = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let mut config = TcpConfig::new("192.168.0.20");
        config.delimiter = String::new();
        assert!(config.validate().is_err());
    }
}
