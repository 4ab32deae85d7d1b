use crate::core::protocol::{Exchange, Transport, TransportType};
use crate::domain::config::{ParityConfig, SerialConfig};
use crate::domain::error::{ChamberError, ChamberResult};
use async_trait::async_trait;
use serialport::{DataBits, Parity, StopBits};
use std::time::Duration;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::info;

/// Serial (RS-232/RS-485) chamber link
///
/// Commands go out one at a time; on a multi-drop RS-485 bus each frame is
/// prefixed with the configured controller address.
pub struct SerialClient {
    exchange: Option<Exchange<SerialStream>>,
    address: Option<u8>,
    port_name: String,
}

impl SerialClient {
    /// Open the configured serial port
    pub async fn open(config: &SerialConfig) -> ChamberResult<Self> {
        config.validate()?;

        let mut builder = tokio_serial::new(config.port.as_str(), config.baud_rate);

        builder = builder.data_bits(match config.data_bits {
            5 => DataBits::Five,
            6 => DataBits::Six,
            7 => DataBits::Seven,
            8 => DataBits::Eight,
            _ => {
                return Err(ChamberError::Config {
                    message: format!("Invalid data bits: {}", config.data_bits),
                })
            }
        });

        builder = builder.stop_bits(match config.stop_bits {
            1 => StopBits::One,
            2 => StopBits::Two,
            _ => {
                return Err(ChamberError::Config {
                    message: format!("Invalid stop bits: {}", config.stop_bits),
                })
            }
        });

        builder = builder.parity(match config.parity {
            ParityConfig::None => Parity::None,
            ParityConfig::Even => Parity::Even,
            ParityConfig::Odd => Parity::Odd,
        });

        let stream = builder
            .open_native_async()
            .map_err(|e| ChamberError::Connection {
                message: format!("Failed to open serial port {}: {}", config.port, e),
            })?;

        info!("Serial port {} opened", config.port);

        Ok(Self {
            exchange: Some(Exchange::new(
                stream,
                &config.delimiter,
                Duration::from_millis(config.timeout_ms),
            )),
            address: config.address,
            port_name: config.port.clone(),
        })
    }

    /// Send each command in order, collecting the delimiter-stripped responses
    ///
    /// The batch is all-or-nothing: the first command the controller rejects
    /// or fails to answer aborts the call, and responses already collected
    /// are discarded.
    pub async fn interact<S>(&mut self, commands: &[S]) -> ChamberResult<Vec<Vec<u8>>>
    where
        S: AsRef<str>,
    {
        let address = self.address;
        let exchange = self.exchange.as_mut().ok_or(ChamberError::NotConnected)?;
        exchange.transact_all(commands, address).await
    }

    pub fn is_connected(&self) -> bool {
        self.exchange.is_some()
    }

    /// Release the port; calling close again is a no-op
    pub async fn close(&mut self) -> ChamberResult<()> {
        if let Some(exchange) = self.exchange.take() {
            drop(exchange.into_inner());
            info!("Serial port {} closed", self.port_name);
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for SerialClient {
    fn transport_type(&self) -> TransportType {
        TransportType::Serial
    }

    async fn transact(&mut self, command: &str) -> ChamberResult<Vec<u8>> {
        let address = self.address;
        let exchange = self.exchange.as_mut().ok_or(ChamberError::NotConnected)?;
        exchange.transact(command, address).await
    }

    fn is_connected(&self) -> bool {
        SerialClient::is_connected(self)
    }

    async fn close(&mut self) -> ChamberResult<()> {
        SerialClient::close(self).await
    }
}
