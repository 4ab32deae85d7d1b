use crate::core::protocol::{Exchange, Transport, TransportType};
use crate::domain::config::TcpConfig;
use crate::domain::error::{ChamberError, ChamberResult};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, warn};

/// TCP/IP chamber link
///
/// Point-to-point: one controller per connection, one command per call. The
/// command protocol is the same as over serial, minus bus addressing.
pub struct TcpClient {
    exchange: Option<Exchange<TcpStream>>,
    peer: String,
}

impl TcpClient {
    /// Connect to the controller
    pub async fn open(config: &TcpConfig) -> ChamberResult<Self> {
        config.validate()?;

        let stream = tokio::time::timeout(
            Duration::from_millis(config.connect_timeout_ms),
            TcpStream::connect((config.host.as_str(), config.port)),
        )
        .await
        .map_err(|_| ChamberError::Connection {
            message: format!("Connection timeout to {}:{}", config.host, config.port),
        })?
        .map_err(|e| ChamberError::Connection {
            message: format!("Failed to connect to {}:{}: {}", config.host, config.port, e),
        })?;

        if let Err(e) = stream.set_nodelay(true) {
            warn!("Failed to set TCP_NODELAY: {}", e);
        }

        info!("TCP connection established to {}:{}", config.host, config.port);

        Ok(Self {
            exchange: Some(Exchange::new(
                stream,
                &config.delimiter,
                Duration::from_millis(config.read_timeout_ms),
            )),
            peer: format!("{}:{}", config.host, config.port),
        })
    }

    /// Send one command and return the delimiter-stripped response
    pub async fn interact(&mut self, command: &str) -> ChamberResult<Vec<u8>> {
        let exchange = self.exchange.as_mut().ok_or(ChamberError::NotConnected)?;
        exchange.transact(command, None).await
    }

    pub fn is_connected(&self) -> bool {
        self.exchange.is_some()
    }

    /// Shut the connection down; calling close again is a no-op
    pub async fn close(&mut self) -> ChamberResult<()> {
        if let Some(exchange) = self.exchange.take() {
            let mut stream = exchange.into_inner();
            if let Err(e) = stream.shutdown().await {
                warn!("Failed to shutdown TCP stream: {}", e);
            }
            // Controllers need a moment to drop the old socket before they
            // will accept another connection
            tokio::time::sleep(Duration::from_millis(100)).await;
            info!("TCP connection to {} closed", self.peer);
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for TcpClient {
    fn transport_type(&self) -> TransportType {
        TransportType::Tcp
    }

    async fn transact(&mut self, command: &str) -> ChamberResult<Vec<u8>> {
        self.interact(command).await
    }

    fn is_connected(&self) -> bool {
        TcpClient::is_connected(self)
    }

    async fn close(&mut self) -> ChamberResult<()> {
        TcpClient::close(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_config(port: u16) -> TcpConfig {
        let mut config = TcpConfig::new("127.0.0.1");
        config.port = port;
        config.connect_timeout_ms = 1000;
        config.read_timeout_ms = 1000;
        config
    }

    #[tokio::test]
    async fn test_open_fails_gracefully() {
        // Port 0 is never connectable
        let result = TcpClient::open(&test_config(0)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_interact_with_mock_controller() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let n = socket.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], b"TEMP?\r\n");
            socket.write_all(b"23.5\r\n").await.unwrap();
        });

        let mut client = TcpClient::open(&test_config(addr.port())).await.unwrap();
        let response = client.interact("TEMP?").await.unwrap();
        assert_eq!(response, b"23.5");
        client.close().await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_timeout() {
        // 192.0.2.1 is TEST-NET-1 (RFC 5737), guaranteed unroutable
        let mut config = TcpConfig::new("192.0.2.1");
        config.port = 12345;
        config.connect_timeout_ms = 100;

        let err = match TcpClient::open(&config).await {
            Ok(_) => panic!("open unexpectedly succeeded"),
            Err(err) => err,
        };
        match err {
            ChamberError::Connection { message } => {
                assert!(message.contains("192.0.2.1"));
            }
            other => panic!("expected connection error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let _socket = listener.accept().await;
        });

        let mut client = TcpClient::open(&test_config(addr.port())).await.unwrap();
        assert!(client.is_connected());
        client.close().await.unwrap();
        client.close().await.unwrap();
        assert!(!client.is_connected());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_interact_after_close_is_rejected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let _socket = listener.accept().await;
        });

        let mut client = TcpClient::open(&test_config(addr.port())).await.unwrap();
        client.close().await.unwrap();
        let err = client.interact("TEMP?").await.unwrap_err();
        assert!(matches!(err, ChamberError::NotConnected));
        server.await.unwrap();
    }
}
