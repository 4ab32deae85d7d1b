use crate::domain::error::ChamberResult;
use async_trait::async_trait;

/// Transport type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportType {
    Serial,
    Tcp,
}

impl std::fmt::Display for TransportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportType::Serial => write!(f, "serial"),
            TransportType::Tcp => write!(f, "tcp"),
        }
    }
}

/// Unified transport trait over the chamber link implementations
///
/// One request/response is in flight per link at a time; the `&mut self`
/// receivers rule out overlap without any internal locking.
#[async_trait]
pub trait Transport: Send {
    /// Get the transport type
    fn transport_type(&self) -> TransportType;

    /// Send a single command and return the delimiter-stripped response
    async fn transact(&mut self, command: &str) -> ChamberResult<Vec<u8>>;

    /// Whether the link is still open
    fn is_connected(&self) -> bool;

    /// Release the link; calling close again is a no-op
    async fn close(&mut self) -> ChamberResult<()>;
}
