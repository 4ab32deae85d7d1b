// Domain module - Configuration and error types
pub mod config;
pub mod error;

pub use config::{ConnectionConfig, ParityConfig, SerialConfig, TcpConfig};
pub use error::{ChamberError, ChamberResult};
