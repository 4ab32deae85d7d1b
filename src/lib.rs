//! Chamberlink Library
//!
//! Communication library for ESPEC and Watlow environmental test chamber
//! controllers, speaking the delimiter-framed command protocol over
//! RS-232/RS-485 serial or TCP/IP.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::chamber::{Capabilities, Chamber, Feature};
pub use crate::core::protocol::{Transport, TransportType};
pub use crate::domain::config::{ConnectionConfig, ParityConfig, SerialConfig, TcpConfig};
pub use crate::domain::error::{ChamberError, ChamberResult};
pub use crate::infrastructure::serial::SerialClient;
pub use crate::infrastructure::tcp::TcpClient;
