// Core module - Protocol engine and device model
pub mod chamber;
pub mod protocol;

pub use chamber::{Capabilities, Chamber, Feature};
pub use protocol::{Exchange, Transport, TransportType};
