// Protocol module - Delimiter-framed request/response engine
pub mod error_codes;
pub mod exchange;
pub mod framing;
pub mod transport;

pub use exchange::Exchange;
pub use framing::{DEFAULT_DELIMITER, ERROR_SENTINEL};
pub use transport::{Transport, TransportType};
