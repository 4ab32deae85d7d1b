use thiserror::Error;

/// Chamberlink unified error type
#[derive(Error, Debug)]
pub enum ChamberError {
    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Chamber did not respond in time")]
    Timeout,

    #[error("Command \"{command}\" generated error \"{code}\" ({description})")]
    Protocol {
        command: String,
        code: String,
        description: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Device not connected")]
    NotConnected,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Output error: {0}")]
    Output(String),
}

pub type ChamberResult<T> = Result<T, ChamberError>;
