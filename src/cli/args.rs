use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Command line arguments for Chamberlink
#[derive(Parser, Debug)]
#[command(
    name = "chamberlink",
    version = env!("CARGO_PKG_VERSION"),
    about = "Communication tool for ESPEC and Watlow chamber controllers",
    long_about = "Sample communication programs for ESPEC and Watlow environmental test chamber controllers, speaking the delimiter-framed command protocol over RS-232/RS-485 serial or TCP/IP."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress logging output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Talk to a controller over a serial port
    Serial(SerialArgs),
    /// Talk to a controller over TCP/IP
    Tcp(TcpArgs),
    /// List the controller error codes and their descriptions
    Codes,
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// Hex dump of raw response bytes
    Hex,
    /// JSON output
    Json,
    /// Table output
    Table,
}

/// Serial connection arguments
#[derive(ClapArgs, Debug)]
pub struct SerialArgs {
    /// Serial port path
    #[arg(short, long)]
    pub port: String,

    /// Baud rate
    #[arg(short, long, default_value = "19200")]
    pub baud: u32,

    /// Data bits
    #[arg(long, default_value = "8")]
    pub data_bits: u8,

    /// Stop bits
    #[arg(long, default_value = "1")]
    pub stop_bits: u8,

    /// Parity (none, even, odd)
    #[arg(long, value_enum, default_value = "none")]
    pub parity: ParityArg,

    /// Controller address on an RS-485 bus (1-31); omit for point-to-point RS-232
    #[arg(short, long)]
    pub address: Option<u8>,

    /// Frame delimiter
    #[arg(long, value_enum, default_value = "crlf")]
    pub delimiter: DelimiterArg,

    /// Response timeout in milliseconds
    #[arg(long, default_value = "3000")]
    pub timeout_ms: u64,

    /// Serial subcommand
    #[command(subcommand)]
    pub command: DeviceCommand,
}

/// TCP connection arguments
#[derive(ClapArgs, Debug)]
pub struct TcpArgs {
    /// Controller host name or IP address
    #[arg(long)]
    pub host: String,

    /// TCP port
    #[arg(short, long, default_value = "10001")]
    pub port: u16,

    /// Frame delimiter
    #[arg(long, value_enum, default_value = "crlf")]
    pub delimiter: DelimiterArg,

    /// Connect timeout in milliseconds
    #[arg(long, default_value = "3000")]
    pub connect_timeout_ms: u64,

    /// Response timeout in milliseconds
    #[arg(long, default_value = "3000")]
    pub timeout_ms: u64,

    /// TCP subcommand
    #[command(subcommand)]
    pub command: DeviceCommand,
}

/// Subcommands shared by both connection types
#[derive(Subcommand, Debug)]
pub enum DeviceCommand {
    /// Send one or more commands and print the responses
    Send {
        /// Commands to send, in order
        #[arg(required = true)]
        commands: Vec<String>,
    },
    /// Drive the controller from an interactive menu
    Menu {
        /// Display name for the controller
        #[arg(short, long, default_value = "chamber")]
        name: String,

        /// Controller has a humidity loop
        #[arg(long)]
        humidity: bool,

        /// Controller has a cascade (product temperature) loop
        #[arg(long)]
        cascade: bool,

        /// Number of time signal outputs
        #[arg(long, default_value = "0")]
        time_signals: u8,
    },
}

/// Parity configuration argument
#[derive(ValueEnum, Debug, Clone)]
pub enum ParityArg {
    None,
    Even,
    Odd,
}

/// Frame delimiter argument
#[derive(ValueEnum, Debug, Clone)]
pub enum DelimiterArg {
    /// Carriage return + line feed
    Crlf,
    /// Carriage return only
    Cr,
    /// Line feed only
    Lf,
}

impl DelimiterArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            DelimiterArg::Crlf => "\r\n",
            DelimiterArg::Cr => "\r",
            DelimiterArg::Lf => "\n",
        }
    }
}

impl From<ParityArg> for crate::domain::config::ParityConfig {
    fn from(parity: ParityArg) -> Self {
        match parity {
            ParityArg::None => Self::None,
            ParityArg::Even => Self::Even,
            ParityArg::Odd => Self::Odd,
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Hex => write!(f, "hex"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}
