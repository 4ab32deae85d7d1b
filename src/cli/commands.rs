use crate::cli::args::{Args, Command, DeviceCommand, SerialArgs, TcpArgs};
use crate::cli::menu::run_menu;
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::chamber::{Capabilities, Chamber};
use crate::core::protocol::error_codes;
use crate::domain::config::{SerialConfig, TcpConfig};
use crate::domain::error::ChamberResult;
use crate::infrastructure::serial::SerialClient;
use crate::infrastructure::tcp::TcpClient;

/// Execute CLI command
pub async fn execute_command(args: Args) -> ChamberResult<()> {
    let writer = ConsoleWriter::new(args.output.clone());

    match args.command {
        Command::Serial(serial_args) => execute_serial_command(serial_args, &writer).await,
        Command::Tcp(tcp_args) => execute_tcp_command(tcp_args, &writer).await,
        Command::Codes => {
            writer.write_codes(error_codes::entries())?;
            Ok(())
        }
        Command::Version => {
            writer.write_message(&format!("chamberlink {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

async fn execute_serial_command(args: SerialArgs, writer: &ConsoleWriter) -> ChamberResult<()> {
    let config = serial_config_from_args(&args);

    match args.command {
        DeviceCommand::Send { commands } => {
            let mut client = SerialClient::open(&config).await?;
            let result = client.interact(&commands).await;
            client.close().await?;
            let responses = result?;

            let pairs: Vec<(String, Vec<u8>)> = commands.into_iter().zip(responses).collect();
            writer.write_responses(&pairs)?;
            Ok(())
        }
        DeviceCommand::Menu {
            name,
            humidity,
            cascade,
            time_signals,
        } => {
            let client = SerialClient::open(&config).await?;
            let capabilities = build_capabilities(humidity, cascade, time_signals);
            let mut chamber = Chamber::new(name, capabilities, Box::new(client));
            run_menu(&mut chamber, writer).await
        }
    }
}

async fn execute_tcp_command(args: TcpArgs, writer: &ConsoleWriter) -> ChamberResult<()> {
    let config = tcp_config_from_args(&args);

    match args.command {
        DeviceCommand::Send { commands } => {
            let mut client = TcpClient::open(&config).await?;

            // One command per round trip; the first failure aborts the batch
            // and earlier responses are discarded.
            let mut pairs: Vec<(String, Vec<u8>)> = Vec::with_capacity(commands.len());
            let mut failure = None;
            for command in commands {
                match client.interact(&command).await {
                    Ok(response) => pairs.push((command, response)),
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                }
            }
            client.close().await?;
            if let Some(e) = failure {
                return Err(e);
            }

            writer.write_responses(&pairs)?;
            Ok(())
        }
        DeviceCommand::Menu {
            name,
            humidity,
            cascade,
            time_signals,
        } => {
            let client = TcpClient::open(&config).await?;
            let capabilities = build_capabilities(humidity, cascade, time_signals);
            let mut chamber = Chamber::new(name, capabilities, Box::new(client));
            run_menu(&mut chamber, writer).await
        }
    }
}

fn serial_config_from_args(args: &SerialArgs) -> SerialConfig {
    let mut config = SerialConfig::new(&args.port);
    config.baud_rate = args.baud;
    config.data_bits = args.data_bits;
    config.stop_bits = args.stop_bits;
    config.parity = args.parity.clone().into();
    config.address = args.address;
    config.delimiter = args.delimiter.as_str().to_string();
    config.timeout_ms = args.timeout_ms;
    config
}

fn tcp_config_from_args(args: &TcpArgs) -> TcpConfig {
    let mut config = TcpConfig::new(&args.host);
    config.port = args.port;
    config.delimiter = args.delimiter.as_str().to_string();
    config.connect_timeout_ms = args.connect_timeout_ms;
    config.read_timeout_ms = args.timeout_ms;
    config
}

fn build_capabilities(humidity: bool, cascade: bool, time_signals: u8) -> Capabilities {
    let mut capabilities = if humidity {
        Capabilities::temperature_humidity()
    } else {
        Capabilities::temperature_only()
    };
    capabilities.cascade = cascade;
    capabilities.time_signals = time_signals;
    capabilities
}
