use crate::cli::args::OutputFormat;
use crate::core::chamber::Capabilities;
use serde_json;
use std::io;
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_response(&self, command: &str, response: &[u8]) -> Result<(), OutputError>;
    fn write_responses(&self, pairs: &[(String, Vec<u8>)]) -> Result<(), OutputError>;
    fn write_codes(&self, codes: &[(&str, &str)]) -> Result<(), OutputError>;
    fn write_capabilities(&self, name: &str, capabilities: &Capabilities)
        -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::ChamberError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_response(&self, command: &str, response: &[u8]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                println!("{}", String::from_utf8_lossy(response));
            }
            OutputFormat::Hex => {
                println!("{}", hex::encode(response));
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "command": command,
                    "response": String::from_utf8_lossy(response),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                let table = Table::new(vec![ResponseRow {
                    command: command.to_string(),
                    response: String::from_utf8_lossy(response).into_owned(),
                }]);
                println!("{}", table);
            }
        }
        Ok(())
    }

    fn write_responses(&self, pairs: &[(String, Vec<u8>)]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                for (_, response) in pairs {
                    println!("{}", String::from_utf8_lossy(response));
                }
            }
            OutputFormat::Hex => {
                for (_, response) in pairs {
                    println!("{}", hex::encode(response));
                }
            }
            OutputFormat::Json => {
                let output: Vec<_> = pairs
                    .iter()
                    .map(|(command, response)| {
                        serde_json::json!({
                            "command": command,
                            "response": String::from_utf8_lossy(response),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                if !pairs.is_empty() {
                    let table_data: Vec<ResponseRow> = pairs.iter().map(ResponseRow::from).collect();
                    let table = Table::new(table_data);
                    println!("{}", table);
                }
            }
        }
        Ok(())
    }

    fn write_codes(&self, codes: &[(&str, &str)]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output: Vec<_> = codes
                    .iter()
                    .map(|(code, description)| {
                        serde_json::json!({
                            "code": code,
                            "description": description,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                if !codes.is_empty() {
                    let table_data: Vec<CodeRow> = codes.iter().map(CodeRow::from).collect();
                    let table = Table::new(table_data);
                    println!("{}", table);
                }
            }
            _ => {
                for (code, description) in codes {
                    println!("{}: {}", code, description);
                }
            }
        }
        Ok(())
    }

    fn write_capabilities(
        &self,
        name: &str,
        capabilities: &Capabilities,
    ) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "name": name,
                    "capabilities": capabilities,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            _ => {
                println!("{}: {}", name, capabilities.summary());
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "message": message,
                    "level": "info"
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            _ => {
                println!("{}", message);
            }
        }
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "error": error,
                    "level": "error"
                });
                eprintln!("{}", serde_json::to_string_pretty(&output)?);
            }
            _ => {
                eprintln!("Error: {}", error);
            }
        }
        Ok(())
    }
}

/// Table row for a command/response pair
#[derive(Tabled)]
struct ResponseRow {
    command: String,
    response: String,
}

impl From<&(String, Vec<u8>)> for ResponseRow {
    fn from(pair: &(String, Vec<u8>)) -> Self {
        Self {
            command: pair.0.clone(),
            response: String::from_utf8_lossy(&pair.1).into_owned(),
        }
    }
}

/// Table row for an error code entry
#[derive(Tabled)]
struct CodeRow {
    code: String,
    description: String,
}

impl From<&(&str, &str)> for CodeRow {
    fn from(entry: &(&str, &str)) -> Self {
        Self {
            code: entry.0.to_string(),
            description: entry.1.to_string(),
        }
    }
}
