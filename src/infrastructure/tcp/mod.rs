// TCP module - TCP chamber link
pub mod client;

pub use client::TcpClient;
