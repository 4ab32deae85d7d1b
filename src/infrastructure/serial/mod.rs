// Serial module - Serial chamber link
pub mod client;

pub use client::SerialClient;
