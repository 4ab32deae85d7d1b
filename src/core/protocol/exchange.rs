use crate::core::protocol::error_codes::describe;
use crate::core::protocol::framing::{error_code, frame_command};
use crate::domain::error::{ChamberError, ChamberResult};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

/// Framed request/response engine shared by the serial and TCP transports
///
/// Writes one delimited command at a time and accumulates the reply byte by
/// byte until the buffer ends with the delimiter. Each single-byte read is
/// bounded by the configured timeout; there are no retries at this layer.
pub struct Exchange<T> {
    io_handle: T,
    delimiter: String,
    read_timeout: Duration,
}

impl<T> Exchange<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(io_handle: T, delimiter: &str, read_timeout: Duration) -> Self {
        Self {
            io_handle,
            delimiter: delimiter.to_string(),
            read_timeout,
        }
    }

    /// Send a command and return its delimiter-stripped response
    ///
    /// A controller error reply (`NA:` prefix) fails the call with
    /// [`ChamberError::Protocol`]; silence longer than the timeout fails it
    /// with [`ChamberError::Timeout`].
    pub async fn transact(&mut self, command: &str, address: Option<u8>) -> ChamberResult<Vec<u8>> {
        let frame = frame_command(command, address, &self.delimiter);
        self.io_handle.write_all(&frame).await?;
        self.io_handle.flush().await?;
        debug!("Sent {} bytes", frame.len());

        let mut recv: Vec<u8> = Vec::new();
        while !recv.ends_with(self.delimiter.as_bytes()) {
            let mut byte = [0u8; 1];
            let n = tokio::time::timeout(self.read_timeout, self.io_handle.read(&mut byte))
                .await
                .map_err(|_| ChamberError::Timeout)??;
            if n == 0 {
                // EOF before the delimiter reads the same as silence
                return Err(ChamberError::Timeout);
            }
            recv.push(byte[0]);
        }
        recv.truncate(recv.len() - self.delimiter.len());
        trace!("Received {} byte payload", recv.len());

        if let Some(code) = error_code(&recv) {
            let description = describe(&code).to_string();
            return Err(ChamberError::Protocol {
                command: command.to_string(),
                code,
                description,
            });
        }
        Ok(recv)
    }

    /// Send a batch of commands in order, aborting on the first failure
    ///
    /// Responses collected before the failing command are discarded.
    pub async fn transact_all<S>(
        &mut self,
        commands: &[S],
        address: Option<u8>,
    ) -> ChamberResult<Vec<Vec<u8>>>
    where
        S: AsRef<str>,
    {
        let mut responses = Vec::with_capacity(commands.len());
        for command in commands {
            responses.push(self.transact(command.as_ref(), address).await?);
        }
        Ok(responses)
    }

    /// Consume the engine and hand back the underlying stream
    pub fn into_inner(self) -> T {
        self.io_handle
    }
}
