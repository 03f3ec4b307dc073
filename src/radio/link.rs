//! Trait abstraction for serial link operations to enable testing

use async_trait::async_trait;
use std::io;

/// Trait for radio link I/O operations
#[async_trait]
pub trait LinkIO: Send {
    /// Whether the underlying device is currently open
    fn is_open(&self) -> bool;

    /// Write all data to the link
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Flush the output buffer
    async fn flush(&mut self) -> io::Result<()>;
}

/// Wrapper around tokio_serial::SerialStream that implements LinkIO
pub struct TokioSerialLink {
    port: tokio_serial::SerialStream,
}

impl TokioSerialLink {
    pub fn new(port: tokio_serial::SerialStream) -> Self {
        Self { port }
    }
}

#[async_trait]
impl LinkIO for TokioSerialLink {
    fn is_open(&self) -> bool {
        // The stream exists only while the device is open; it is held for
        // the process lifetime and never closed mid-run.
        true
    }

    async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.port.write_all(data).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.port.flush().await
    }
}
