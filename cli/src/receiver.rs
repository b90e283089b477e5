//! Debug raw TCP receiver.
//!
//! Binds a port, accepts exactly one connection, captures every byte the peer sends
//! until it closes its write side, then answers with a bare `200 OK`. Used to eyeball
//! what an exporter actually puts on the wire (request line, headers and body).

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;

/// Response sent back to the peer once its request has been read.
pub const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\r\nOK";

/// Raw bytes captured from a single connection.
#[derive(Debug)]
pub struct Capture {
    /// Address of the peer.
    pub peer: SocketAddr,
    /// Everything the peer sent.
    pub data: Vec<u8>,
}

impl Capture {
    /// Returns the captured bytes as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

/// Accepts one connection on `addr` and captures it.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the connection fails.
pub async fn receive_once(addr: SocketAddr) -> Result<Capture> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    accept_once(&listener).await
}

/// Accepts one connection from an already bound listener and captures it.
///
/// # Errors
///
/// Returns an error if accepting or reading the connection fails.
pub async fn accept_once(listener: &TcpListener) -> Result<Capture> {
    let (mut stream, peer) = listener
        .accept()
        .await
        .context("Failed to accept connection")?;
    tracing::info!(%peer, "Connection received");

    let data = capture(&mut stream).await?;
    tracing::debug!(%peer, bytes = data.len(), "Connection closed by peer");

    Ok(Capture { peer, data })
}

/// Reads the stream until EOF, then writes [`OK_RESPONSE`].
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub async fn capture<S>(stream: &mut S) -> Result<Vec<u8>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut data = Vec::new();
    stream
        .read_to_end(&mut data)
        .await
        .context("Failed to read from peer")?;

    stream
        .write_all(OK_RESPONSE)
        .await
        .context("Failed to write response")?;
    stream.flush().await.context("Failed to flush response")?;

    Ok(data)
}
