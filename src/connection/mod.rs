// src/connection/mod.rs

//! Owns the TCP connection to the control socket: connect with indefinite
//! fixed-delay retry, non-blocking reads, and line-framed writes.

use crate::core::protocol::LineCodec;
use crate::core::{OutboundCommand, RelayError};
use bytes::{Bytes, BytesMut};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::codec::Encoder;
use tracing::{debug, info, warn};

/// Outcome of a single non-blocking read attempt.
///
/// Distinguishing `WouldBlock` from `PeerClosed` is the crux of the read
/// path: the former is the expected steady-state condition, the latter is
/// the signal to tear down and reconnect.
#[derive(Debug)]
pub enum ReadOutcome {
    /// Bytes arrived; at most one chunk's worth per call.
    Data(Bytes),
    /// No data available right now. Not an error; retry on a later tick.
    WouldBlock,
    /// Zero-length read or hard I/O failure. The connection is dead.
    PeerClosed,
}

/// A live connection to the control socket.
///
/// Created only by [`Connection::connect`]; dropped on read failure or
/// shutdown, which closes the underlying socket.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    addr: SocketAddr,
    codec: LineCodec,
    read_buf: Vec<u8>,
}

impl Connection {
    /// Connects to `addr`, retrying indefinitely with a fixed `retry_delay`
    /// between attempts. This call only ever resolves to a live connection;
    /// a refusing endpoint is waited out, never escalated.
    pub async fn connect(addr: SocketAddr, retry_delay: Duration, read_chunk_size: usize) -> Self {
        info!("Connecting to {}...", addr);
        loop {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    info!("Connection established to {}", addr);
                    return Self {
                        stream,
                        addr,
                        codec: LineCodec,
                        read_buf: vec![0u8; read_chunk_size],
                    };
                }
                Err(e) => {
                    warn!(
                        "Connection to {} refused ({}), retrying in {:?}...",
                        addr, e, retry_delay
                    );
                    tokio::time::sleep(retry_delay).await;
                }
            }
        }
    }

    /// Performs one non-blocking read of at most one chunk. The chunk size
    /// bounds latency per loop iteration, not message size; reassembly of
    /// larger frames spans calls.
    pub fn poll_read(&mut self) -> ReadOutcome {
        match self.stream.try_read(&mut self.read_buf) {
            Ok(0) => ReadOutcome::PeerClosed,
            Ok(n) => ReadOutcome::Data(Bytes::copy_from_slice(&self.read_buf[..n])),
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => ReadOutcome::WouldBlock,
            Err(e) => {
                warn!("Read error on connection to {}: {}", self.addr, e);
                ReadOutcome::PeerClosed
            }
        }
    }

    /// Writes one complete frame (text plus delimiter). A failure here is
    /// fatal to the current connection and surfaces to the caller, which
    /// reconnects on the next loop iteration.
    pub async fn send_line(&mut self, line: &str) -> Result<(), RelayError> {
        let mut write_buf = BytesMut::with_capacity(line.len() + 1);
        self.codec.encode(line, &mut write_buf)?;
        self.stream.write_all(&write_buf).await?;
        Ok(())
    }

    /// Serializes a command to its wire line and sends it.
    pub async fn send_command(&mut self, command: &OutboundCommand) -> Result<(), RelayError> {
        let line = command.to_line()?;
        debug!("Sending command: {}", line);
        self.send_line(&line).await
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }
}
