//! Transport abstraction and UDP implementation.
//!
//! The codec performs no I/O; a [`Transport`] hands whole datagrams in and
//! out, one packet per call. `receive` is non-blocking and reports 0 bytes
//! when nothing is pending, so server loops can poll without stalling.
//! OSC offers no delivery guarantee at this layer: no retransmission, no
//! ordering, no flow control.

mod udp;

pub use udp::UdpTransport;

use thiserror::Error;

/// Errors returned by transports.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("transport is closed")]
    Closed,
    #[error("packet of {size} bytes exceeds the {max} byte limit")]
    Oversized { size: usize, max: usize },
}

/// A datagram source and sink for already-delimited packets.
pub trait Transport {
    /// Transmit one fully-encoded packet atomically.
    fn send(&mut self, packet: &[u8]) -> Result<(), TransportError>;

    /// Receive one packet into `buffer`, returning its length, or 0 when no
    /// datagram is pending.
    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError>;

    fn is_ready(&self) -> bool;

    fn close(&mut self);
}
