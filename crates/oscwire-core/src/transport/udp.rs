use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use super::{Transport, TransportError};
use crate::MAX_PACKET_SIZE;

/// Datagram transport over a non-blocking UDP socket.
///
/// Clients connect to a peer and use [`Transport::send`]; servers bind a
/// local port and poll [`Transport::receive`]. A closed transport fails
/// every subsequent call with [`TransportError::Closed`].
pub struct UdpTransport {
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    /// Connect a client socket to `addr` (e.g. `"127.0.0.1:9000"`).
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(addr)?;
        socket.set_nonblocking(true)?;
        Ok(Self {
            socket: Some(socket),
        })
    }

    /// Bind a server socket on `0.0.0.0:port`. Port 0 picks an ephemeral
    /// port; see [`UdpTransport::local_addr`].
    pub fn bind(port: u16) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(("0.0.0.0", port))?;
        socket.set_nonblocking(true)?;
        Ok(Self {
            socket: Some(socket),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket()?.local_addr()?)
    }

    fn socket(&self) -> Result<&UdpSocket, TransportError> {
        self.socket.as_ref().ok_or(TransportError::Closed)
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, packet: &[u8]) -> Result<(), TransportError> {
        if packet.len() > MAX_PACKET_SIZE {
            return Err(TransportError::Oversized {
                size: packet.len(),
                max: MAX_PACKET_SIZE,
            });
        }
        self.socket()?.send(packet)?;
        Ok(())
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        match self.socket()?.recv(buffer) {
            Ok(received) => Ok(received),
            Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(0),
            Err(err) => Err(err.into()),
        }
    }

    fn is_ready(&self) -> bool {
        self.socket.is_some()
    }

    fn close(&mut self) {
        self.socket = None;
    }
}
