use crate::transport::{Transport, TransportError};
use crate::{Bundle, Message, codec};

/// Encodes packets and hands them to a transport for atomic delivery.
///
/// # Examples
/// ```no_run
/// use oscwire_core::{Message, OscClient, UdpTransport};
///
/// let transport = UdpTransport::connect("127.0.0.1:9000")?;
/// let mut client = OscClient::new(transport);
///
/// let mut msg = Message::new("/test");
/// msg.add_int32(-1);
/// client.send_message(&msg)?;
/// # Ok::<(), oscwire_core::TransportError>(())
/// ```
pub struct OscClient<T: Transport> {
    transport: T,
}

impl<T: Transport> OscClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn send_message(&mut self, message: &Message) -> Result<(), TransportError> {
        self.send_packet(&codec::encode_message(message))
    }

    pub fn send_bundle(&mut self, bundle: &Bundle) -> Result<(), TransportError> {
        self.send_packet(&codec::encode_bundle(bundle))
    }

    /// Hand pre-encoded bytes to the transport unchanged.
    pub fn send_packet(&mut self, packet: &[u8]) -> Result<(), TransportError> {
        self.transport.send(packet)
    }

    pub fn is_ready(&self) -> bool {
        self.transport.is_ready()
    }

    pub fn close(&mut self) {
        self.transport.close();
    }
}

#[cfg(test)]
mod tests {
    use super::OscClient;
    use crate::transport::{Transport, TransportError};
    use crate::{Bundle, Message, decode_packet};

    #[derive(Default)]
    struct CaptureTransport {
        sent: Vec<Vec<u8>>,
    }

    impl Transport for CaptureTransport {
        fn send(&mut self, packet: &[u8]) -> Result<(), TransportError> {
            self.sent.push(packet.to_vec());
            Ok(())
        }

        fn receive(&mut self, _buffer: &mut [u8]) -> Result<usize, TransportError> {
            Ok(0)
        }

        fn is_ready(&self) -> bool {
            true
        }

        fn close(&mut self) {}
    }

    #[test]
    fn send_message_encodes_before_transmitting() {
        let mut client = OscClient::new(CaptureTransport::default());
        let mut msg = Message::new("/test");
        msg.add_int32(5);
        client.send_message(&msg).unwrap();

        let sent = &client.transport.sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], msg.encode());
        assert!(decode_packet(&sent[0]).is_ok());
    }

    #[test]
    fn send_bundle_encodes_before_transmitting() {
        let mut client = OscClient::new(CaptureTransport::default());
        let mut bundle = Bundle::new();
        bundle.add_message(Message::new("/a"));
        client.send_bundle(&bundle).unwrap();

        let sent = &client.transport.sent;
        assert_eq!(sent[0], bundle.encode());
    }
}
