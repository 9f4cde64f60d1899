use thiserror::Error;

use crate::transport::{Transport, TransportError};
use crate::{Bundle, MAX_PACKET_SIZE, Message, Packet, codec};

type MessageHandler = Box<dyn FnMut(&Message)>;
type BundleHandler = Box<dyn FnMut(&Bundle)>;

/// Errors returned by [`OscServer::process_one`] and
/// [`OscServer::process_all`].
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("decode error: {0}")]
    Decode(#[from] codec::OscError),
}

/// Receives datagrams, decodes them, and routes the results to handlers.
///
/// The receive buffer is owned by the server value and sized to
/// [`MAX_PACKET_SIZE`]; no process-wide state is involved. A decode
/// failure is returned to the caller with the server left fully usable,
/// so a host loop can log the bad packet and keep going.
pub struct OscServer<T: Transport> {
    transport: T,
    buffer: Vec<u8>,
    message_handler: Option<MessageHandler>,
    bundle_handler: Option<BundleHandler>,
}

impl<T: Transport> OscServer<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            buffer: vec![0; MAX_PACKET_SIZE],
            message_handler: None,
            bundle_handler: None,
        }
    }

    /// Called once per decoded message, child messages of bundles included.
    pub fn set_message_handler(&mut self, handler: impl FnMut(&Message) + 'static) {
        self.message_handler = Some(Box::new(handler));
    }

    /// Called once per decoded bundle, nested bundles included.
    pub fn set_bundle_handler(&mut self, handler: impl FnMut(&Bundle) + 'static) {
        self.bundle_handler = Some(Box::new(handler));
    }

    /// Receive and dispatch one packet. Returns `Ok(false)` when no
    /// datagram is pending.
    pub fn process_one(&mut self) -> Result<bool, ServerError> {
        let received = self.transport.receive(&mut self.buffer)?;
        if received == 0 {
            return Ok(false);
        }

        match codec::decode_packet(&self.buffer[..received])? {
            Packet::Message(message) => {
                if let Some(handler) = &mut self.message_handler {
                    handler(&message);
                }
            }
            Packet::Bundle(bundle) => {
                dispatch_bundle(&bundle, &mut self.message_handler, &mut self.bundle_handler);
            }
        }
        Ok(true)
    }

    /// Drain every pending datagram, returning how many were dispatched.
    pub fn process_all(&mut self) -> Result<usize, ServerError> {
        let mut count = 0;
        while self.process_one()? {
            count += 1;
        }
        Ok(count)
    }
}

/// Bundles re-invoke the message handler for each child message and the
/// bundle handler for each child bundle. Recursion depth is bounded by the
/// decoder's nesting cap.
fn dispatch_bundle(
    bundle: &Bundle,
    message_handler: &mut Option<MessageHandler>,
    bundle_handler: &mut Option<BundleHandler>,
) {
    if let Some(handler) = bundle_handler {
        handler(bundle);
    }
    if let Some(handler) = message_handler {
        for message in &bundle.messages {
            handler(message);
        }
    }
    for child in &bundle.bundles {
        dispatch_bundle(child, message_handler, bundle_handler);
    }
}
