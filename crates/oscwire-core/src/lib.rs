//! OSC (Open Sound Control) wire codec and UDP glue.
//!
//! This crate implements the OSC binary packet format used for low-latency
//! control messaging: type-tagged messages, time-tagged bundles (recursively
//! nested), and the top-level packet dispatch a server loop performs after
//! receiving a datagram. Encoding and decoding are pure, synchronous byte
//! transformations; all I/O is isolated behind the `transport` module and
//! the thin client/server glue built on top of it. Wire-format conventions
//! are captured in the codec's `layout` and `reader`/`writer` layers so the
//! parser and encoder stay minimal and consistent with each other.
//!
//! Invariants:
//! - Every encoded packet length is a multiple of 4.
//! - Decoding never reads past the provided length; truncated or malformed
//!   input fails with a recoverable [`OscError`], never a panic.
//! - Bundle recursion depth is capped on decode; pathological nesting is
//!   rejected instead of overflowing the call stack.
//!
//! # Examples
//! ```
//! use oscwire_core::{Message, Packet, Value};
//!
//! let mut msg = Message::new("/mixer/gain");
//! msg.add_int32(7);
//! msg.add_float32(0.5);
//! let bytes = msg.encode();
//! assert_eq!(bytes.len() % 4, 0);
//!
//! match Packet::decode(&bytes)? {
//!     Packet::Message(decoded) => {
//!         assert_eq!(decoded.arguments, vec![Value::Int32(7), Value::Float32(0.5)]);
//!     }
//!     Packet::Bundle(_) => unreachable!(),
//! }
//! # Ok::<(), oscwire_core::OscError>(())
//! ```

use serde::{Deserialize, Serialize};

mod client;
pub mod codec;
mod server;
pub mod transport;

pub use client::OscClient;
pub use codec::{
    OscError, decode_bundle, decode_message, decode_packet, encode_bundle, encode_message,
};
pub use server::{OscServer, ServerError};
pub use transport::{Transport, TransportError, UdpTransport};

/// Largest datagram accepted from or handed to a transport.
pub const MAX_PACKET_SIZE: usize = 65536;

/// Time tag value meaning "execute immediately" by OSC convention.
pub const TIMETAG_IMMEDIATE: u64 = 1;

/// One OSC argument.
///
/// Scalars travel big-endian; floats travel as their raw IEEE-754 bit
/// pattern. `Str` and `Blob` are framed and padded to 4-byte boundaries on
/// the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Blob(Vec<u8>),
    TimeTag(u64),
}

impl Value {
    /// Wire type tag character for this argument.
    pub fn tag(&self) -> char {
        match self {
            Value::Int32(_) => 'i',
            Value::Int64(_) => 'h',
            Value::Float32(_) => 'f',
            Value::Float64(_) => 'd',
            Value::Str(_) => 's',
            Value::Blob(_) => 'b',
            Value::TimeTag(_) => 't',
        }
    }
}

/// One OSC message: an address pattern, a type-tag string, and positional
/// arguments.
///
/// The `add_*` methods append one tag character and one argument together,
/// so `tags.len() - 1 == arguments.len()` holds for any message built
/// through them. A decoded message derives `tags` from the wire instead.
///
/// # Examples
/// ```
/// use oscwire_core::Message;
///
/// let mut msg = Message::new("/test");
/// msg.add_int32(-1);
/// msg.add_str("hello");
/// assert_eq!(msg.tags, ",is");
/// assert_eq!(msg.arguments.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// OSC address pattern (e.g. `/mixer/gain`). The codec treats it as an
    /// opaque framed string; pattern matching belongs to the host.
    pub address: String,
    /// Type-tag string; always starts with `,`.
    pub tags: String,
    /// Arguments in wire order, positionally correlated with `tags`.
    pub arguments: Vec<Value>,
}

impl Message {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            tags: String::from(","),
            arguments: Vec::new(),
        }
    }

    /// Drop all arguments, keeping the address.
    pub fn clear(&mut self) {
        self.tags.clear();
        self.tags.push(',');
        self.arguments.clear();
    }

    fn push(&mut self, value: Value) {
        self.tags.push(value.tag());
        self.arguments.push(value);
    }

    pub fn add_int32(&mut self, value: i32) {
        self.push(Value::Int32(value));
    }

    pub fn add_int64(&mut self, value: i64) {
        self.push(Value::Int64(value));
    }

    pub fn add_float32(&mut self, value: f32) {
        self.push(Value::Float32(value));
    }

    pub fn add_float64(&mut self, value: f64) {
        self.push(Value::Float64(value));
    }

    pub fn add_str(&mut self, value: impl Into<String>) {
        self.push(Value::Str(value.into()));
    }

    pub fn add_blob(&mut self, value: impl Into<Vec<u8>>) {
        self.push(Value::Blob(value.into()));
    }

    pub fn add_timetag(&mut self, value: u64) {
        self.push(Value::TimeTag(value));
    }

    /// Encode into OSC wire bytes. Never fails for API-built messages.
    pub fn encode(&self) -> Vec<u8> {
        codec::encode_message(self)
    }

    /// Decode a single message from one already-delimited packet.
    pub fn decode(payload: &[u8]) -> Result<Self, OscError> {
        codec::decode_message(payload)
    }
}

/// A time-tagged, atomically-delivered group of messages and nested bundles.
///
/// The wire representation writes all child messages first, then all child
/// bundles, each as a `{u32 length, bytes}` pair; a single interleaved child
/// order does not survive encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// NTP-style execution time; [`TIMETAG_IMMEDIATE`] means "now".
    pub timetag: u64,
    pub messages: Vec<Message>,
    pub bundles: Vec<Bundle>,
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl Bundle {
    pub fn new() -> Self {
        Self {
            timetag: TIMETAG_IMMEDIATE,
            messages: Vec::new(),
            bundles: Vec::new(),
        }
    }

    pub fn with_timetag(timetag: u64) -> Self {
        Self {
            timetag,
            ..Self::new()
        }
    }

    /// Drop all children and reset the time tag to "immediately".
    pub fn clear(&mut self) {
        self.messages.clear();
        self.bundles.clear();
        self.timetag = TIMETAG_IMMEDIATE;
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn add_bundle(&mut self, bundle: Bundle) {
        self.bundles.push(bundle);
    }

    /// Encode into OSC wire bytes, `#bundle` marker and time tag included.
    pub fn encode(&self) -> Vec<u8> {
        codec::encode_bundle(self)
    }

    /// Decode a bundle from one already-delimited packet. Fails with
    /// [`OscError::NotABundle`] when the marker is absent.
    pub fn decode(payload: &[u8]) -> Result<Self, OscError> {
        codec::decode_bundle(payload)
    }
}

/// A decoded top-level packet: either a single message or a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Packet {
    Message(Message),
    Bundle(Bundle),
}

impl Packet {
    /// Classify and decode a received packet: bundle when the first 8 bytes
    /// are the `#bundle` marker, message otherwise.
    pub fn decode(payload: &[u8]) -> Result<Self, OscError> {
        codec::decode_packet(payload)
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Packet::Message(message) => message.encode(),
            Packet::Bundle(bundle) => bundle.encode(),
        }
    }
}
