//! OSC wire codec.
//!
//! The codec follows a layered structure:
//! - `layout`: wire constants and alignment rules (source of truth)
//! - `reader`/`writer`: safe byte access and padded framing
//! - `parser`/`encoder`: domain-level decoding and encoding
//! - `error`: explicit, actionable errors
//!
//! Encoding and decoding are pure and contain no I/O; transports and the
//! client/server glue handle sockets and dispatch. Every decode call is
//! reentrant and self-contained over its input slice.

pub mod encoder;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use encoder::{encode_bundle, encode_message};
pub use error::OscError;
pub use parser::{decode_bundle, decode_message, decode_packet};
