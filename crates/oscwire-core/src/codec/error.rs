use thiserror::Error;

/// Errors returned by OSC packet decoding.
///
/// Every failure is local to the decode call that produced it; no state
/// outlives the call. Encoding has no error path: anything constructible
/// through the message/bundle API is always encodable.
///
/// # Examples
/// ```
/// use oscwire_core::OscError;
///
/// let err = OscError::Truncated { needed: 8, actual: 4 };
/// assert!(err.to_string().contains("truncated"));
/// ```
#[derive(Debug, Error)]
pub enum OscError {
    /// Structurally invalid framing: missing string terminator, bad tag
    /// string, unknown type tag, or excessive bundle nesting.
    #[error("malformed packet: {0}")]
    MalformedPacket(String),
    /// A read or declared length would pass the end of the packet.
    #[error("truncated packet: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    /// Bundle decode was invoked on bytes that do not start with the
    /// `#bundle` marker.
    #[error("packet is not a bundle")]
    NotABundle,
}
