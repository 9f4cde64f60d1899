/// Eight-byte packet discriminator: the ASCII text `#bundle` plus one NUL.
pub const BUNDLE_MARKER: &[u8; 8] = b"#bundle\0";

/// Marker (8 bytes) plus big-endian time tag (8 bytes).
pub const BUNDLE_HEADER_LEN: usize = 16;

/// Type-tag strings start with this marker character.
pub const TAG_MARKER: char = ',';

/// Maximum bundle nesting accepted by the decoder. Deeper input is
/// rejected as malformed instead of recursing further.
pub const MAX_BUNDLE_DEPTH: usize = 32;

/// Zero bytes needed to bring `n` up to a multiple of 4.
pub const fn align_pad(n: usize) -> usize {
    (4 - n % 4) % 4
}
