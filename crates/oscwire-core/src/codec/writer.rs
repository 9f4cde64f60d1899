use super::layout;

/// Padded big-endian wire writer.
///
/// Mirrors [`super::reader::OscReader`]: every `put_*` emits exactly the
/// bytes the matching `read_*` consumes, padding included, so encoded
/// output is always 4-byte aligned.
pub struct OscWriter {
    buffer: Vec<u8>,
}

impl Default for OscWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OscWriter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(512),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn put_u32_be(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_i32_be(&mut self, value: i32) {
        self.put_u32_be(value as u32);
    }

    pub fn put_u64_be(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_i64_be(&mut self, value: i64) {
        self.put_u64_be(value as u64);
    }

    /// Raw IEEE-754 single-precision bit pattern, no value conversion.
    pub fn put_f32_be(&mut self, value: f32) {
        self.put_u32_be(value.to_bits());
    }

    /// Raw IEEE-754 double-precision bit pattern, no value conversion.
    pub fn put_f64_be(&mut self, value: f64) {
        self.put_u64_be(value.to_bits());
    }

    /// Framed string: bytes, NUL terminator, then padding to 4 bytes.
    pub fn put_str(&mut self, value: &str) {
        self.buffer.extend_from_slice(value.as_bytes());
        self.buffer.push(0);
        let pad = layout::align_pad(value.len() + 1);
        self.buffer.resize(self.buffer.len() + pad, 0);
    }

    /// Framed blob: u32 big-endian length, payload, then payload padding to
    /// 4 bytes. The length prefix itself is never padded.
    pub fn put_blob(&mut self, value: &[u8]) {
        self.put_u32_be(value.len() as u32);
        self.buffer.extend_from_slice(value);
        let pad = layout::align_pad(value.len());
        self.buffer.resize(self.buffer.len() + pad, 0);
    }
}
