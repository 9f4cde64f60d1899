use super::error::OscError;
use super::layout;

/// Bounds-checked cursor over one received packet.
///
/// Every read advances an internal offset and fails with
/// [`OscError::Truncated`] rather than passing the end of the slice.
/// Framing conventions (NUL-terminated padded strings, length-prefixed
/// padded blobs) live here so the parser never indexes bytes directly.
pub struct OscReader<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> OscReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.payload.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `len` bytes, advancing the cursor.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], OscError> {
        if len > self.remaining() {
            return Err(OscError::Truncated {
                needed: self.offset.saturating_add(len),
                actual: self.payload.len(),
            });
        }
        let bytes = &self.payload[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), OscError> {
        self.read_slice(len).map(|_| ())
    }

    pub fn read_u32_be(&mut self) -> Result<u32, OscError> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32_be(&mut self) -> Result<i32, OscError> {
        self.read_u32_be().map(|v| v as i32)
    }

    pub fn read_u64_be(&mut self) -> Result<u64, OscError> {
        let bytes = self.read_slice(8)?;
        Ok(u64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    pub fn read_i64_be(&mut self) -> Result<i64, OscError> {
        self.read_u64_be().map(|v| v as i64)
    }

    /// Raw IEEE-754 single-precision bit pattern, no value conversion.
    pub fn read_f32_be(&mut self) -> Result<f32, OscError> {
        self.read_u32_be().map(f32::from_bits)
    }

    /// Raw IEEE-754 double-precision bit pattern, no value conversion.
    pub fn read_f64_be(&mut self) -> Result<f64, OscError> {
        self.read_u64_be().map(f64::from_bits)
    }

    /// Read a framed string: bytes up to a NUL terminator, then skip the
    /// terminator and padding so the cursor lands on a 4-byte boundary
    /// relative to the string start.
    pub fn read_str(&mut self) -> Result<String, OscError> {
        let start = self.offset;
        let text_len = self.payload[start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| {
                OscError::MalformedPacket(format!("unterminated string at offset {start}"))
            })?;
        let value = String::from_utf8_lossy(&self.payload[start..start + text_len]).into_owned();

        let framed_len = text_len + 1;
        let end = start + framed_len + layout::align_pad(framed_len);
        if end > self.payload.len() {
            return Err(OscError::Truncated {
                needed: end,
                actual: self.payload.len(),
            });
        }
        self.offset = end;
        Ok(value)
    }

    /// Read a framed blob: u32 big-endian length, payload, then padding so
    /// the payload (prefix excluded) occupies a multiple of 4 bytes.
    pub fn read_blob(&mut self) -> Result<Vec<u8>, OscError> {
        let len = self.read_u32_be()? as usize;
        let bytes = self.read_slice(len)?.to_vec();
        self.skip(layout::align_pad(len))?;
        Ok(bytes)
    }

    /// Consume the 8-byte `#bundle` marker, failing with
    /// [`OscError::NotABundle`] on any mismatch (short input included).
    pub fn expect_bundle_marker(&mut self) -> Result<(), OscError> {
        let marker = self
            .read_slice(layout::BUNDLE_MARKER.len())
            .map_err(|_| OscError::NotABundle)?;
        if marker != layout::BUNDLE_MARKER {
            return Err(OscError::NotABundle);
        }
        Ok(())
    }
}

/// True when `payload` starts with the full 8-byte bundle marker.
pub fn starts_with_bundle_marker(payload: &[u8]) -> bool {
    payload.starts_with(layout::BUNDLE_MARKER)
}
