use crate::{Bundle, Message, Packet, Value};

use super::error::OscError;
use super::layout;
use super::reader::{OscReader, starts_with_bundle_marker};

/// Classify and decode one received packet.
///
/// A packet whose first 8 bytes equal the `#bundle` marker is decoded as a
/// bundle; anything else (fewer than 8 bytes included) is decoded as a
/// single message. This is the entry point a server loop calls per
/// datagram.
pub fn decode_packet(payload: &[u8]) -> Result<Packet, OscError> {
    if starts_with_bundle_marker(payload) {
        decode_bundle(payload).map(Packet::Bundle)
    } else {
        decode_message(payload).map(Packet::Message)
    }
}

/// Decode a single message from one already-delimited packet.
pub fn decode_message(payload: &[u8]) -> Result<Message, OscError> {
    let mut reader = OscReader::new(payload);
    let address = reader.read_str()?;
    let tags = reader.read_str()?;

    let Some(tag_chars) = tags.strip_prefix(layout::TAG_MARKER) else {
        return Err(OscError::MalformedPacket(format!(
            "tag string {tags:?} does not start with '{}'",
            layout::TAG_MARKER
        )));
    };

    let mut arguments = Vec::new();
    for tag in tag_chars.chars() {
        let value = match tag {
            'i' => Some(Value::Int32(reader.read_i32_be()?)),
            'h' => Some(Value::Int64(reader.read_i64_be()?)),
            'f' => Some(Value::Float32(reader.read_f32_be()?)),
            'd' => Some(Value::Float64(reader.read_f64_be()?)),
            's' | 'S' => Some(Value::Str(reader.read_str()?)),
            'b' => Some(Value::Blob(reader.read_blob()?)),
            't' => Some(Value::TimeTag(reader.read_u64_be()?)),
            // Character, RGBA color and MIDI message each occupy 4 bytes
            // on the wire; the payload is discarded.
            'c' | 'r' | 'm' => {
                reader.skip(4)?;
                None
            }
            other => {
                return Err(OscError::MalformedPacket(format!(
                    "unknown type tag '{other}'"
                )));
            }
        };
        if let Some(value) = value {
            arguments.push(value);
        }
    }

    Ok(Message {
        address,
        tags,
        arguments,
    })
}

/// Decode a bundle from one already-delimited packet.
pub fn decode_bundle(payload: &[u8]) -> Result<Bundle, OscError> {
    decode_bundle_at_depth(payload, 0)
}

fn decode_bundle_at_depth(payload: &[u8], depth: usize) -> Result<Bundle, OscError> {
    if depth >= layout::MAX_BUNDLE_DEPTH {
        return Err(OscError::MalformedPacket(format!(
            "bundle nesting exceeds depth {}",
            layout::MAX_BUNDLE_DEPTH
        )));
    }

    let mut reader = OscReader::new(payload);
    reader.expect_bundle_marker()?;
    let timetag = reader.read_u64_be()?;

    let mut bundle = Bundle::with_timetag(timetag);
    while !reader.is_empty() {
        let len = reader.read_u32_be()? as usize;
        let child = reader.read_slice(len)?;
        // Children arrive in wire order; each is classified by its own
        // header, not by position.
        if starts_with_bundle_marker(child) {
            bundle.bundles.push(decode_bundle_at_depth(child, depth + 1)?);
        } else {
            bundle.messages.push(decode_message(child)?);
        }
    }

    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::{decode_bundle, decode_message, decode_packet};
    use crate::codec::error::OscError;
    use crate::codec::layout;
    use crate::{Packet, Value};

    fn message_bytes(address: &str, tags: &str, payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for part in [address, tags] {
            bytes.extend_from_slice(part.as_bytes());
            bytes.push(0);
            bytes.resize(bytes.len() + layout::align_pad(part.len() + 1), 0);
        }
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn decode_int_and_float() {
        let bytes = message_bytes(
            "/test",
            ",if",
            &[0xFF, 0xFF, 0xFF, 0xFF, 0xBF, 0x00, 0x00, 0x00],
        );
        let msg = decode_message(&bytes).unwrap();
        assert_eq!(msg.address, "/test");
        assert_eq!(msg.tags, ",if");
        assert_eq!(
            msg.arguments,
            vec![Value::Int32(-1), Value::Float32(-0.5)]
        );
    }

    #[test]
    fn decode_int64_is_materialized() {
        // ",hi": the h argument must land in `arguments` so tags and
        // arguments stay positionally aligned for the trailing i.
        let mut payload = Vec::new();
        payload.extend_from_slice(&(-2i64).to_be_bytes());
        payload.extend_from_slice(&7i32.to_be_bytes());
        let bytes = message_bytes("/x", ",hi", &payload);

        let msg = decode_message(&bytes).unwrap();
        assert_eq!(msg.arguments, vec![Value::Int64(-2), Value::Int32(7)]);
    }

    #[test]
    fn decode_skipped_tags_advance_four_bytes() {
        // c, r and m carry 4 bytes each but produce no argument; the i
        // after them must still decode from the right offset.
        let mut payload = vec![0u8; 12];
        payload.extend_from_slice(&42i32.to_be_bytes());
        let bytes = message_bytes("/x", ",crmi", &payload);

        let msg = decode_message(&bytes).unwrap();
        assert_eq!(msg.tags, ",crmi");
        assert_eq!(msg.arguments, vec![Value::Int32(42)]);
    }

    #[test]
    fn decode_unknown_tag_is_malformed() {
        let bytes = message_bytes("/x", ",q", &[]);
        let err = decode_message(&bytes).unwrap_err();
        assert!(matches!(err, OscError::MalformedPacket(_)));
        assert!(err.to_string().contains("unknown type tag"));
    }

    #[test]
    fn decode_tag_string_without_marker_is_malformed() {
        let bytes = message_bytes("/x", "if", &[0u8; 8]);
        let err = decode_message(&bytes).unwrap_err();
        assert!(matches!(err, OscError::MalformedPacket(_)));
    }

    #[test]
    fn decode_all_zero_packet_is_malformed() {
        // Four NULs frame an empty address but leave nothing for the tag
        // string terminator scan.
        let err = decode_message(&[0u8; 4]).unwrap_err();
        assert!(matches!(err, OscError::MalformedPacket(_)));
    }

    #[test]
    fn decode_argument_past_end_is_truncated() {
        let bytes = message_bytes("/x", ",i", &[0x00, 0x01]);
        let err = decode_message(&bytes).unwrap_err();
        assert!(matches!(err, OscError::Truncated { .. }));
    }

    #[test]
    fn decode_bundle_on_message_bytes_is_not_a_bundle() {
        let bytes = message_bytes("/x", ",", &[]);
        let err = decode_bundle(&bytes).unwrap_err();
        assert!(matches!(err, OscError::NotABundle));

        let err = decode_bundle(&[0u8; 4]).unwrap_err();
        assert!(matches!(err, OscError::NotABundle));
    }

    #[test]
    fn decode_bundle_child_length_past_end_is_truncated() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(layout::BUNDLE_MARKER);
        bytes.extend_from_slice(&1u64.to_be_bytes());
        bytes.extend_from_slice(&64u32.to_be_bytes());
        bytes.extend_from_slice(&[0u8; 8]);

        let err = decode_bundle(&bytes).unwrap_err();
        assert!(matches!(err, OscError::Truncated { .. }));
    }

    #[test]
    fn decode_bundle_nesting_past_cap_is_malformed() {
        // Innermost bundle, wrapped MAX_BUNDLE_DEPTH more times.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(layout::BUNDLE_MARKER);
        bytes.extend_from_slice(&1u64.to_be_bytes());
        for _ in 0..layout::MAX_BUNDLE_DEPTH {
            let mut outer = Vec::new();
            outer.extend_from_slice(layout::BUNDLE_MARKER);
            outer.extend_from_slice(&1u64.to_be_bytes());
            outer.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            outer.extend_from_slice(&bytes);
            bytes = outer;
        }

        let err = decode_bundle(&bytes).unwrap_err();
        assert!(matches!(err, OscError::MalformedPacket(_)));
        assert!(err.to_string().contains("nesting"));
    }

    #[test]
    fn packet_dispatch_classifies_by_marker() {
        let msg_bytes = message_bytes("/x", ",", &[]);
        assert!(matches!(
            decode_packet(&msg_bytes).unwrap(),
            Packet::Message(_)
        ));

        let mut bundle_bytes = Vec::new();
        bundle_bytes.extend_from_slice(layout::BUNDLE_MARKER);
        bundle_bytes.extend_from_slice(&1u64.to_be_bytes());
        assert!(matches!(
            decode_packet(&bundle_bytes).unwrap(),
            Packet::Bundle(_)
        ));

        // Fewer than 8 bytes can never be a bundle.
        assert!(decode_packet(b"#bun").is_err());
    }
}
