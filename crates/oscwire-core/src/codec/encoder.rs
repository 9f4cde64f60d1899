use crate::{Bundle, Message, Value};

use super::layout;
use super::writer::OscWriter;

/// Encode a message: framed address, framed tag string, then each
/// argument's raw payload in order. No outer length prefix is written;
/// message length is implied by the packet (or by a bundle child prefix).
pub fn encode_message(message: &Message) -> Vec<u8> {
    let mut writer = OscWriter::new();
    write_message(&mut writer, message);
    writer.into_bytes()
}

/// Encode a bundle: 8-byte `#bundle` marker, 8-byte big-endian time tag,
/// then every child message and every child bundle as a `{u32 length,
/// bytes}` pair. All messages are written before any bundle; the two-phase
/// order is part of the wire contract.
pub fn encode_bundle(bundle: &Bundle) -> Vec<u8> {
    let mut writer = OscWriter::new();
    write_bundle(&mut writer, bundle);
    writer.into_bytes()
}

fn write_message(writer: &mut OscWriter, message: &Message) {
    writer.put_str(&message.address);
    writer.put_str(&message.tags);
    for argument in &message.arguments {
        match argument {
            Value::Int32(v) => writer.put_i32_be(*v),
            Value::Int64(v) => writer.put_i64_be(*v),
            Value::Float32(v) => writer.put_f32_be(*v),
            Value::Float64(v) => writer.put_f64_be(*v),
            Value::Str(v) => writer.put_str(v),
            Value::Blob(v) => writer.put_blob(v),
            Value::TimeTag(v) => writer.put_u64_be(*v),
        }
    }
}

fn write_bundle(writer: &mut OscWriter, bundle: &Bundle) {
    writer.put_raw(layout::BUNDLE_MARKER);
    writer.put_u64_be(bundle.timetag);

    for message in &bundle.messages {
        let encoded = encode_message(message);
        writer.put_u32_be(encoded.len() as u32);
        writer.put_raw(&encoded);
    }
    for child in &bundle.bundles {
        let encoded = encode_bundle(child);
        writer.put_u32_be(encoded.len() as u32);
        writer.put_raw(&encoded);
    }
}
