use std::io::{self, Write};

use super::BValue;

/// Encode a `BValue` into canonical bencode.
///
/// Dictionary keys are emitted in ascending raw byte order, whatever order the map holds them in.
pub fn encode_bvalue(value: &BValue) -> Vec<u8> {
	let mut out: Vec<u8> = Vec::new();
	write_bvalue(value, &mut out);
	out
}

/// Streams the canonical encoding of `value` into `writer`.
pub fn encode_to<W: Write>(value: &BValue, writer: &mut W) -> io::Result<()> {
	writer.write_all(&encode_bvalue(value))
}

fn write_bytes(bytes: &[u8], out: &mut Vec<u8>) {
	out.extend_from_slice(bytes.len().to_string().as_bytes());
	out.push(b':');
	out.extend_from_slice(bytes);
}

fn write_bvalue(value: &BValue, out: &mut Vec<u8>) {
	match value {
		BValue::Integer(i) => {
			out.push(b'i');
			out.extend_from_slice(i.to_string().as_bytes());
			out.push(b'e');
		}
		BValue::ByteString(bytes) => write_bytes(bytes, out),
		BValue::List(items) => {
			out.push(b'l');
			for item in items {
				write_bvalue(item, out);
			}
			out.push(b'e');
		}
		BValue::Dict(dict) => {
			out.push(b'd');
			// Vec<u8> orders lexicographically by byte, which is the canonical order
			let mut entries: Vec<(&Vec<u8>, &BValue)> = dict.iter().collect();
			entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
			for (key, val) in entries {
				write_bytes(key, out);
				write_bvalue(val, out);
			}
			out.push(b'e');
		}
	}
}
