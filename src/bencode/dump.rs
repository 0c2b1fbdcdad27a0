use std::fmt::{self, Write};

use super::BValue;

/// Renders a value as an indented, human-readable trace.
///
/// Diagnostic only. Byte strings print as text when they are printable UTF-8,
/// otherwise as hex. Dictionary keys are listed in sorted order.
pub fn dump(value: &BValue) -> String {
	let mut out = String::new();
	// Writing into a String cannot fail.
	let _ = write_value(&mut out, value, 0);
	out
}

fn render_bytes(bytes: &[u8]) -> String {
	match std::str::from_utf8(bytes) {
		Ok(text) if !text.chars().any(char::is_control) => format!("{:?}", text),
		_ => format!("<{} bytes: {}>", bytes.len(), hex::encode(bytes)),
	}
}

fn write_value<W: Write>(out: &mut W, value: &BValue, indent: usize) -> fmt::Result {
	let pad = "  ".repeat(indent);
	match value {
		BValue::ByteString(bytes) => writeln!(out, "{}{}", pad, render_bytes(bytes)),
		BValue::Integer(i) => writeln!(out, "{}{}", pad, i),
		BValue::List(items) => {
			writeln!(out, "{}list ({} items)", pad, items.len())?;
			for item in items {
				write_value(out, item, indent + 1)?;
			}
			Ok(())
		}
		BValue::Dict(map) => {
			writeln!(out, "{}dict ({} entries)", pad, map.len())?;
			let mut keys: Vec<&Vec<u8>> = map.keys().collect();
			keys.sort();
			for key in keys {
				writeln!(out, "{}  {}:", pad, render_bytes(key))?;
				write_value(out, &map[key], indent + 2)?;
			}
			Ok(())
		}
	}
}

impl fmt::Display for BValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_value(f, self, 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::bencode::decode_bencode;

	#[test]
	fn test_dump_nested() {
		let (_, value) = decode_bencode(b"d3:keyl1:a1:bee").unwrap();
		assert_eq!(
			dump(&value),
			"dict (1 entries)\n  \"key\":\n    list (2 items)\n      \"a\"\n      \"b\"\n"
		);
	}

	#[test]
	fn test_dump_binary_as_hex() {
		let value = BValue::ByteString(vec![0x00, 0xff]);
		assert_eq!(dump(&value), "<2 bytes: 00ff>\n");
	}

	#[test]
	fn test_dump_sorts_keys() {
		let (_, value) = decode_bencode(b"d1:bi2e1:ai1ee").unwrap();
		assert_eq!(dump(&value), "dict (2 entries)\n  \"a\":\n    1\n  \"b\":\n    2\n");
	}

	#[test]
	fn test_display_matches_dump() {
		let value = BValue::List(vec![BValue::Integer(-3)]);
		assert_eq!(value.to_string(), dump(&value));
	}
}
