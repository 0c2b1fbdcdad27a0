use std::collections::HashMap;
use std::fmt;

/// Dictionary payload. Keys are raw bytes; iteration order is unspecified,
/// the encoder sorts them.
pub type BDict = HashMap<Vec<u8>, BValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
	ByteString(Vec<u8>), // raw bytes, not necessarily UTF-8
	Integer(i64),
	List(Vec<BValue>),
	Dict(BDict),
}

/// The variant tag of a `BValue`, used when reporting type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BKind {
	ByteString,
	Integer,
	List,
	Dict,
}

impl fmt::Display for BKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			BKind::ByteString => "byte string",
			BKind::Integer => "integer",
			BKind::List => "list",
			BKind::Dict => "dictionary",
		};
		f.write_str(name)
	}
}

impl BValue {
	/// Builds a byte string from UTF-8 text.
	pub fn string(s: &str) -> Self {
		BValue::ByteString(s.as_bytes().to_vec())
	}

	pub fn kind(&self) -> BKind {
		match self {
			BValue::ByteString(_) => BKind::ByteString,
			BValue::Integer(_) => BKind::Integer,
			BValue::List(_) => BKind::List,
			BValue::Dict(_) => BKind::Dict,
		}
	}
}

impl From<i64> for BValue {
	fn from(i: i64) -> Self {
		BValue::Integer(i)
	}
}

impl From<&str> for BValue {
	fn from(s: &str) -> Self {
		BValue::string(s)
	}
}

impl From<&[u8]> for BValue {
	fn from(b: &[u8]) -> Self {
		BValue::ByteString(b.to_vec())
	}
}

impl From<Vec<u8>> for BValue {
	fn from(b: Vec<u8>) -> Self {
		BValue::ByteString(b)
	}
}

impl From<Vec<BValue>> for BValue {
	fn from(l: Vec<BValue>) -> Self {
		BValue::List(l)
	}
}

impl From<BDict> for BValue {
	fn from(d: BDict) -> Self {
		BValue::Dict(d)
	}
}
