use std::io;
use thiserror::Error;

use super::bvalue::BKind;

#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("Unexpected end of input")]
	UnexpectedEnd,

	#[error("Malformed string length {0:?}")]
	MalformedLength(String),

	#[error("Malformed integer {0:?}")]
	MalformedInteger(String),

	#[error("Integer out of range {0}")]
	IntegerOverflow(String),

	#[error("Unknown type marker 0x{0:02x}")]
	UnknownType(u8),

	#[error("Dictionary key must be a byte string, found marker 0x{0:02x}")]
	NonStringKey(u8),

	#[error("Expected {expected}, found {found}")]
	TypeMismatch { expected: BKind, found: BKind },

	#[error("Key not found {0:?}")]
	KeyNotFound(String),

	#[error("Byte string is not valid UTF-8")]
	InvalidUtf8(#[from] std::str::Utf8Error),

	#[error("Nesting deeper than {0} levels")]
	NestingTooDeep(usize),

	#[error("String length {len} exceeds limit {max}")]
	StringTooLong { len: usize, max: usize },

	#[error("{0} bytes of trailing data after value")]
	TrailingData(usize),

	#[error("I/O error {0}")]
	Io(#[from] io::Error),
}

impl BencodeError {
	pub(crate) fn key_not_found(key: &[u8]) -> Self {
		BencodeError::KeyNotFound(String::from_utf8_lossy(key).into_owned())
	}
}
