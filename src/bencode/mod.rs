pub mod access;
pub mod bvalue;
pub mod decode;
pub mod dump;
pub mod encode;
pub mod error;

pub use access::DictLookup;
pub use bvalue::{BDict, BKind, BValue};   // re-export
pub use decode::{decode, decode_bencode, decode_exact, decode_with};   // re-export
pub use dump::dump;
pub use encode::{encode_bvalue, encode_to};   // re-export
pub use error::BencodeError;
