// infohash.rs
use crate::bencode::{encode_bvalue, BValue, BencodeError};

use sha1::{Sha1, Digest};

/// SHA-1 of the canonical encoding of the `info` entry of a metainfo dictionary.
pub fn info_hash(root: &BValue) -> Result<[u8; 20], BencodeError> {
    let info = root.get(b"info")?;
    Ok(sha1_of_value(info))
}

pub fn sha1_of_value(value: &BValue) -> [u8; 20] {
    let encoded = encode_bvalue(value);

    let mut hasher = Sha1::new();
    hasher.update(&encoded);
    let result = hasher.finalize();

    let mut hash_bytes = [0u8; 20];
    hash_bytes.copy_from_slice(&result);
    hash_bytes
}
