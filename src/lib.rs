// lib.rs - Library interface for the bencode codec

pub mod bencode;
pub mod config;
pub mod torrent;

// Re-export commonly used types for easier testing
pub use bencode::*;
pub use config::{Config, ConfigError};
pub use torrent::{info_hash, Torrent, TorrentError, TorrentInfo};

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = include_bytes!("../testdata/sample.torrent");

    #[test]
    fn test_decode_navigate_reencode() {
        let mut source = SAMPLE;
        let root = decode(&mut source).unwrap();
        assert!(source.is_empty());

        let announce = root.get(b"announce").unwrap().as_str().unwrap();
        assert_eq!(announce, "http://tracker.example.com:6969/announce");

        let info = root.get(b"info").unwrap();
        assert_eq!(info.get(b"piece length").unwrap().as_integer().unwrap(), 32768);
        assert_eq!(info.get(b"pieces").unwrap().as_string().unwrap().len(), 60);
        assert!(matches!(info.get(b"files"), Err(BencodeError::KeyNotFound(_))));
    }

    #[test]
    fn test_canonical_file_roundtrips_byte_for_byte() {
        let (consumed, root) = decode_bencode(SAMPLE).unwrap();
        assert_eq!(consumed, SAMPLE.len());
        assert_eq!(encode_bvalue(&root), SAMPLE);
    }

    #[test]
    fn test_reencoded_info_is_a_slice_of_the_file() {
        let (_, root) = decode_bencode(SAMPLE).unwrap();
        let info_bytes = encode_bvalue(root.get(b"info").unwrap());
        assert!(SAMPLE.windows(info_bytes.len()).any(|w| w == info_bytes.as_slice()));
    }

    #[test]
    fn test_decode_invalid_bencode() {
        assert!(decode_bencode(b"d").is_err());
        assert!(decode_bencode(b"4:ab").is_err());
        assert!(decode_bencode(b"invalid").is_err());
    }
}
