use std::{fs, path::Path};

use log::debug;
use thiserror::Error;

use crate::bencode::{decode_exact, BDict, BValue, BencodeError, DictLookup};
use crate::config::Config;
use crate::torrent::info_hash;

#[derive(Debug, Error)]
pub enum TorrentError {
    #[error("I/O error while reading torrent: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bencode error: {0}")]
    Bencode(#[from] BencodeError),

    #[error("Invalid '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// A parsed .torrent file: tracker URLs, the info metadata and its hash.
#[derive(Debug, Clone)]
pub struct Torrent {
    pub announce: Option<String>,        // The tracker URL
    pub announce_list: Vec<Vec<String>>, // Tiers of tracker URLs
    pub info: TorrentInfo,
    pub info_hash: [u8; 20],
}

/// Contains detailed metadata about the torrent's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentInfo {
    pub name: String,
    pub piece_length: u64,
    pub pieces: Vec<[u8; 20]>,  // SHA-1 hashes are 20 bytes each
    pub files: Vec<TorrentFile>,
}

/// One file of the torrent. Single-file torrents hold one entry whose path is the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentFile {
    pub length: u64,
    pub path: Vec<String>,
}

impl Torrent {
    /// Reads a .torrent file from disk and parses its contents.
    pub fn from_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self, TorrentError> {
        let path = path.as_ref();
        debug!("reading torrent {}", path.display());
        let buf = fs::read(path)?;
        Self::from_bytes(&buf, config)
    }

    pub fn from_bytes(buf: &[u8], config: &Config) -> Result<Self, TorrentError> {
        let bvalue = decode_exact(buf, config)?;
        Self::from_bvalue(&bvalue)
    }

    /// Creates a `Torrent` from a decoded metainfo dictionary.
    ///
    /// The info hash is taken over the canonical re-encoding of the raw `info`
    /// value, so keys this type does not model still count toward it.
    pub fn from_bvalue(value: &BValue) -> Result<Self, TorrentError> {
        let root_dict = value.as_dict()?;

        let announce = match root_dict.get(&b"announce"[..]) {
            Some(v) => Some(v.as_str()?.to_string()),
            None => None,
        };

        let announce_list = match root_dict.get(&b"announce-list"[..]) {
            Some(v) => parse_announce_list(v)?,
            None => Vec::new(),
        };

        let info = TorrentInfo::from_dict(root_dict.lookup_dict(b"info")?)?;
        let info_hash = info_hash(value)?;
        debug!("parsed torrent '{}' with {} pieces", info.name, info.pieces.len());

        Ok(Torrent {
            announce,
            announce_list,
            info,
            info_hash,
        })
    }
}

fn parse_announce_list(value: &BValue) -> Result<Vec<Vec<String>>, TorrentError> {
    value
        .as_list()?
        .iter()
        .map(|tier| -> Result<Vec<String>, TorrentError> {
            tier.as_list()?
                .iter()
                .map(|url| -> Result<String, TorrentError> { Ok(url.as_str()?.to_string()) })
                .collect()
        })
        .collect()
}

fn non_negative(field: &'static str, n: i64) -> Result<u64, TorrentError> {
    u64::try_from(n).map_err(|_| TorrentError::InvalidField {
        field,
        reason: format!("negative value {}", n),
    })
}

impl TorrentInfo {
    pub fn from_dict(info_dict: &BDict) -> Result<Self, TorrentError> {
        let name = info_dict.lookup_str(b"name")?.to_string();
        let piece_length = non_negative("piece length", info_dict.lookup_integer(b"piece length")?)?;
        let pieces_bytes = info_dict.lookup_bytes(b"pieces")?;

        if pieces_bytes.len() % 20 != 0 {
            return Err(TorrentError::InvalidField {
                field: "pieces",
                reason: format!("length {} is not a multiple of 20", pieces_bytes.len()),
            });
        }

        // Chunk the pieces bytes into 20-byte pieces.
        let pieces = pieces_bytes
            .chunks_exact(20)
            .map(|chunk| {
                let mut hash = [0u8; 20];
                hash.copy_from_slice(chunk);
                hash
            })
            .collect();

        // Multi-file torrents carry a `files` list, single-file ones a `length`.
        let files = match info_dict.get(&b"files"[..]) {
            Some(list) => list
                .as_list()?
                .iter()
                .map(TorrentFile::from_bvalue)
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![TorrentFile {
                length: non_negative("length", info_dict.lookup_integer(b"length")?)?,
                path: vec![name.clone()],
            }],
        };

        Ok(TorrentInfo {
            name,
            piece_length,
            pieces,
            files,
        })
    }

    pub fn total_length(&self) -> u64 {
        self.files.iter().map(|f| f.length).sum()
    }
}

impl TorrentFile {
    fn from_bvalue(value: &BValue) -> Result<Self, TorrentError> {
        let dict = value.as_dict()?;
        let length = non_negative("length", dict.lookup_integer(b"length")?)?;
        let path = dict
            .lookup_list(b"path")?
            .iter()
            .map(|part| -> Result<String, TorrentError> { Ok(part.as_str()?.to_string()) })
            .collect::<Result<Vec<String>, TorrentError>>()?;
        Ok(TorrentFile { length, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = include_bytes!("../../testdata/sample.torrent");

    #[test]
    fn test_single_file_torrent() {
        let torrent = Torrent::from_bytes(SAMPLE, &Config::default()).unwrap();
        assert_eq!(torrent.announce.as_deref(), Some("http://tracker.example.com:6969/announce"));
        assert_eq!(
            torrent.announce_list,
            vec![
                vec!["http://tracker.example.com:6969/announce".to_string()],
                vec!["udp://backup.example.org:1337/announce".to_string()],
            ]
        );
        assert_eq!(torrent.info.name, "sample.iso");
        assert_eq!(torrent.info.piece_length, 32768);
        assert_eq!(torrent.info.pieces.len(), 3);
        assert_eq!(torrent.info.total_length(), 70000);
        assert_eq!(torrent.info.files[0].path, vec!["sample.iso".to_string()]);
    }

    #[test]
    fn test_multi_file_torrent() {
        let data = b"d4:infod5:filesld6:lengthi3e4:pathl1:a1:beed6:lengthi4e4:pathl1:ceee4:name3:dir12:piece lengthi16e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";
        let torrent = Torrent::from_bytes(data, &Config::default()).unwrap();
        assert_eq!(torrent.announce, None);
        assert!(torrent.announce_list.is_empty());
        assert_eq!(torrent.info.files.len(), 2);
        assert_eq!(torrent.info.files[0].path, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(torrent.info.total_length(), 7);
    }

    #[test]
    fn test_missing_info() {
        let err = Torrent::from_bytes(b"d8:announce3:urle", &Config::default()).unwrap_err();
        assert!(matches!(err, TorrentError::Bencode(BencodeError::KeyNotFound(ref k)) if k == "info"));
    }

    #[test]
    fn test_bad_pieces_length() {
        let data = b"d4:infod6:lengthi1e4:name1:x12:piece lengthi16e6:pieces3:abcee";
        let err = Torrent::from_bytes(data, &Config::default()).unwrap_err();
        assert!(matches!(err, TorrentError::InvalidField { field: "pieces", .. }));
    }

    #[test]
    fn test_negative_length() {
        let data = b"d4:infod6:lengthi-1e4:name1:x12:piece lengthi16e6:pieces0:ee";
        let err = Torrent::from_bytes(data, &Config::default()).unwrap_err();
        assert!(matches!(err, TorrentError::InvalidField { field: "length", .. }));
    }

    #[test]
    fn test_root_must_be_dict() {
        let err = Torrent::from_bytes(b"li1ee", &Config::default()).unwrap_err();
        assert!(matches!(err, TorrentError::Bencode(BencodeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.torrent");
        fs::write(&path, SAMPLE).unwrap();
        let torrent = Torrent::from_file(&path, &Config::default()).unwrap();
        assert_eq!(torrent.info.name, "sample.iso");

        let missing = Torrent::from_file(dir.path().join("nope.torrent"), &Config::default());
        assert!(matches!(missing, Err(TorrentError::Io(_))));
    }
}
