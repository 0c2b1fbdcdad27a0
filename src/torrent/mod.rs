pub mod metadata;
pub mod infohash;

pub use infohash::{info_hash, sha1_of_value};
pub use metadata::{Torrent, TorrentError, TorrentFile, TorrentInfo};
