use super::bvalue::{BDict, BKind, BValue};
use super::error::BencodeError;

fn mismatch(expected: BKind, found: &BValue) -> BencodeError {
    BencodeError::TypeMismatch { expected, found: found.kind() }
}

/// Typed extraction. None of these coerce between variants.
impl BValue {
    pub fn as_string(&self) -> Result<&[u8], BencodeError> {
        match self {
            BValue::ByteString(b) => Ok(b),
            other => Err(mismatch(BKind::ByteString, other)),
        }
    }

    /// A byte string that must also be valid UTF-8.
    pub fn as_str(&self) -> Result<&str, BencodeError> {
        Ok(std::str::from_utf8(self.as_string()?)?)
    }

    pub fn as_integer(&self) -> Result<i64, BencodeError> {
        match self {
            BValue::Integer(i) => Ok(*i),
            other => Err(mismatch(BKind::Integer, other)),
        }
    }

    pub fn as_list(&self) -> Result<&[BValue], BencodeError> {
        match self {
            BValue::List(l) => Ok(l),
            other => Err(mismatch(BKind::List, other)),
        }
    }

    pub fn as_dict(&self) -> Result<&BDict, BencodeError> {
        match self {
            BValue::Dict(d) => Ok(d),
            other => Err(mismatch(BKind::Dict, other)),
        }
    }

    /// Consumes the value and returns the dictionary without cloning it.
    pub fn into_dict(self) -> Result<BDict, BencodeError> {
        match self {
            BValue::Dict(d) => Ok(d),
            other => Err(mismatch(BKind::Dict, &other)),
        }
    }

    /// Looks up `key` in this value, which must be a dictionary.
    pub fn get(&self, key: &[u8]) -> Result<&BValue, BencodeError> {
        self.as_dict()?.lookup(key)
    }
}

/// Lookups on a decoded dictionary that fail explicitly on a missing key or wrong type.
pub trait DictLookup {
    fn lookup(&self, key: &[u8]) -> Result<&BValue, BencodeError>;

    fn lookup_bytes(&self, key: &[u8]) -> Result<&[u8], BencodeError> {
        self.lookup(key)?.as_string()
    }

    fn lookup_str(&self, key: &[u8]) -> Result<&str, BencodeError> {
        self.lookup(key)?.as_str()
    }

    fn lookup_integer(&self, key: &[u8]) -> Result<i64, BencodeError> {
        self.lookup(key)?.as_integer()
    }

    fn lookup_list(&self, key: &[u8]) -> Result<&[BValue], BencodeError> {
        self.lookup(key)?.as_list()
    }

    fn lookup_dict(&self, key: &[u8]) -> Result<&BDict, BencodeError> {
        self.lookup(key)?.as_dict()
    }
}

impl DictLookup for BDict {
    fn lookup(&self, key: &[u8]) -> Result<&BValue, BencodeError> {
        self.get(key).ok_or_else(|| BencodeError::key_not_found(key))
    }
}
