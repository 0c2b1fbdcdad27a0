use std::io::{BufRead, ErrorKind, Read};
use std::num::IntErrorKind;

use log::trace;

use super::error::BencodeError;
use crate::bencode::bvalue::{BDict, BValue};
use crate::config::Config;

// i64::MIN has 19 digits plus the sign
const MAX_INTEGER_CHARS: usize = 20;

/// Decodes one value from `source` using the default limits.
///
/// Only the bytes of that value are consumed; anything after it stays in the source.
pub fn decode<R: BufRead>(source: &mut R) -> Result<BValue, BencodeError> {
    decode_with(source, &Config::default())
}

pub fn decode_with<R: BufRead>(source: &mut R, config: &Config) -> Result<BValue, BencodeError> {
    Decoder::new(source, config).decode_value(0)
}

/// Decodes the value at the start of `input`.
///
/// Returns the number of bytes consumed along with the value; trailing bytes are left alone.
pub fn decode_bencode(input: &[u8]) -> Result<(usize, BValue), BencodeError> {
    decode_prefix(input, &Config::default())
}

/// Decodes `input`, which must hold exactly one value.
pub fn decode_exact(input: &[u8], config: &Config) -> Result<BValue, BencodeError> {
    let (consumed, value) = decode_prefix(input, config)?;
    if consumed != input.len() {
        return Err(BencodeError::TrailingData(input.len() - consumed));
    }
    Ok(value)
}

fn decode_prefix(input: &[u8], config: &Config) -> Result<(usize, BValue), BencodeError> {
    let mut cursor = input;
    let mut decoder = Decoder::new(&mut cursor, config);
    let value = decoder.decode_value(0)?;
    Ok((decoder.offset, value))
}

/// Single forward pass over a buffered source. The only look-ahead is one
/// peeked byte from the source's own buffer.
struct Decoder<'a, R> {
    source: &'a mut R,
    config: &'a Config,
    offset: usize,
}

impl<'a, R: BufRead> Decoder<'a, R> {
    fn new(source: &'a mut R, config: &'a Config) -> Self {
        Decoder { source, config, offset: 0 }
    }

    fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        loop {
            match self.source.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn bump(&mut self) {
        self.source.consume(1);
        self.offset += 1;
    }

    fn next_byte(&mut self) -> Result<u8, BencodeError> {
        let byte = self.peek()?.ok_or(BencodeError::UnexpectedEnd)?;
        self.bump();
        Ok(byte)
    }

    fn decode_value(&mut self, depth: usize) -> Result<BValue, BencodeError> {
        match self.peek()? {
            None => Err(BencodeError::UnexpectedEnd),
            Some(b'i') => self.decode_integer().map(BValue::Integer),
            Some(b'l') => self.decode_list(depth),
            Some(b'd') => self.decode_dict(depth),
            Some(b'0'..=b'9') => self.decode_string().map(BValue::ByteString),
            Some(c) => Err(BencodeError::UnknownType(c)),
        }
    }

    /// `i<digits>e`: optional `-`, then `0` alone or a nonzero digit followed by digits.
    fn decode_integer(&mut self) -> Result<i64, BencodeError> {
        self.bump(); // 'i'

        let mut text = String::new();
        let mut first = self.next_byte()?;
        if first == b'-' {
            text.push('-');
            first = self.next_byte()?;
        }

        match first {
            b'e' => return Err(BencodeError::MalformedInteger(text)),
            b'0' => {
                text.push('0');
                let next = self.next_byte()?;
                if next != b'e' {
                    text.push(next as char);
                    return Err(BencodeError::MalformedInteger(text));
                }
                if text.starts_with('-') {
                    return Err(BencodeError::MalformedInteger(text));
                }
                return Ok(0);
            }
            b'1'..=b'9' => text.push(first as char),
            other => {
                text.push(other as char);
                return Err(BencodeError::MalformedInteger(text));
            }
        }

        // Digits past what an i64 can hold are consumed but not kept.
        let mut truncated = false;
        loop {
            match self.next_byte()? {
                b'e' => break,
                d @ b'0'..=b'9' => {
                    if text.len() < MAX_INTEGER_CHARS {
                        text.push(d as char);
                    } else {
                        truncated = true;
                    }
                }
                other => {
                    text.push(other as char);
                    return Err(BencodeError::MalformedInteger(text));
                }
            }
        }

        if truncated {
            text.push_str("...");
            return Err(BencodeError::IntegerOverflow(text));
        }

        text.parse::<i64>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                BencodeError::IntegerOverflow(text.clone())
            }
            _ => BencodeError::MalformedInteger(text.clone()),
        })
    }

    /// `<length>:<bytes>`, the payload taken verbatim.
    fn decode_string(&mut self) -> Result<Vec<u8>, BencodeError> {
        let mut prefix = String::new();
        let mut length: usize = 0;

        loop {
            let byte = self.next_byte()?;
            match byte {
                b':' => break,
                b'0'..=b'9' => {
                    prefix.push(byte as char);
                    length = length
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(byte - b'0')))
                        .ok_or_else(|| BencodeError::MalformedLength(prefix.clone()))?;
                }
                other => {
                    prefix.push(other as char);
                    return Err(BencodeError::MalformedLength(prefix));
                }
            }
        }

        if prefix.is_empty() {
            return Err(BencodeError::MalformedLength(prefix));
        }
        if length > self.config.max_string_len {
            return Err(BencodeError::StringTooLong {
                len: length,
                max: self.config.max_string_len,
            });
        }

        // Read incrementally so a bogus length cannot force a huge allocation.
        let mut data = Vec::new();
        self.source.by_ref().take(length as u64).read_to_end(&mut data)?;
        self.offset += data.len();

        if data.len() < length {
            return Err(BencodeError::UnexpectedEnd);
        }
        Ok(data)
    }

    fn enter(&self, depth: usize) -> Result<(), BencodeError> {
        if depth >= self.config.max_depth {
            return Err(BencodeError::NestingTooDeep(self.config.max_depth));
        }
        Ok(())
    }

    fn decode_list(&mut self, depth: usize) -> Result<BValue, BencodeError> {
        self.enter(depth)?;
        trace!("list at offset {}", self.offset);
        self.bump(); // 'l'

        let mut items = Vec::new();
        loop {
            match self.peek()? {
                None => return Err(BencodeError::UnexpectedEnd),
                Some(b'e') => {
                    self.bump();
                    return Ok(BValue::List(items));
                }
                Some(_) => items.push(self.decode_value(depth + 1)?),
            }
        }
    }

    fn decode_dict(&mut self, depth: usize) -> Result<BValue, BencodeError> {
        self.enter(depth)?;
        trace!("dict at offset {}", self.offset);
        self.bump(); // 'd'

        let mut map = BDict::new();
        loop {
            match self.peek()? {
                None => return Err(BencodeError::UnexpectedEnd),
                Some(b'e') => {
                    self.bump();
                    return Ok(BValue::Dict(map));
                }
                Some(b'0'..=b'9') => {
                    let key = self.decode_string()?;
                    let value = self.decode_value(depth + 1)?;
                    // later duplicates win
                    map.insert(key, value);
                }
                Some(c) => return Err(BencodeError::NonStringKey(c)),
            }
        }
    }
}
