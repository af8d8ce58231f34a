//! Little-endian binary wire format shared by the camcast server and viewers.
//!
//! Integers and floats are written in little-endian byte order, `bool` as one
//! byte, and strings and sequences as a `u32` length followed by the items.
//! Enums are written as a `u32` variant tag followed by their fields.

mod primitives;
pub use primitives::{decode_bytes, encode_bytes};

use std::fmt;

#[derive(Debug, PartialEq)]
pub enum DecodeError {
    UnexpectedEof,
    InvalidUtf8,
    InvalidBool(u8),
    InvalidVariant(u32),
    TrailingBytes(usize),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnexpectedEof => write!(f, "unexpected end of buffer"),
            DecodeError::InvalidUtf8 => write!(f, "invalid UTF-8 in string"),
            DecodeError::InvalidBool(v) => write!(f, "invalid bool value: {v}"),
            DecodeError::InvalidVariant(v) => write!(f, "invalid enum variant: {v}"),
            DecodeError::TrailingBytes(n) => write!(f, "{n} trailing bytes after message"),
        }
    }
}

impl std::error::Error for DecodeError {}

pub trait Codec: Sized {
    fn encode(&self, buf: &mut Vec<u8>);
    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }

    /// Decode a complete message; every byte of `bytes` must be consumed.
    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut pos = 0;
        let value = Self::decode(bytes, &mut pos)?;
        if pos != bytes.len() {
            return Err(DecodeError::TrailingBytes(bytes.len() - pos));
        }
        Ok(value)
    }
}
