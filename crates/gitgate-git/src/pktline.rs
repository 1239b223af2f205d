//! Git pkt-line framing.
//!
//! Every packet is a 4-character lowercase-hex length prefix counting the
//! entire packet including the prefix itself, followed by the payload.
//! "0000" is the flush packet and carries no payload.

use crate::{GitError, Result};
use std::io::Read;

/// A single pkt-line packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PktLine {
    /// Data packet with payload. Any trailing newline is the producer's.
    Data(Vec<u8>),
    /// Flush packet (0000).
    Flush,
}

impl PktLine {
    /// Creates a data packet from a string slice.
    pub fn from_string(s: &str) -> Self {
        Self::Data(s.as_bytes().to_vec())
    }

    /// Creates a data packet from bytes.
    pub fn from_bytes(b: impl Into<Vec<u8>>) -> Self {
        Self::Data(b.into())
    }

    /// Encodes the packet to bytes.
    ///
    /// The length prefix counts itself, so a data packet encodes as
    /// `4 + payload.len()` in hex. This is the only place packet-length
    /// arithmetic occurs.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Data(payload) => {
                let len = payload.len() + 4;
                let mut out = format!("{len:04x}").into_bytes();
                out.extend_from_slice(payload);
                out
            }
            Self::Flush => b"0000".to_vec(),
        }
    }

    /// Returns true if this is a flush packet.
    pub fn is_flush(&self) -> bool {
        matches!(self, Self::Flush)
    }

    /// Returns the payload, or None for the flush packet.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Self::Data(payload) => Some(payload),
            Self::Flush => None,
        }
    }
}

/// Reader for pkt-line framed streams.
pub struct PktLineReader<R> {
    reader: R,
}

impl<R: Read> PktLineReader<R> {
    /// Creates a new pkt-line reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the next packet, or None at end of stream.
    pub fn read(&mut self) -> Result<Option<PktLine>> {
        let mut len_buf = [0u8; 4];
        match self.reader.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let len_str = std::str::from_utf8(&len_buf)
            .map_err(|_| GitError::InvalidPktLine("invalid length prefix".to_string()))?;

        if len_str == "0000" {
            return Ok(Some(PktLine::Flush));
        }

        let len = u16::from_str_radix(len_str, 16)
            .map_err(|_| GitError::InvalidPktLine("invalid length".to_string()))?
            as usize;

        if len < 4 {
            return Err(GitError::InvalidPktLine("length too small".to_string()));
        }

        let mut payload = vec![0u8; len - 4];
        self.reader.read_exact(&mut payload)?;

        Ok(Some(PktLine::Data(payload)))
    }

    /// Consumes the reader and returns the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
