//! Bounds-checked little-endian reads over a wire payload.
//!
//! Every event decoder advances a `ByteCursor` through fixed fields in a
//! fixed order. The field order is the wire contract with the on-chain
//! program; a layout change there is a breaking release, not something to
//! handle defensively here.

use crate::error::DecodeError;

/// A read cursor over an immutable byte slice.
///
/// All reads are bounds-checked and return `DecodeError::UnexpectedEof`
/// rather than panicking, so a truncated payload surfaces as a recoverable
/// per-record failure.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Current read offset from the start of the payload.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::UnexpectedEof {
                wanted: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Two little-endian 32-bit words, combined as `(high << 32) | low`.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let low = self.read_u32()? as u64;
        let high = self.read_u32()? as u64;
        Ok((high << 32) | low)
    }

    /// Two consecutive u64 reads, low word first, combined as
    /// `(high << 64) | low`.
    pub fn read_u128(&mut self) -> Result<u128, DecodeError> {
        let low = self.read_u64()? as u128;
        let high = self.read_u64()? as u128;
        Ok((high << 64) | low)
    }

    /// Exactly 32 raw bytes.
    pub fn read_bytes32(&mut self) -> Result<[u8; 32], DecodeError> {
        let b = self.take(32)?;
        let mut out = [0u8; 32];
        out.copy_from_slice(b);
        Ok(out)
    }

    /// A 32-byte account identifier, rendered in its canonical base58 text
    /// form.
    pub fn read_pubkey(&mut self) -> Result<String, DecodeError> {
        let b = self.take(32)?;
        Ok(bs58::encode(b).into_string())
    }
}

// ─── Writers ─────────────────────────────────────────────────────────────────
//
// The inverse encodings. `write_u128` produces the canonical bytes the qk
// content hash is computed over; all three are also what tests use to build
// wire fixtures.

pub fn write_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_u128(buf: &mut Vec<u8>, value: u128) {
    buf.extend_from_slice(&value.to_le_bytes());
}
