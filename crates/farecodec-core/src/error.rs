//! Error types for the FareCodec decode pipeline.

use thiserror::Error;

/// Errors that can occur while decoding a single event record.
///
/// All variants are recoverable at the per-line dispatch boundary: the
/// scanner logs them and moves on to the next log line, so one corrupt
/// record never aborts decoding of its siblings.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected end of payload: wanted {wanted} more bytes, {remaining} remain")]
    UnexpectedEof { wanted: usize, remaining: usize },

    #[error("invalid base64 payload: {reason}")]
    BadBase64 { reason: String },

    #[error("payload too short for a discriminator: {len} bytes")]
    MissingDiscriminator { len: usize },

    #[error("unknown fee type ordinal {ordinal}")]
    UnknownFeeType { ordinal: u8 },

    #[error("qk array length mismatch: q has {q_len} elements, k has {k_len}")]
    QkLengthMismatch { q_len: usize, k_len: usize },
}
