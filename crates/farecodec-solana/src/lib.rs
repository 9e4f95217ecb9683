//! # farecodec-solana
//!
//! Reconstructs typed domain events from the raw execution logs the
//! wagering program emits while processing an instruction.
//!
//! Data flow: raw log lines → `Program data: ` marker → base64 payload →
//! first 8 bytes matched against the discriminator table → remaining bytes
//! handed to the matching payload decoder → one or two typed events per
//! wire record, flattened into the instruction's ordered output list.
//!
//! The whole pipeline is a pure, synchronous, stateless transformation:
//! safe to call concurrently for different instructions with no locking.

pub mod decode;
pub mod discriminator;
pub mod scanner;

pub use decode::{decode_payload, LogicalEvent};
pub use discriminator::{event_discriminator, EventKind, DISCRIMINATOR_LEN};
pub use scanner::{scan_instruction, InstructionContext, PROGRAM_DATA_MARKER};
