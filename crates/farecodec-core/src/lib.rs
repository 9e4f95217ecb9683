//! # farecodec-core
//!
//! Core types and primitives shared across all FareCodec crates: the typed
//! event records handed to the persistence layer, the bounds-checked byte
//! cursor every wire decoder reads through, and the content hash that keys
//! qk payout configurations.

pub mod cursor;
pub mod error;
pub mod event;
pub mod hash;

pub use cursor::{write_u128, write_u32, write_u64, ByteCursor};
pub use error::DecodeError;
pub use event::{
    DecodedEvent, EventEnvelope, EventPayload, FeeChargedEvent, FeeType, PoolRegisteredEvent,
    QkWithConfigRegisteredEvent, TrialRegisteredEvent, TrialResolvedEvent,
};
pub use hash::qk_config_hash;
