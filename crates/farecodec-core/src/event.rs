//! Typed event records — the primary output of FareCodec.
//!
//! Every record is constructed once during decode, never mutated, and owned
//! by the caller (the indexer's persistence layer) after return. Field
//! names serialize in camelCase to match what that layer stores.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Envelope ────────────────────────────────────────────────────────────────

/// Common fields attached to every decoded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// Slot the transaction was processed in.
    pub slot: u64,
    /// Transaction signature (opaque identifier, base58 text).
    pub signature: String,
    /// Block timestamp (Unix seconds). Falls back to decode time when the
    /// chain did not supply one.
    pub block_time: i64,
    /// Position of the instruction within the transaction.
    pub instruction_index: u32,
    /// Position of this logical event within the instruction's log stream.
    /// Distinct logical events can originate from one physical log line.
    pub inner_instruction_index: u32,
}

// ─── Event records ───────────────────────────────────────────────────────────

/// A wagering-pool descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRegisteredEvent {
    /// Pool account (base58).
    pub pool_address: String,
    /// Pool manager account (base58).
    pub manager_address: String,
    pub fee_play_multiplier: u64,
    pub fee_loss_multiplier: u64,
    pub fee_mint_multiplier: u64,
    pub fee_host_percent: u64,
    pub fee_pool_percent: u64,
    pub min_limit_for_ticket: u64,
    pub probability: u64,
}

/// A payout configuration, content-addressed by `qk_with_config_hash` so
/// trials sharing identical economics collapse to one record.
///
/// Invariant: `q.len() == k.len()`; the decoder rejects records that
/// violate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QkWithConfigRegisteredEvent {
    /// Keccak-256 of the canonical `(q, k, extra_data_hash)` encoding (hex).
    pub qk_with_config_hash: String,
    /// Probability-like weights.
    pub q: Vec<u128>,
    /// Payout-multiplier-like values, one per `q` slot.
    pub k: Vec<u128>,
    pub fee_loss_multiplier: u64,
    pub fee_mint_multiplier: u64,
    pub effective_ev: u64,
}

/// A wager placed against a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRegisteredEvent {
    /// Trial account (base58).
    pub trial_id: String,
    /// Bettor account (base58).
    pub who: String,
    /// Pool the trial is settled against (base58).
    pub pool_address: String,
    pub multiplier: u64,
    /// Back-reference (not ownership) to the payout configuration emitted
    /// alongside this trial.
    pub qk_with_config_hash: String,
    pub vrf_cost_in_fare: u64,
    /// Caller-supplied auxiliary hash, 32 bytes rendered as hex.
    pub extra_data_hash: String,
}

/// A trial settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialResolvedEvent {
    /// Trial account (base58).
    pub trial_id: String,
    /// Selects which `k` slot won.
    pub result_index: u32,
    /// Raw verifiable-random-function output.
    pub randomness: u128,
}

/// A protocol fee charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeChargedEvent {
    pub fee_type: FeeType,
    pub pool_address: String,
    pub trial_id: String,
    pub fee_amount: u64,
}

/// The three fee categories the program charges, decoded from a one-byte
/// ordinal on the wire. An out-of-table ordinal is a malformed record, not
/// a valid absent category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeType {
    FeePlay,
    FeeLoss,
    FeeMint,
}

impl FeeType {
    /// Map a wire ordinal to its category. `None` for anything outside the
    /// three-entry table.
    pub fn from_ordinal(ordinal: u8) -> Option<FeeType> {
        match ordinal {
            0 => Some(FeeType::FeePlay),
            1 => Some(FeeType::FeeLoss),
            2 => Some(FeeType::FeeMint),
            _ => None,
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            FeeType::FeePlay => 0,
            FeeType::FeeLoss => 1,
            FeeType::FeeMint => 2,
        }
    }
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeeType::FeePlay => "FeePlay",
            FeeType::FeeLoss => "FeeLoss",
            FeeType::FeeMint => "FeeMint",
        };
        write!(f, "{s}")
    }
}

// ─── Output union ────────────────────────────────────────────────────────────

/// The tagged union handed to the persistence collaborator: an `eventType`
/// discriminant plus the typed record under `event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType", content = "event")]
pub enum EventPayload {
    PoolRegistered(PoolRegisteredEvent),
    QkWithConfigRegistered(QkWithConfigRegisteredEvent),
    TrialRegistered(TrialRegisteredEvent),
    TrialResolved(TrialResolvedEvent),
    FeeCharged(FeeChargedEvent),
}

impl EventPayload {
    /// The `eventType` discriminant as text.
    pub fn event_type(&self) -> &'static str {
        match self {
            EventPayload::PoolRegistered(_) => "PoolRegistered",
            EventPayload::QkWithConfigRegistered(_) => "QkWithConfigRegistered",
            EventPayload::TrialRegistered(_) => "TrialRegistered",
            EventPayload::TrialResolved(_) => "TrialResolved",
            EventPayload::FeeCharged(_) => "FeeCharged",
        }
    }
}

/// A fully decoded event: envelope plus payload. One `Vec<DecodedEvent>`
/// per scanned instruction is the component's entire output surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    #[serde(flatten)]
    pub payload: EventPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_type_ordinal_table() {
        assert_eq!(FeeType::from_ordinal(0), Some(FeeType::FeePlay));
        assert_eq!(FeeType::from_ordinal(1), Some(FeeType::FeeLoss));
        assert_eq!(FeeType::from_ordinal(2), Some(FeeType::FeeMint));
        assert_eq!(FeeType::from_ordinal(3), None);
        assert_eq!(FeeType::from_ordinal(255), None);
    }

    #[test]
    fn fee_type_ordinal_roundtrip() {
        for ordinal in 0..=2u8 {
            let ft = FeeType::from_ordinal(ordinal).unwrap();
            assert_eq!(ft.ordinal(), ordinal);
        }
    }

    #[test]
    fn payload_serializes_with_event_type_tag() {
        let payload = EventPayload::TrialResolved(TrialResolvedEvent {
            trial_id: "trial".into(),
            result_index: 3,
            randomness: u128::MAX,
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["eventType"], "TrialResolved");
        assert_eq!(json["event"]["resultIndex"], 3);
    }

    #[test]
    fn decoded_event_flattens_envelope() {
        let decoded = DecodedEvent {
            envelope: EventEnvelope {
                slot: 42,
                signature: "sig".into(),
                block_time: 1_700_000_000,
                instruction_index: 1,
                inner_instruction_index: 2,
            },
            payload: EventPayload::FeeCharged(FeeChargedEvent {
                fee_type: FeeType::FeeMint,
                pool_address: "pool".into(),
                trial_id: "trial".into(),
                fee_amount: 99,
            }),
        };
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["slot"], 42);
        assert_eq!(json["innerInstructionIndex"], 2);
        assert_eq!(json["eventType"], "FeeCharged");
        assert_eq!(json["event"]["feeType"], "FeeMint");

        let back: DecodedEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, decoded);
    }
}
