//! Per-event payload decoders.
//!
//! Each decoder receives a cursor positioned immediately after the 8-byte
//! discriminator and advances through fixed fields in a fixed order. The
//! layouts are the wire contract with the on-chain program; a layout change
//! there is a breaking release.

use crate::discriminator::EventKind;
use farecodec_core::{
    qk_config_hash, ByteCursor, DecodeError, EventPayload, FeeChargedEvent, FeeType,
    PoolRegisteredEvent, QkWithConfigRegisteredEvent, TrialRegisteredEvent, TrialResolvedEvent,
};

/// Synthetic inner index of the config event expanded from a trial record.
const INNER_INDEX_QK_CONFIG: u32 = 0;
/// Synthetic inner index of the trial event expanded from a trial record.
const INNER_INDEX_TRIAL: u32 = 1;
/// Fixed inner index of every fee charge, distinguishing it from the two
/// synthetic indices that can appear in the same instruction.
const INNER_INDEX_FEE: u32 = 2;

/// A decoded record plus the logical position it occupies within its
/// instruction. One physical wire record can expand to more than one of
/// these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalEvent {
    pub inner_index: u32,
    pub payload: EventPayload,
}

/// Decode the payload bytes following a discriminator into one or more
/// logical events, in the order they must be handed to the caller.
pub fn decode_payload(kind: EventKind, data: &[u8]) -> Result<Vec<LogicalEvent>, DecodeError> {
    let mut cur = ByteCursor::new(data);
    match kind {
        EventKind::PoolRegistered => decode_pool_registered(&mut cur),
        EventKind::TrialRegistered => decode_trial_registered(&mut cur),
        EventKind::TrialResolved => decode_trial_resolved(&mut cur),
        EventKind::FeeCharged => decode_fee_charged(&mut cur),
    }
}

fn decode_pool_registered(cur: &mut ByteCursor) -> Result<Vec<LogicalEvent>, DecodeError> {
    let event = PoolRegisteredEvent {
        pool_address: cur.read_pubkey()?,
        manager_address: cur.read_pubkey()?,
        fee_play_multiplier: cur.read_u64()?,
        fee_loss_multiplier: cur.read_u64()?,
        fee_mint_multiplier: cur.read_u64()?,
        fee_host_percent: cur.read_u64()?,
        fee_pool_percent: cur.read_u64()?,
        min_limit_for_ticket: cur.read_u64()?,
        probability: cur.read_u64()?,
    };
    Ok(vec![LogicalEvent {
        inner_index: 0,
        payload: EventPayload::PoolRegistered(event),
    }])
}

/// The one multi-record case: a single trial registration on the wire
/// expands into a content-addressed payout configuration followed by the
/// trial that references it. The config always precedes the trial so
/// in-order consumers can assume referential availability.
fn decode_trial_registered(cur: &mut ByteCursor) -> Result<Vec<LogicalEvent>, DecodeError> {
    let trial_id = cur.read_pubkey()?;
    let who = cur.read_pubkey()?;
    let pool_address = cur.read_pubkey()?;
    let multiplier = cur.read_u64()?;
    let vrf_cost_in_fare = cur.read_u64()?;
    let extra_data_hash = cur.read_bytes32()?;
    let q = read_u128_vec(cur)?;
    let k = read_u128_vec(cur)?;
    let fee_loss_multiplier = cur.read_u64()?;
    let fee_mint_multiplier = cur.read_u64()?;
    let effective_ev = cur.read_u64()?;

    if q.len() != k.len() {
        return Err(DecodeError::QkLengthMismatch {
            q_len: q.len(),
            k_len: k.len(),
        });
    }

    let hash = qk_config_hash(&q, &k, &extra_data_hash);

    let config = QkWithConfigRegisteredEvent {
        qk_with_config_hash: hash.clone(),
        q,
        k,
        fee_loss_multiplier,
        fee_mint_multiplier,
        effective_ev,
    };
    let trial = TrialRegisteredEvent {
        trial_id,
        who,
        pool_address,
        multiplier,
        qk_with_config_hash: hash,
        vrf_cost_in_fare,
        extra_data_hash: hex::encode(extra_data_hash),
    };

    Ok(vec![
        LogicalEvent {
            inner_index: INNER_INDEX_QK_CONFIG,
            payload: EventPayload::QkWithConfigRegistered(config),
        },
        LogicalEvent {
            inner_index: INNER_INDEX_TRIAL,
            payload: EventPayload::TrialRegistered(trial),
        },
    ])
}

fn decode_trial_resolved(cur: &mut ByteCursor) -> Result<Vec<LogicalEvent>, DecodeError> {
    let event = TrialResolvedEvent {
        trial_id: cur.read_pubkey()?,
        result_index: cur.read_u32()?,
        randomness: cur.read_u128()?,
    };
    Ok(vec![LogicalEvent {
        inner_index: 0,
        payload: EventPayload::TrialResolved(event),
    }])
}

fn decode_fee_charged(cur: &mut ByteCursor) -> Result<Vec<LogicalEvent>, DecodeError> {
    let ordinal = cur.read_u8()?;
    let fee_type =
        FeeType::from_ordinal(ordinal).ok_or(DecodeError::UnknownFeeType { ordinal })?;
    let event = FeeChargedEvent {
        fee_type,
        pool_address: cur.read_pubkey()?,
        trial_id: cur.read_pubkey()?,
        fee_amount: cur.read_u64()?,
    };
    Ok(vec![LogicalEvent {
        inner_index: INNER_INDEX_FEE,
        payload: EventPayload::FeeCharged(event),
    }])
}

/// A u32-length-prefixed array of u128.
///
/// The prefix is validated against the bytes actually remaining before any
/// allocation, so a corrupt length cannot trigger an oversized reserve.
fn read_u128_vec(cur: &mut ByteCursor) -> Result<Vec<u128>, DecodeError> {
    let len = cur.read_u32()? as usize;
    let wanted = len * 16;
    if wanted > cur.remaining() {
        return Err(DecodeError::UnexpectedEof {
            wanted,
            remaining: cur.remaining(),
        });
    }
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(cur.read_u128()?);
    }
    Ok(out)
}
