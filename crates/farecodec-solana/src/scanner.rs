//! Per-instruction log scan and dispatch.
//!
//! The scanner walks the raw log lines one instruction produced, extracts
//! base64 payloads from data-carrying lines, identifies discriminators,
//! dispatches to the payload decoders, and flattens the results into one
//! ordered output list.
//!
//! Error discipline: every failure is handled at the per-line boundary.
//! A malformed line or undecodable record is logged and skipped, and the
//! scan continues. One corrupt event never aborts decoding of sibling
//! events in the same instruction, and a fully processed instruction never
//! fails; the worst case is an empty list.

use crate::decode::{decode_payload, LogicalEvent};
use crate::discriminator::{EventKind, DISCRIMINATOR_LEN};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use farecodec_core::{DecodeError, DecodedEvent, EventEnvelope};
use tracing::{trace, warn};

/// Marker prefixing every data-carrying log line the program emits.
pub const PROGRAM_DATA_MARKER: &str = "Program data: ";

/// Everything the calling indexer knows about the instruction whose logs
/// are being scanned.
#[derive(Debug, Clone)]
pub struct InstructionContext {
    /// Transaction signature (base58 text).
    pub signature: String,
    /// Slot the transaction was processed in.
    pub slot: u64,
    /// Block timestamp, if the chain supplied one.
    pub block_time: Option<i64>,
    /// Position of the instruction within the transaction.
    pub instruction_index: u32,
}

/// Scan one instruction's log lines and return every decodable event, in
/// log order, each wrapped in its envelope.
pub fn scan_instruction(logs: &[String], ctx: &InstructionContext) -> Vec<DecodedEvent> {
    // captured once so sibling events share a timestamp when the chain
    // supplied none
    let block_time = ctx
        .block_time
        .unwrap_or_else(|| chrono::Utc::now().timestamp());

    let mut out = Vec::new();
    for line in logs {
        let Some(encoded) = line.strip_prefix(PROGRAM_DATA_MARKER) else {
            continue;
        };

        let bytes = match extract_payload(encoded) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(
                    signature = %ctx.signature,
                    instruction_index = ctx.instruction_index,
                    error = %err,
                    "skipping malformed program data line"
                );
                continue;
            }
        };

        let Some(kind) = EventKind::identify(&bytes[..DISCRIMINATOR_LEN]) else {
            trace!(
                signature = %ctx.signature,
                discriminator = %hex::encode(&bytes[..DISCRIMINATOR_LEN]),
                "unrecognized event discriminator"
            );
            continue;
        };

        match decode_payload(kind, &bytes[DISCRIMINATOR_LEN..]) {
            Ok(events) => {
                for LogicalEvent { inner_index, payload } in events {
                    out.push(DecodedEvent {
                        envelope: EventEnvelope {
                            slot: ctx.slot,
                            signature: ctx.signature.clone(),
                            block_time,
                            instruction_index: ctx.instruction_index,
                            inner_instruction_index: inner_index,
                        },
                        payload,
                    });
                }
            }
            Err(err) => {
                warn!(
                    event = %kind,
                    signature = %ctx.signature,
                    instruction_index = ctx.instruction_index,
                    error = %err,
                    "skipping undecodable event record"
                );
            }
        }
    }
    out
}

/// Base64-decode a data line (marker already stripped) and check it is at
/// least long enough to carry a discriminator.
fn extract_payload(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| DecodeError::BadBase64 {
            reason: e.to_string(),
        })?;
    if bytes.len() < DISCRIMINATOR_LEN {
        return Err(DecodeError::MissingDiscriminator { len: bytes.len() });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> InstructionContext {
        InstructionContext {
            signature: "5sig".into(),
            slot: 1234,
            block_time: Some(1_700_000_000),
            instruction_index: 7,
        }
    }

    #[test]
    fn non_data_lines_are_skipped_silently() {
        let logs = vec![
            "Program 11111111111111111111111111111111 invoke [1]".to_string(),
            "Program log: Instruction: RegisterPool".to_string(),
            "Program consumed 2000 compute units".to_string(),
        ];
        assert!(scan_instruction(&logs, &ctx()).is_empty());
    }

    #[test]
    fn bad_base64_line_is_skipped() {
        let logs = vec![format!("{PROGRAM_DATA_MARKER}!!!not-base64!!!")];
        assert!(scan_instruction(&logs, &ctx()).is_empty());
    }

    #[test]
    fn short_payload_is_skipped() {
        let line = format!("{PROGRAM_DATA_MARKER}{}", BASE64.encode([1u8, 2, 3]));
        assert!(scan_instruction(&[line], &ctx()).is_empty());
    }

    #[test]
    fn extract_payload_errors() {
        assert!(matches!(
            extract_payload("%%%"),
            Err(DecodeError::BadBase64 { .. })
        ));
        assert!(matches!(
            extract_payload(&BASE64.encode([0u8; 7])),
            Err(DecodeError::MissingDiscriminator { len: 7 })
        ));
    }

    #[test]
    fn block_time_fallback_when_chain_gave_none() {
        let mut context = ctx();
        context.block_time = None;
        let before = chrono::Utc::now().timestamp();

        let mut payload = crate::discriminator::TRIAL_RESOLVED.to_vec();
        payload.extend_from_slice(&[0u8; 32]); // trial_id
        payload.extend_from_slice(&0u32.to_le_bytes());
        payload.extend_from_slice(&0u128.to_le_bytes());
        let line = format!("{PROGRAM_DATA_MARKER}{}", BASE64.encode(&payload));

        let events = scan_instruction(&[line], &context);
        assert_eq!(events.len(), 1);
        let after = chrono::Utc::now().timestamp();
        assert!(events[0].envelope.block_time >= before);
        assert!(events[0].envelope.block_time <= after);
    }

    #[test]
    fn envelope_carries_instruction_context() {
        let mut payload = crate::discriminator::TRIAL_RESOLVED.to_vec();
        payload.extend_from_slice(&[0u8; 32]);
        payload.extend_from_slice(&9u32.to_le_bytes());
        payload.extend_from_slice(&1u128.to_le_bytes());
        let line = format!("{PROGRAM_DATA_MARKER}{}", BASE64.encode(&payload));

        let events = scan_instruction(&[line], &ctx());
        assert_eq!(events.len(), 1);
        let env = &events[0].envelope;
        assert_eq!(env.slot, 1234);
        assert_eq!(env.signature, "5sig");
        assert_eq!(env.block_time, 1_700_000_000);
        assert_eq!(env.instruction_index, 7);
        assert_eq!(env.inner_instruction_index, 0);
    }
}
