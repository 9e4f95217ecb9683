//! Event discriminator table and lookup.
//!
//! Every encoded event the program logs is prefixed with an 8-byte tag:
//! the first 8 bytes of SHA-256 of `"event:<EventName>"` (the Anchor event
//! convention). The table below is a versioned contract with the on-chain
//! program; any discriminator change must be coordinated as a breaking
//! release, not silently handled.

use sha2::{Digest, Sha256};
use std::fmt;

/// Length of the wire tag prefixed to every encoded event.
pub const DISCRIMINATOR_LEN: usize = 8;

/// `sha256("event:PoolRegistered")[..8]`
pub const POOL_REGISTERED: [u8; 8] = [77, 114, 165, 230, 33, 230, 135, 215];
/// `sha256("event:TrialRegistered")[..8]`
pub const TRIAL_REGISTERED: [u8; 8] = [182, 0, 212, 203, 142, 87, 214, 221];
/// `sha256("event:TrialResolved")[..8]`
pub const TRIAL_RESOLVED: [u8; 8] = [196, 198, 203, 60, 5, 136, 167, 206];
/// `sha256("event:FeeCharged")[..8]`
pub const FEE_CHARGED: [u8; 8] = [10, 15, 44, 253, 165, 0, 86, 248];

/// The closed set of event types the program emits.
///
/// Dispatch is a match on this enum so the compiler enforces exhaustiveness
/// when a new event type is added; unknown discriminators surface as `None`
/// from [`EventKind::identify`] so future event types never break old
/// decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PoolRegistered,
    TrialRegistered,
    TrialResolved,
    FeeCharged,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::PoolRegistered,
        EventKind::TrialRegistered,
        EventKind::TrialResolved,
        EventKind::FeeCharged,
    ];

    /// The wire tag for this event type.
    pub fn discriminator(&self) -> &'static [u8; 8] {
        match self {
            EventKind::PoolRegistered => &POOL_REGISTERED,
            EventKind::TrialRegistered => &TRIAL_REGISTERED,
            EventKind::TrialResolved => &TRIAL_RESOLVED,
            EventKind::FeeCharged => &FEE_CHARGED,
        }
    }

    /// The canonical event name as the program declares it.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::PoolRegistered => "PoolRegistered",
            EventKind::TrialRegistered => "TrialRegistered",
            EventKind::TrialResolved => "TrialResolved",
            EventKind::FeeCharged => "FeeCharged",
        }
    }

    /// Byte-exact lookup: `bytes` must be exactly 8 bytes equal in length
    /// and content to a registered discriminator. A strict prefix or
    /// superset of a registered tag never matches.
    pub fn identify(bytes: &[u8]) -> Option<EventKind> {
        if bytes.len() != DISCRIMINATOR_LEN {
            return None;
        }
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.discriminator()[..] == *bytes)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Derive the 8-byte tag for an event name: `sha256("event:<name>")[..8]`.
///
/// The table constants above are pinned against this derivation in tests;
/// at runtime lookup goes through the static table only.
pub fn event_discriminator(name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(b"event:");
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_derivation() {
        for kind in EventKind::ALL {
            assert_eq!(
                *kind.discriminator(),
                event_discriminator(kind.name()),
                "stale table entry for {kind}"
            );
        }
    }

    #[test]
    fn identify_exact_match() {
        assert_eq!(
            EventKind::identify(&POOL_REGISTERED),
            Some(EventKind::PoolRegistered)
        );
        assert_eq!(
            EventKind::identify(&FEE_CHARGED),
            Some(EventKind::FeeCharged)
        );
    }

    #[test]
    fn identify_rejects_strict_prefix() {
        assert_eq!(EventKind::identify(&POOL_REGISTERED[..7]), None);
    }

    #[test]
    fn identify_rejects_superset() {
        let mut longer = POOL_REGISTERED.to_vec();
        longer.push(0);
        assert_eq!(EventKind::identify(&longer), None);
    }

    #[test]
    fn identify_rejects_unknown() {
        assert_eq!(EventKind::identify(&[0u8; 8]), None);
        assert_eq!(EventKind::identify(&event_discriminator("SomeFutureEvent")), None);
    }

    #[test]
    fn discriminators_are_distinct() {
        for (i, a) in EventKind::ALL.iter().enumerate() {
            for b in &EventKind::ALL[i + 1..] {
                assert_ne!(a.discriminator(), b.discriminator());
            }
        }
    }
}
