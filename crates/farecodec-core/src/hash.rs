//! qk configuration content hash.
//!
//! A payout configuration is identified by the Keccak-256 digest of a
//! canonical byte encoding of its contents, so two trials with identical
//! economics always collapse to the same configuration record. The digest
//! is persisted as a durable cross-reference key: changing the
//! concatenation order or the element width here is a breaking change to
//! every previously stored reference.

use crate::cursor::write_u128;
use tiny_keccak::{Hasher, Keccak};

/// Compute the content address of a `(q, k, extra_data_hash)` payout
/// configuration.
///
/// Canonical encoding: each element of `q` as 16 little-endian bytes in
/// array order, then each element of `k` the same way, then the raw 32
/// bytes of `extra_data_hash`. The Keccak-256 digest of that concatenation
/// is returned as a lowercase hex string.
pub fn qk_config_hash(q: &[u128], k: &[u128], extra_data_hash: &[u8; 32]) -> String {
    let mut buf = Vec::with_capacity((q.len() + k.len()) * 16 + 32);
    for &value in q {
        write_u128(&mut buf, value);
    }
    for &value in k {
        write_u128(&mut buf, value);
    }
    buf.extend_from_slice(extra_data_hash);

    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(&buf);
    hasher.finalize(&mut output);
    hex::encode(output)
}
