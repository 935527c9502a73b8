//! Per-click identifier generation.
//!
//! A click id is minted fresh for every redirect: 8 bytes from the system
//! entropy source, read as a big-endian u64 and rendered in lowercase
//! base-36, zero-padded to a fixed width. Ids are never persisted and carry
//! no uniqueness guarantee beyond the entropy of the source.
//!
//! When the secure source is unavailable the generator degrades to a
//! time/pid-derived seed instead of failing the redirect.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fixed identifier width: the base-36 length of `u64::MAX`.
pub const CLICK_ID_LEN: usize = 13;

/// Distinguishes fallback invocations that land on the same clock tick.
static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a fresh lowercase base-36 click identifier.
///
/// Never fails: if the entropy source is unavailable the id is derived from
/// wall clock, process id and a process-local counter, and a warning is
/// logged.
pub fn generate() -> String {
    let mut bytes = [0u8; 8];
    let seed = match getrandom::fill(&mut bytes) {
        Ok(()) => u64::from_be_bytes(bytes),
        Err(err) => {
            tracing::warn!(error = %err, "entropy source unavailable, using fallback click id seed");
            fallback_seed()
        }
    };
    to_base36(seed)
}

/// Non-cryptographic seed for when the entropy source fails.
fn fallback_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let counter = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);

    nanos ^ (u64::from(std::process::id()) << 32) ^ counter.rotate_left(17)
}

/// Renders `n` in base-36, zero-padded to [`CLICK_ID_LEN`] characters.
fn to_base36(mut n: u64) -> String {
    let mut buf = [BASE36_ALPHABET[0]; CLICK_ID_LEN];
    let mut i = CLICK_ID_LEN;
    while n > 0 {
        i -= 1;
        buf[i] = BASE36_ALPHABET[(n % 36) as usize];
        n /= 36;
    }
    // buf is ASCII by construction
    String::from_utf8_lossy(&buf).into_owned()
}
