//! Defines one-off utility functions used throughout the pool client
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(feature = "errors")]
pub mod errors;
#[cfg(feature = "hex")]
pub mod hex;
#[cfg(feature = "telemetry")]
pub mod telemetry;

/// Returns the current unix timestamp in seconds, represented as u64
///
/// A clock set before the epoch reads as zero
pub fn get_current_time_seconds() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::get_current_time_seconds;

    #[test]
    fn test_current_time_is_after_2023() {
        // 2023-01-01T00:00:00Z
        assert!(get_current_time_seconds() > 1_672_531_200);
    }
}
