//! Modality confirmation rules.
//!
//! A modality is one way to fill a time slot: its group size is both the
//! number of players required and the number of pending bookings that locks
//! it in. The transactional work lives in the persistence layer; this module
//! holds the threshold rule, the outcome type, and the retry policy applied
//! around the transaction.

use std::time::Duration;
use uuid::Uuid;

/// Returns true when a modality has gathered enough pending bookings to
/// confirm. A size-1 modality fills on its first booking.
pub fn modality_fills(pending_count: i64, group_size: i64) -> bool {
    group_size >= 1 && pending_count >= group_size
}

/// Result of one confirmation pass over a `(time_slot, group_size)` modality.
#[derive(Debug, Clone)]
pub struct ModalityConfirmation {
    /// Whether the modality reached its threshold and was confirmed.
    pub filled: bool,
    /// Pending bookings observed at the start of the pass.
    pub pending_count: i64,
    /// Users whose bookings were flipped to confirmed.
    pub confirmed_user_ids: Vec<Uuid>,
    /// Competing pending bookings (same slot, other modality) that were
    /// cancelled because their holder is now confirmed.
    pub cancelled_competing: u64,
}

impl ModalityConfirmation {
    /// A pass that observed too few pending bookings to confirm anything.
    pub fn not_filled(pending_count: i64) -> Self {
        Self {
            filled: false,
            pending_count,
            confirmed_user_ids: Vec::new(),
            cancelled_competing: 0,
        }
    }
}

/// Bounded exponential backoff for retrying the confirmation transaction
/// when the store reports transient lock contention.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before retrying after the given 1-based attempt; doubles each
    /// time.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}
