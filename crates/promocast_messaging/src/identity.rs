//! Display identifiers.
//!
//! Identifiers are seeded from the wall clock so a restarted process does not
//! reuse the identifiers of notifications still on screen, then handed out in
//! ascending order so two notifications built in the same instant never share
//! a display slot.

use chrono::Utc;
use std::sync::atomic::{AtomicI32, Ordering};

/// Hands out unique notification identifiers.
#[derive(Debug)]
pub struct NotificationIds {
    next: AtomicI32,
}

impl NotificationIds {
    /// Seed from the current time in milliseconds, folded into the positive
    /// `i32` range.
    ///
    /// A restarted process only reuses an identifier of its predecessor if
    /// that one handed out more identifiers than milliseconds passed before
    /// the restart. The fold repeats about every 24.8 days.
    pub fn time_seeded() -> Self {
        Self::starting_at(seed_from_millis(Utc::now().timestamp_millis()))
    }

    pub fn starting_at(first: i32) -> Self {
        Self {
            next: AtomicI32::new(first.max(1)),
        }
    }

    /// Next identifier. Always positive; wraps back to 1 after `i32::MAX`.
    pub fn next_id(&self) -> i32 {
        let mut current = self.next.load(Ordering::Relaxed);
        loop {
            let following = if current == i32::MAX { 1 } else { current + 1 };
            match self.next.compare_exchange_weak(
                current,
                following,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return current,
                Err(actual) => current = actual,
            }
        }
    }
}

fn seed_from_millis(millis: i64) -> i32 {
    millis.rem_euclid(i64::from(i32::MAX)) as i32
}

impl Default for NotificationIds {
    fn default() -> Self {
        Self::time_seeded()
    }
}
