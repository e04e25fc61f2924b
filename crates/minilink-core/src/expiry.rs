//! Validity-window computation and lazy expiration checks.
//!
//! Both functions are pure: "now" always comes from the caller, so the
//! policy can be exercised without touching the system clock.

use crate::error::ServiceError;
use jiff::{SignedDuration, Timestamp};

/// Validity window applied when a creation request does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Computes the expiration instant for a record created at `created_at`.
///
/// `validity_minutes` must be a positive integer; anything else is
/// rejected with [`ServiceError::InvalidValidity`].
pub fn compute_expiry(
    created_at: Timestamp,
    validity_minutes: i64,
) -> Result<Timestamp, ServiceError> {
    if validity_minutes <= 0 {
        return Err(ServiceError::InvalidValidity(validity_minutes));
    }

    created_at
        .checked_add(SignedDuration::from_mins(validity_minutes))
        .map_err(|_| ServiceError::InvalidValidity(validity_minutes))
}

/// Whether a record with the given expiration instant is expired at `now`.
///
/// Strict inequality: a record expiring at exactly `now` is still valid
/// at that instant.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    now > expires_at
}
