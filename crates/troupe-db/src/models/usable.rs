//! Shared lifecycle for single-use, expiring, invalidatable tokens.
//!
//! Refresh tokens, verification codes, and group invitations all share the
//! same three lifecycle columns (`invalidated_at`, `expires_at`, `used_at`)
//! and the same validity rule. The rule lives here as a trait over that
//! structural shape so each entity embeds the columns and gets the checks,
//! without any inheritance-style coupling between the entity types.
//!
//! Rows carrying this shape are never deleted; terminal states are recorded
//! by stamping `used_at` or `invalidated_at`, or reached passively when
//! `expires_at` passes.

use chrono::{DateTime, Utc};

/// The state a usable token is observed in at a point in time.
///
/// Variant order matters: `usability_at` reports the first failing check in
/// priority order (used, then invalidated, then expired), so a token that is
/// both used and expired reports `Used`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usability {
    /// Token may still be consumed.
    Usable,
    /// Token was already consumed (`used_at` set).
    Used,
    /// Token was superseded or revoked (`invalidated_at` set).
    Invalidated,
    /// Token's `expires_at` has passed.
    Expired,
}

/// Common lifecycle interface for any single-use, expiring, invalidatable
/// token.
pub trait Usable {
    /// When the token was superseded or revoked (None if still live).
    fn invalidated_at(&self) -> Option<DateTime<Utc>>;

    /// When the token expires.
    fn expires_at(&self) -> DateTime<Utc>;

    /// When the token was consumed (None if never consumed).
    fn used_at(&self) -> Option<DateTime<Utc>>;

    /// Classify the token's state as observed at `now`.
    fn usability_at(&self, now: DateTime<Utc>) -> Usability {
        if self.used_at().is_some() {
            Usability::Used
        } else if self.invalidated_at().is_some() {
            Usability::Invalidated
        } else if now >= self.expires_at() {
            Usability::Expired
        } else {
            Usability::Usable
        }
    }

    /// Classify the token's state as observed now.
    fn usability(&self) -> Usability {
        self.usability_at(Utc::now())
    }

    /// Check whether the token may still be consumed.
    fn is_usable(&self) -> bool {
        self.usability() == Usability::Usable
    }

    /// Check if the token has been consumed.
    fn is_used(&self) -> bool {
        self.used_at().is_some()
    }

    /// Check if the token has been superseded or revoked.
    fn is_invalidated(&self) -> bool {
        self.invalidated_at().is_some()
    }

    /// Check if the token has expired.
    fn is_expired(&self) -> bool {
        self.expires_at() <= Utc::now()
    }
}
