//! Gym-code resolution
//!
//! Matches a parsed gym-code token against a registry snapshot. The registry
//! is external, read-only data; the resolver never creates or mutates
//! records.

use crate::models::GymRecord;

/// Look up a gym by code, case-insensitively. First match wins.
///
/// Codes are assumed unique in the registry; with duplicates the result is
/// whichever entry appears first in the snapshot, which is not a defined
/// tie-break. A miss returns `None` and the caller decides policy: the
/// campaign flow falls back to the unassigned/admin bucket, the bulk flow
/// flags the asset for correction.
pub fn resolve_gym_code<'a>(code: &str, gyms: &'a [GymRecord]) -> Option<&'a GymRecord> {
    if code.is_empty() {
        return None;
    }
    gyms.iter().find(|gym| gym.code.eq_ignore_ascii_case(code))
}
