//! Attributing records to version boundaries

use std::collections::HashSet;

use crate::types::ChangesetRecord;

/// Records in `current` whose id does not occur in `previous`
///
/// Only ids are compared; a record whose content changed between the two
/// snapshots is not new. Order follows `current`.
pub fn diff(current: &[ChangesetRecord], previous: &[ChangesetRecord]) -> Vec<ChangesetRecord> {
    if previous.is_empty() {
        return current.to_vec();
    }

    let seen: HashSet<&str> = previous.iter().map(|r| r.id.as_str()).collect();
    current
        .iter()
        .filter(|r| !seen.contains(r.id.as_str()))
        .cloned()
        .collect()
}
