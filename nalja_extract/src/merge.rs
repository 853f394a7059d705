//! Combining recognizer output into one list.

use std::collections::HashSet;

use nalja_core::{Candidate, ExtractedMatch};

/// Merge candidate lists, keeping the first match seen at each offset.
///
/// Lists are taken in priority order and each keeps its own order; nothing is
/// re-sorted. A later list only contributes matches at offsets no earlier
/// list (or earlier entry of its own) has claimed.
#[must_use]
pub fn dedup_by_offset<I>(lists: I) -> Vec<ExtractedMatch>
where
    I: IntoIterator<Item = Vec<Candidate>>,
{
    let mut claimed = HashSet::new();
    let mut merged = Vec::new();
    for list in lists {
        for candidate in list {
            if claimed.insert(candidate.index()) {
                merged.push(candidate.into_match());
            }
        }
    }
    merged
}
