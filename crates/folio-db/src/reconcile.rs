//! Id diffing for collection reconciliation.
//!
//! A save submits the full desired list for each collection. Items
//! carrying an id match existing rows (update); items without one are
//! pending inserts. Every existing id absent from the submission is
//! deleted, so the persisted id set ends up exactly equal to the
//! submitted one.

use std::collections::HashSet;

/// Ids present among the submitted items (items without an id ignored).
pub fn submitted_ids<I>(ids: I) -> HashSet<i64>
where
    I: IntoIterator<Item = Option<i64>>,
{
    ids.into_iter().flatten().collect()
}

/// Existing ids that must be deleted to match the submission.
///
/// Returned in the existing rows' order so deletions (and their image
/// cleanup) run in a stable sequence.
pub fn ids_to_delete(existing: &[i64], submitted: &HashSet<i64>) -> Vec<i64> {
    existing
        .iter()
        .copied()
        .filter(|id| !submitted.contains(id))
        .collect()
}
