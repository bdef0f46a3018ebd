// src/tree/build.rs
//! Path Splitter: inserts one record's leaf under its organization root.

use crate::error::{ReportError, Result};
use crate::record::{IssueMap, PeriodStamp, Score};
use crate::tree::{NodeId, Tree, PATH_DELIMITER};

/// Splits `project_name` on the delimiter and descends from the root,
/// reusing existing children and creating missing ones, then attaches the
/// final segment as a leaf carrying the record's raw data.
///
/// Intermediate nodes inherit the record's `dates` (for display headers) but
/// never its scores or issues; those stay `None` until rollup derives them.
/// If the leaf already exists the earlier insertion's data is kept.
///
/// # Errors
/// `MalformedPath` if the name is empty or any segment is empty (leading,
/// trailing, or doubled delimiter).
pub fn insert_leaf(
    tree: &mut Tree,
    project_id: &str,
    project_name: &str,
    dates: Vec<PeriodStamp>,
    scores: Vec<Score>,
    issues: Vec<Option<IssueMap>>,
) -> Result<NodeId> {
    let segments: Vec<&str> = project_name.split(PATH_DELIMITER).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ReportError::MalformedPath {
            name: project_name.to_string(),
        });
    }

    // All segments but the last become (or already are) intermediate nodes.
    let last = segments.len() - 1;
    let mut parent = tree.root();
    for &segment in &segments[..last] {
        parent = tree.add_child(parent, None, segment, Some(dates.clone()), None, None);
    }

    Ok(tree.add_child(
        parent,
        Some(project_id.to_string()),
        segments[last],
        Some(dates),
        Some(scores),
        Some(issues),
    ))
}
