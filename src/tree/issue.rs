// src/tree/issue.rs
//! Issue Rollup: per-period issue-group tallies, bottom-up.

use crate::error::{ReportError, Result};
use crate::record::IssueMap;
use crate::tree::{NodeId, Tree};

/// Recursively merges children's per-period issue tallies into `node`.
///
/// For each period the issue-group keys reported by any child are unioned
/// and each key's violations/pages are summed exactly once per child. A
/// period where no child reported any group becomes `None` ("no data"),
/// which stays distinct from an empty mapping ("confirmed zero issues" on a
/// leaf).
///
/// # Errors
/// `IncompleteAggregation` if a childless node was never given raw issues.
pub fn rollup_issues(tree: &mut Tree, node: NodeId, period_count: usize) -> Result<()> {
    let children: Vec<NodeId> = tree.children(node).to_vec();
    if children.is_empty() {
        if tree.node(node).issues.is_some() {
            return Ok(());
        }
        return Err(ReportError::IncompleteAggregation {
            path: tree.node(node).path.clone(),
        });
    }

    for &child in &children {
        let c = tree.node(child);
        if !c.is_leaf() || c.issues.is_none() {
            rollup_issues(tree, child, period_count)?;
        }
    }

    let mut totals: Vec<Option<IssueMap>> = Vec::with_capacity(period_count);
    for p in 0..period_count {
        let mut merged = IssueMap::new();
        for &child in &children {
            let issues = tree.node(child).issues.as_ref().ok_or_else(|| {
                ReportError::IncompleteAggregation {
                    path: tree.node(child).path.clone(),
                }
            })?;
            if let Some(map) = issues.get(p).and_then(|period| period.as_ref()) {
                for (key, tally) in map {
                    let entry = merged.entry(key.clone()).or_default();
                    entry.violations += tally.violations;
                    entry.pages += tally.pages;
                }
            }
        }
        totals.push(if merged.is_empty() { None } else { Some(merged) });
    }
    tree.node_mut(node).issues = Some(totals);
    Ok(())
}
