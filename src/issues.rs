// src/issues.rs
//! Issue Filter: reduces a raw per-page issue list into per-group tallies.

use serde::Deserialize;

use crate::record::{IssueMap, IssueTally};

/// One row of a summary report's issue list, as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueEntry {
    pub issuegrouping: String,
    /// Violation count for this page/group pair.
    pub issues: u64,
    pub pages: u64,
}

/// Accumulates a raw issue list into a mapping from issue group to summed
/// violation/page counts. Pure; input order does not matter. Empty input
/// yields an empty mapping.
#[must_use]
pub fn filter_issues(issuelist: &[IssueEntry]) -> IssueMap {
    let mut acc = IssueMap::new();
    for item in issuelist {
        let tally = acc.entry(item.issuegrouping.clone()).or_default();
        tally.violations += item.issues;
        tally.pages += item.pages;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(group: &str, issues: u64, pages: u64) -> IssueEntry {
        IssueEntry {
            issuegrouping: group.to_string(),
            issues,
            pages,
        }
    }

    #[test]
    fn empty_list_yields_empty_map() {
        assert!(filter_issues(&[]).is_empty());
    }

    #[test]
    fn sums_across_entries_sharing_a_group() {
        let list = vec![
            entry("critical", 2, 1),
            entry("moderate", 1, 1),
            entry("critical", 3, 4),
        ];
        let map = filter_issues(&list);
        assert_eq!(map["critical"], IssueTally::new(5, 5));
        assert_eq!(map["moderate"], IssueTally::new(1, 1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn order_independent() {
        let a = filter_issues(&[entry("x", 1, 1), entry("y", 2, 2)]);
        let b = filter_issues(&[entry("y", 2, 2), entry("x", 1, 1)]);
        assert_eq!(a, b);
    }
}
