// src/forest.rs
//! Forest Assembly: one rolled-up tree per organization.

use crate::error::Result;
use crate::order::reorder_by_key;
use crate::record::{IssueMap, PeriodStamp, RawRecord, Score};
use crate::tree::{build, issue, score, Tree};

/// Groups `records` by organization name and builds one tree per distinct
/// organization: every record is inserted under its organization's synthetic
/// root, both rollup passes run, and the root's children are re-sorted by
/// `path`. Roots are returned in first-seen organization order; callers that
/// want alphabetical output sort the records beforehand.
///
/// # Errors
/// Propagates `MalformedPath` from insertion and `IncompleteAggregation`
/// from the rollups.
pub fn assemble(records: &[RawRecord], period_count: usize) -> Result<Vec<Tree>> {
    let mut org_order: Vec<&str> = Vec::new();
    for record in records {
        if !org_order.iter().any(|org| *org == record.org_name) {
            org_order.push(&record.org_name);
        }
    }

    let mut forest = Vec::with_capacity(org_order.len());
    for org in org_order {
        let mut tree = Tree::new(org);
        for record in records.iter().filter(|r| r.org_name == org) {
            let (dates, scores, issues) = normalize(record, period_count);
            build::insert_leaf(
                &mut tree,
                &record.project_id,
                &record.project_name,
                dates,
                scores,
                issues,
            )?;
        }
        let root = tree.root();
        score::rollup_scores(&mut tree, root, period_count)?;
        issue::rollup_issues(&mut tree, root, period_count)?;
        tree.sort_children_by_path(root);
        forest.push(tree);
    }
    Ok(forest)
}

/// Restores chronological order of a record's per-period arrays (concurrent
/// fetches append in completion order) and pads them to the configured
/// period count: missing scores become N/A, missing issue periods an empty
/// mapping. Surplus entries beyond the period count are dropped.
fn normalize(
    record: &RawRecord,
    period_count: usize,
) -> (Vec<PeriodStamp>, Vec<Score>, Vec<Option<IssueMap>>) {
    let dates = reorder_by_key(record.dates.clone(), |d| d.id, false);

    let tagged = reorder_by_key(record.scores.clone(), |s| s.id, false);
    let mut scores: Vec<Score> = tagged.into_iter().map(|s| s.value).collect();
    scores.truncate(period_count);
    scores.resize(period_count, Score::NotApplicable);

    let mut issues: Vec<Option<IssueMap>> = record.issues.iter().cloned().map(Some).collect();
    issues.truncate(period_count);
    issues.resize(period_count, Some(IssueMap::new()));

    (dates, scores, issues)
}
