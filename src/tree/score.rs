// src/tree/score.rs
//! Score Rollup: per-period arithmetic mean, bottom-up.

use crate::error::{ReportError, Result};
use crate::record::Score;
use crate::tree::{NodeId, Tree};

/// Per-period accumulator. N/A is sticky: once any child reports the
/// sentinel for a period, that period never averages partial data.
#[derive(Clone, Copy)]
enum Acc {
    Empty,
    Sum(f64),
    Na,
}

/// Recursively computes `node`'s per-period scores as the mean of its
/// children's scores.
///
/// Divisor policy: the divisor is always the full child count. Because the
/// sum short-circuits to N/A when any child is N/A for a period, a numeric
/// sum implies every child contributed, so the full count and the
/// contributing count coincide; a period with any N/A child is published as
/// N/A itself, never as a partial average or a zero.
///
/// # Errors
/// `IncompleteAggregation` if a childless node was never given raw scores.
pub fn rollup_scores(tree: &mut Tree, node: NodeId, period_count: usize) -> Result<()> {
    let children: Vec<NodeId> = tree.children(node).to_vec();
    if children.is_empty() {
        // Leaves already carry authored scores; nothing to derive.
        if tree.node(node).scores.is_some() {
            return Ok(());
        }
        return Err(ReportError::IncompleteAggregation {
            path: tree.node(node).path.clone(),
        });
    }

    for &child in &children {
        let c = tree.node(child);
        if !c.is_leaf() || c.scores.is_none() {
            rollup_scores(tree, child, period_count)?;
        }
    }

    let mut acc = vec![Acc::Empty; period_count];
    for &child in &children {
        let scores = tree.node(child).scores.as_ref().ok_or_else(|| {
            ReportError::IncompleteAggregation {
                path: tree.node(child).path.clone(),
            }
        })?;
        for (p, slot) in acc.iter_mut().enumerate() {
            match scores.get(p) {
                Some(Score::Value(v)) => {
                    *slot = match *slot {
                        Acc::Empty => Acc::Sum(*v),
                        Acc::Sum(s) => Acc::Sum(s + v),
                        Acc::Na => Acc::Na,
                    };
                }
                // Unset counts the same as the sentinel.
                Some(Score::NotApplicable) | None => *slot = Acc::Na,
            }
        }
    }

    let divisor = children.len() as f64;
    let averages = acc
        .into_iter()
        .map(|slot| match slot {
            Acc::Sum(s) => Score::Value(s / divisor),
            Acc::Na | Acc::Empty => Score::NotApplicable,
        })
        .collect();
    tree.node_mut(node).scores = Some(averages);
    Ok(())
}
