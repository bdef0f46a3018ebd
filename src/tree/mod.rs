// src/tree/mod.rs
//! Arena-backed organization tree.
//!
//! Nodes live in a flat arena and refer to each other by index, so the
//! child-to-parent back-reference is a plain lookup that can never form a
//! reference cycle: serializing a [`NodeView`] walks `children` only and the
//! parent link is structurally absent from the output.

pub mod build;
pub mod issue;
pub mod score;

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};

use crate::order::reorder_by_key;
use crate::record::{IssueMap, PeriodStamp, Score};

/// Segment delimiter in hierarchical project names.
pub const PATH_DELIMITER: char = ':';

/// Index of a node within its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One organizational unit or project.
///
/// Leaves (created from a real record) own authored `scores`/`issues`;
/// internal nodes hold `None` until the rollup passes overwrite them, each
/// exactly once. `dates` is absent only on the synthetic root, which is
/// created before any record is seen.
#[derive(Debug)]
pub struct TreeNode {
    pub id: Option<String>,
    pub name: String,
    /// Colon-joined ancestor names down to and including this node; the
    /// external identity/link key.
    pub path: String,
    pub dates: Option<Vec<PeriodStamp>>,
    pub scores: Option<Vec<Score>>,
    /// Per-period tallies. A leaf period with no issues is `Some(empty)`;
    /// an internal-node period where no child reported anything is `None`,
    /// keeping "no data" distinct from "confirmed zero issues".
    pub issues: Option<Vec<Option<IssueMap>>>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    // Fast has-this-name lookup; `children` alone preserves insertion order.
    child_index: HashMap<String, NodeId>,
}

impl TreeNode {
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A single organization's tree. The root is synthetic: no `id`, its `path`
/// is its own name.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    #[must_use]
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![TreeNode {
                id: None,
                name: root_name.to_string(),
                path: root_name.to_string(),
                dates: None,
                scores: None,
                issues: None,
                parent: None,
                children: Vec::new(),
                child_index: HashMap::new(),
            }],
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Looks up a direct child by name.
    #[must_use]
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[parent.0].child_index.get(name).copied()
    }

    /// Returns the existing child with this name, or creates a new one.
    /// On reuse the supplied data is discarded: the first insertion under a
    /// name wins and later duplicates are silently merged into it.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        id: Option<String>,
        name: &str,
        dates: Option<Vec<PeriodStamp>>,
        scores: Option<Vec<Score>>,
        issues: Option<Vec<Option<IssueMap>>>,
    ) -> NodeId {
        if let Some(existing) = self.child_by_name(parent, name) {
            return existing;
        }
        let path = format!("{}{}{}", self.nodes[parent.0].path, PATH_DELIMITER, name);
        let child = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            id,
            name: name.to_string(),
            path,
            dates,
            scores,
            issues,
            parent: Some(parent),
            children: Vec::new(),
            child_index: HashMap::new(),
        });
        self.nodes[parent.0].children.push(child);
        self.nodes[parent.0]
            .child_index
            .insert(name.to_string(), child);
        child
    }

    /// Re-sorts a node's children lexicographically by `path` for
    /// deterministic, human-readable output.
    pub fn sort_children_by_path(&mut self, id: NodeId) {
        let ids = std::mem::take(&mut self.nodes[id.0].children);
        let sorted = reorder_by_key(ids, |c| self.nodes[c.0].path.clone(), false);
        self.nodes[id.0].children = sorted;
    }

    /// Serializable view rooted at this tree's root.
    #[must_use]
    pub fn view(&self) -> NodeView<'_> {
        NodeView {
            tree: self,
            id: self.root(),
        }
    }
}

/// Serializes a node and its descendants as a nested object, children
/// inline, parent link omitted.
pub struct NodeView<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.tree.node(self.id);
        let mut st = serializer.serialize_struct("TreeNode", 7)?;
        st.serialize_field("id", &node.id)?;
        st.serialize_field("name", &node.name)?;
        st.serialize_field("path", &node.path)?;
        st.serialize_field("dates", &node.dates)?;
        st.serialize_field("scores", &node.scores)?;
        st.serialize_field("issues", &node.issues)?;
        st.serialize_field(
            "children",
            &ChildrenView {
                tree: self.tree,
                ids: node.children(),
            },
        )?;
        st.end()
    }
}

struct ChildrenView<'a> {
    tree: &'a Tree,
    ids: &'a [NodeId],
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for &id in self.ids {
            seq.serialize_element(&NodeView {
                tree: self.tree,
                id,
            })?;
        }
        seq.end()
    }
}
