// tests/unit_tree.rs
use scoretree_core::error::ReportError;
use scoretree_core::record::{IssueMap, Score};
use scoretree_core::tree::{build::insert_leaf, NodeId, Tree};

fn leaf(tree: &mut Tree, id: &str, name: &str, scores: Vec<Score>) -> NodeId {
    let issues = vec![Some(IssueMap::new()); scores.len()];
    insert_leaf(tree, id, name, Vec::new(), scores, issues).expect("insertion should succeed")
}

#[test]
fn leaf_path_joins_every_ancestor() {
    let mut tree = Tree::new("root");
    let id = leaf(&mut tree, "p1", "A:B:C", vec![Score::Value(50.0)]);
    assert_eq!(tree.node(id).path, "root:A:B:C");
    assert_eq!(tree.node(id).name, "C");
}

#[test]
fn shared_prefixes_create_each_intermediate_once() {
    let mut tree = Tree::new("root");
    leaf(&mut tree, "p1", "A:B:C", vec![Score::Value(10.0)]);
    leaf(&mut tree, "p2", "A:B:D", vec![Score::Value(20.0)]);

    // root, A, B, C, D
    assert_eq!(tree.len(), 5);
    let a = tree.child_by_name(tree.root(), "A").expect("A exists");
    assert_eq!(tree.node(a).path, "root:A");
    let b = tree.child_by_name(a, "B").expect("B exists");
    assert_eq!(tree.node(b).path, "root:A:B");
    assert_eq!(tree.children(b).len(), 2);
}

#[test]
fn single_segment_becomes_direct_child() {
    let mut tree = Tree::new("root");
    let id = leaf(&mut tree, "p1", "Solo", vec![Score::Value(42.0)]);
    assert_eq!(tree.node(id).parent(), Some(tree.root()));
    assert_eq!(tree.node(id).path, "root:Solo");
}

#[test]
fn duplicate_insertion_keeps_first_data() {
    let mut tree = Tree::new("root");
    let first = leaf(&mut tree, "p1", "Web", vec![Score::Value(90.0)]);
    let second = leaf(&mut tree, "p2", "Web", vec![Score::Value(10.0)]);

    assert_eq!(first, second);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.node(first).id.as_deref(), Some("p1"));
    assert_eq!(
        tree.node(first).scores.as_deref(),
        Some(&[Score::Value(90.0)][..])
    );
}

#[test]
fn empty_segments_are_rejected() {
    for name in ["", ":A", "A:", "A::B"] {
        let mut tree = Tree::new("root");
        let result = insert_leaf(&mut tree, "p1", name, Vec::new(), Vec::new(), Vec::new());
        assert!(
            matches!(result, Err(ReportError::MalformedPath { .. })),
            "{name:?} should be rejected"
        );
        // Nothing was inserted under the root.
        assert_eq!(tree.len(), 1);
    }
}

#[test]
fn intermediates_carry_no_id_and_no_authored_data() {
    let mut tree = Tree::new("root");
    let id = leaf(&mut tree, "p1", "A:B", vec![Score::Value(5.0)]);
    let a = tree.child_by_name(tree.root(), "A").expect("A exists");

    assert!(tree.node(a).id.is_none());
    assert!(tree.node(a).scores.is_none());
    assert!(tree.node(a).issues.is_none());
    assert_eq!(tree.node(id).id.as_deref(), Some("p1"));
}

#[test]
fn children_keep_insertion_order_until_sorted() {
    let mut tree = Tree::new("root");
    leaf(&mut tree, "p1", "Zebra", vec![]);
    leaf(&mut tree, "p2", "Alpha", vec![]);

    let names: Vec<&str> = tree
        .children(tree.root())
        .iter()
        .map(|&c| tree.node(c).name.as_str())
        .collect();
    assert_eq!(names, ["Zebra", "Alpha"]);

    tree.sort_children_by_path(tree.root());
    let names: Vec<&str> = tree
        .children(tree.root())
        .iter()
        .map(|&c| tree.node(c).name.as_str())
        .collect();
    assert_eq!(names, ["Alpha", "Zebra"]);
}

#[test]
fn every_path_extends_its_parent() {
    let mut tree = Tree::new("root");
    leaf(&mut tree, "p1", "A:B:C", vec![]);
    leaf(&mut tree, "p2", "A:X", vec![]);

    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let node = tree.node(id);
        if let Some(parent) = node.parent() {
            let expected = format!("{}:{}", tree.node(parent).path, node.name);
            assert_eq!(node.path, expected);
        }
        stack.extend(tree.children(id));
    }
}
