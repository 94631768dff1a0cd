use super::*;

use crate::{Error, tree::{BstTree, Side}};

#[test]
fn insert_attaches_without_rotations() {
    let mut tree = BstTree::new();
    let mut trace = Trace::new();
    for x in [1, 2, 3, 4] {
        tree.insert(x, &mut trace);
        tree.validate().expect("valid tree");
    }
    print_tree(&tree);
    assert_eq!(actions(&trace), [Action::Insert(1), Action::Insert(2), Action::Insert(3), Action::Insert(4)]);
    assert_eq!(tree.height(tree.root()), 3);
    assert_eq!(shape(&tree, tree.root()), "(- 1 (- 2 (- 3 4)))");
}

#[test]
fn duplicates_descend_right() {
    let tree: BstTree = build(&[5, 5, 5]);
    assert_eq!(shape(&tree, tree.root()), "(- 5 (- 5 5))");
    assert_eq!(tree.values().collect::<Vec<_>>(), [5, 5, 5]);
    tree.validate().expect("valid tree");
}

#[test]
fn delete_two_children_takes_successor_value() {
    let mut tree: BstTree = build(&[50, 30, 70, 60, 80, 65]);
    let mut trace = Trace::new();
    tree.delete(50, &mut trace).expect("50 is present");
    print_tree(&tree);
    assert_eq!(actions(&trace), [Action::Delete(50)]);
    assert_eq!(shape(&tree, tree.root()), "(30 60 (65 70 80))");
    tree.validate().expect("valid tree");
    assert!(!tree.contains(50));
    assert_eq!(tree.len(), 5);
}

#[test]
fn delete_leaf_and_single_child() {
    let mut tree: BstTree = build(&[4, 2, 6, 1, 7]);
    let mut trace = Trace::new();
    tree.delete(1, &mut trace).expect("leaf");
    tree.delete(6, &mut trace).expect("single child");
    assert_eq!(shape(&tree, tree.root()), "(2 4 7)");
    tree.delete(4, &mut trace).expect("root");
    tree.delete(7, &mut trace).expect("new root");
    tree.delete(2, &mut trace).expect("last node");
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    tree.validate().expect("empty tree is valid");
    validate_steps(&trace);
}

#[test]
fn delete_missing_value_leaves_tree_alone() {
    let mut tree: BstTree = build(&[2, 1, 3]);
    let before = tree.clone();
    let mut trace = Trace::new();
    assert_eq!(tree.delete(9, &mut trace), Err(Error::ValueNotFound(9)));
    assert!(trace.is_empty());
    assert_eq!(tree, before);
}

#[test]
fn search_minimum_and_height() {
    let tree: BstTree = build(&[8, 4, 12, 2, 6, 10, 14, 1]);
    let root = tree.root().expect("non-empty");
    assert_eq!(tree[tree.minimum(root)].value(), 1);
    assert_eq!(tree[tree.maximum(root)].value(), 14);
    assert_eq!(tree.height(None), -1);
    assert_eq!(tree.height(Some(root)), 3);
    assert_eq!(tree.balance_factor(root), 1);
    assert!(tree.search(6).is_some());
    assert!(tree.search(7).is_none());
    assert_eq!(tree.values().collect::<Vec<_>>(), [1, 2, 4, 6, 8, 10, 12, 14]);
}

#[test]
fn cursor_walks_the_snapshot() {
    let tree: BstTree = build(&[8, 4, 12, 6]);
    let mut cursor = tree.cursor();
    assert_eq!(cursor.value(), Some(8));
    assert!(cursor.move_left());
    assert!(cursor.move_right());
    assert_eq!(cursor.value(), Some(6));
    assert_eq!(cursor.depth(), 2);
    assert_eq!(cursor.peek_parent().map( |node| node.value() ), Some(4));
    assert_eq!(cursor.move_parent(), Some(Side::Right));
    assert_eq!(cursor.move_parent(), Some(Side::Left));
    assert_eq!(cursor.move_parent(), None);
    assert!(cursor.move_left());
    assert!(cursor.move_left());
    assert!(cursor.is_nil());
    assert!(!cursor.move_left());
    assert_eq!(tree.cursor_at(12).peek_child(Side::Left), None);
}

#[test]
fn broken_parent_link_is_reported() {
    let mut tree: BstTree = build(&[2, 1, 3]);
    let root = tree.root().expect("non-empty");
    let left = tree[root].left().expect("left child");
    tree[left].parent = None;
    assert!(matches!(tree.is_well_formed(), Err(Error::InvariantViolation(_))));
}
