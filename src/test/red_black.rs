use super::*;

use crate::tree::Shade;

fn assert_plain(tree: &RbTree) {
    for ptr in tree.nodes() {
        assert_eq!(tree[ptr].shade(), Shade::Plain, "node {} keeps a deletion shade", tree[ptr].value());
    }
}

#[test]
fn first_insert_is_a_black_root() {
    let mut tree = RbTree::new();
    let mut trace = Trace::new();
    tree.insert(7, &mut trace);
    assert_eq!(actions(&trace), [Action::Insert(7)]);
    assert_eq!(rb_colors(&tree), [(7, 'B')]);
}

#[test]
fn outer_grandchild_rotates_once() {
    let mut tree = RbTree::new();
    let mut trace = Trace::new();
    for x in [10, 20, 30] {
        tree.insert(x, &mut trace);
    }
    print_tree(&tree);
    assert_eq!(actions(&trace), [
        Action::Insert(10), Action::Insert(20), Action::Insert(30),
        Action::RotateLeft(10), Action::Recolor(20)
    ]);
    assert_eq!(rotations(&trace), 1);
    assert_eq!(rb_colors(&tree), [(10, 'R'), (20, 'B'), (30, 'R')]);
    assert_eq!(tree.black_height(tree.root()), 1);
    // the rotation snapshot still shows the old colors
    assert!(trace.steps()[3].snapshot.is_balanced().is_err());
    validate_steps(&trace);
}

#[test]
fn inner_grandchild_rotates_twice() {
    let mut tree = RbTree::new();
    let mut trace = Trace::new();
    for x in [10, 30, 20] {
        tree.insert(x, &mut trace);
    }
    assert_eq!(actions(&trace)[3..], [Action::RotateRight(30), Action::RotateLeft(10), Action::Recolor(20)]);
    assert_eq!(rb_colors(&tree), [(10, 'R'), (20, 'B'), (30, 'R')]);
    tree.validate().expect("valid red-black tree");
}

#[test]
fn red_uncle_recolors_up_to_the_root() {
    let mut tree: RbTree = build(&[10, 5, 15]);
    let mut trace = Trace::new();
    tree.insert(1, &mut trace);
    assert_eq!(actions(&trace), [Action::Insert(1), Action::Recolor(10)]);
    assert_eq!(rotations(&trace), 0);
    // the recolor reaching the root leaves it black in the same snapshot
    trace.steps()[1].snapshot.validate().expect("valid red-black tree");
    assert_eq!(rb_colors(&tree), [(1, 'R'), (5, 'B'), (10, 'B'), (15, 'B')]);
}

#[test]
fn recolor_steps_are_balanced() {
    let mut tree = RbTree::new();
    for x in 0..64 {
        let mut trace = Trace::new();
        tree.insert(x, &mut trace);
        for (i, step) in trace.iter().enumerate() {
            if let Action::Recolor(_) = step.action {
                step.snapshot.is_balanced().unwrap_or_else( |e| panic!("+{x} step {i}: {e}") );
            }
        }
        for pair in trace.steps().windows(2) {
            assert_ne!(pair[0].snapshot, pair[1].snapshot, "+{x} records {} twice", pair[1].action);
        }
    }
}

#[test]
fn delete_black_leaf_with_red_nephew() {
    let mut tree: RbTree = build(&[10, 20, 30, 40]);
    assert_eq!(rb_colors(&tree), [(10, 'B'), (20, 'B'), (30, 'B'), (40, 'R')]);
    let mut trace = Trace::new();
    tree.delete(10, &mut trace).expect("10 is present");
    print_tree(&tree);
    assert_eq!(actions(&trace), [Action::Delete(10), Action::RotateLeft(20), Action::Recolor(30)]);
    assert_eq!(rb_colors(&tree), [(20, 'B'), (30, 'B'), (40, 'B')]);
    tree.validate().expect("valid red-black tree");
    assert_plain(&tree);
}

#[test]
fn delete_black_leaf_with_black_sibling() {
    let mut tree: RbTree = build(&[10, 20, 30, 40]);
    let mut trace = Trace::new();
    tree.delete(40, &mut trace).expect("40 is present");
    assert_eq!(actions(&trace), [Action::Delete(40)]);
    tree.delete(10, &mut trace).expect("10 is present");
    assert_eq!(actions(&trace)[1..], [Action::Delete(10), Action::Recolor(30)]);
    assert_eq!(rb_colors(&tree), [(20, 'B'), (30, 'R')]);
    tree.validate().expect("valid red-black tree");
    assert_plain(&tree);
}

#[test]
fn insert_remove() {
    let values = vec![1, 7, 8, 9, 10, 6, 5, 2, 3, 4, 0, 11];
    let mut tree = RbTree::new();
    for x in values.iter().copied() {
        println!("==================== +{} ====================", x);
        let mut trace = Trace::new();
        tree.insert(x, &mut trace);
        print_tree(&tree);
        tree.validate().expect("valid red-black tree");
        validate_steps(&trace);
    }
    for x in values.into_iter() {
        println!("==================== -{} ====================", x);
        let mut trace = Trace::new();
        tree.delete(x, &mut trace).expect("value is present");
        print_tree(&tree);
        tree.validate().expect("valid red-black tree");
        validate_steps(&trace);
        assert_plain(&tree);
        assert!(!tree.contains(x));
    }
    assert!(tree.is_empty());
}

#[test]
fn iter() {
    let mut values = vec![1, 7, 8, 9, 10, 6, 5, 2, 3, 4, 0, 11];
    let tree: RbTree = build(&values);
    print_tree(&tree);
    values.sort_unstable();
    assert_eq!(tree.values().collect::<Vec<_>>(), values);
    assert_eq!(tree.nodes().count(), values.len());
}
