mod bst;
mod properties;
mod red_black;

use crate::{
    Value,
    btree::{BTree, Node as BNode},
    trace::{Action, Trace},
    tree::{Balance, NodeRef, RbTree, Tree}
};

fn print_subtree<B: Balance>(root: NodeRef, depth: u8, markers: u32, tree: &Tree<B>) {
    for i in 0..depth {
        if markers & (1 << i) == 0 {
            print!("| ");
        } else {
            print!("  ");
        }
    }
    let Some(root) = root
        else {
            println!("NIL");
            return;
        };
    let node = &tree[root];
    println!("{} {:?}", node.value(), node.meta());
    print_subtree(node.left(), depth + 1, markers, tree);
    print_subtree(node.right(), depth + 1, markers | (1 << (depth + 1)), tree);
}
fn print_tree<B: Balance>(tree: &Tree<B>) {
    print_subtree(tree.root(), 0, 1, tree);
}
fn print_bnode(node: &BNode, depth: usize) {
    println!("{}{:?}", "  ".repeat(depth), node.keys());
    for child in node.children() {
        print_bnode(child, depth + 1);
    }
}
fn print_btree(tree: &BTree) {
    print_bnode(tree.root(), 0);
}

fn build<B: Balance>(values: &[Value]) -> Tree<B> {
    values.iter().copied().collect()
}
fn build_btree(degree: usize, values: &[Value]) -> BTree {
    let mut tree = BTree::new(degree).expect("valid degree");
    let mut trace = Trace::silent();
    for value in values {
        tree.insert(*value, &mut trace);
    }
    tree
}

/// Structure and search order hold in every snapshot of a binary tree trace.
fn validate_steps<B: Balance>(trace: &Trace<Tree<B>>) {
    for (i, step) in trace.iter().enumerate() {
        step.snapshot.is_well_formed().unwrap_or_else( |e| panic!("step {i} ({}): {e}", step.action) );
        step.snapshot.is_ordered().unwrap_or_else( |e| panic!("step {i} ({}): {e}", step.action) );
    }
}
fn actions<T>(trace: &Trace<T>) -> Vec<Action> {
    trace.actions().collect()
}
fn rotations<T>(trace: &Trace<T>) -> usize {
    trace.actions().filter(Action::is_rotation).count()
}
/// Values along the left and right spine, for eyeballing shapes in assertions.
fn shape<B: Balance>(tree: &Tree<B>, ptr: NodeRef) -> String {
    let Some(ptr) = ptr else { return "-".into() };
    let node = &tree[ptr];
    if node.is_leaf() {
        return node.value().to_string();
    }
    format!("({} {} {})", shape(tree, node.left()), node.value(), shape(tree, node.right()))
}
fn rb_colors(tree: &RbTree) -> Vec<(Value, char)> {
    let mut colors = tree.nodes()
        .map( |ptr| (tree[ptr].value(), if tree[ptr].is_red() { 'R' } else { 'B' }) )
        .collect::<Vec<_>>();
    colors.sort_unstable();
    colors
}
