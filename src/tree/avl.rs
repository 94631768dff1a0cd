use crate::{
    Error, Result,
    trace::Trace,
    tree::{Balance, NodeIndex, NodeRef, Side, Splice, Tree}
};

/// Height-balanced tree, every node caches its height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avl;

impl Tree<Avl> {
    #[inline(always)]
    fn cached_height(&self, ptr: NodeRef) -> i32 {
        ptr.map_or(-1, |ptr| self[ptr].meta )
    }
    #[inline]
    fn cached_balance(&self, ptr: NodeIndex) -> i32 {
        let [left, right] = self[ptr].children;
        self.cached_height(left) - self.cached_height(right)
    }
    /// Applies the single or double rotation that fixes an imbalance at `ptr`.
    ///
    /// Returns the new root of the subtree.
    fn restructure(&mut self, ptr: NodeIndex, trace: &mut Trace<Self>) -> NodeIndex {
        let heavy = if self.cached_balance(ptr) > 0 { Side::Left } else { Side::Right };
        // an imbalance of two means the heavy side holds at least one node
        let Some(child) = self[ptr].child(heavy) else { return ptr };
        let outer = self.cached_height(self[child].child(heavy));
        let inner = self.cached_height(self[child].child(!heavy));
        tracing::trace!("node {} is {heavy:?} heavy", self[ptr].value);
        if inner > outer {
            self.rotate(child, heavy, trace);
        }
        self.rotate(ptr, !heavy, trace)
    }
}

impl Balance for Avl {
    type Meta = i32;
    #[inline(always)]
    fn root_meta() -> Self::Meta { 0 }
    #[inline(always)]
    fn leaf_meta() -> Self::Meta { 0 }
    #[inline]
    fn refresh(tree: &mut Tree<Self>, ptr: NodeIndex) {
        let [left, right] = tree[ptr].children;
        tree[ptr].meta = 1 + tree.cached_height(left).max(tree.cached_height(right));
    }
    /// Walks up from the new leaf and stops at the first ancestor whose height
    /// did not change, or after the one restructuring an insertion can need.
    fn repair_insert(tree: &mut Tree<Self>, ptr: NodeIndex, trace: &mut Trace<Tree<Self>>) {
        let mut ptr = tree[ptr].parent;
        while let Some(node) = ptr {
            let before = tree[node].meta;
            Self::refresh(tree, node);
            if tree.cached_balance(node).abs() >= 2 {
                tree.restructure(node, trace);
                break;
            }
            if tree[node].meta == before {
                break;
            }
            ptr = tree[node].parent;
        }
    }
    /// Walks all the way to the root, a fix at one level can unbalance the next.
    fn repair_remove(tree: &mut Tree<Self>, splice: Splice<Self::Meta>, trace: &mut Trace<Tree<Self>>) {
        let mut ptr = splice.parent;
        while let Some(node) = ptr {
            Self::refresh(tree, node);
            let top = if tree.cached_balance(node).abs() >= 2 {
                tree.restructure(node, trace)
            } else {
                node
            };
            ptr = tree[top].parent;
        }
    }
    fn check(tree: &Tree<Self>) -> Result<()> {
        fn check_node(tree: &Tree<Avl>, ptr: NodeRef) -> Result<i32> {
            let Some(ptr) = ptr else { return Ok(-1) };
            let node = &tree[ptr];
            let left = check_node(tree, node.children[0])?;
            let right = check_node(tree, node.children[1])?;
            if (left - right).abs() > 1 {
                return Err(Error::InvariantViolation(format!(
                    "node {} has balance factor {}", node.value, left - right
                )));
            }
            let height = 1 + left.max(right);
            if node.meta != height {
                return Err(Error::InvariantViolation(format!(
                    "node {} caches height {} but has height {}", node.value, node.meta, height
                )));
            }
            Ok(height)
        }
        check_node(tree, tree.root()).map( |_| () )
    }
}
