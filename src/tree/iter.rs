use std::iter::FusedIterator;

use crate::{
    Value,
    tree::{Balance, NodeIndex, NodeRef, Tree}
};

/// In-order walk that follows the parent links instead of keeping a stack.
#[derive(Debug, Clone)]
pub struct Values<'a, B: Balance> {
    pub(crate) tree: &'a Tree<B>,
    pub(crate) front: NodeRef,
}
impl<'a, B: Balance> Iterator for Values<'a, B> {
    type Item = Value;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.front?;
        self.front = self.tree.successor(current);
        Some(self.tree[current].value)
    }
}
impl<'a, B: Balance> FusedIterator for Values<'a, B> {}

/// Pre-order walk over node handles, parents before their children.
#[derive(Debug, Clone)]
pub struct Nodes<'a, B: Balance> {
    pub(crate) tree: &'a Tree<B>,
    pub(crate) stack: Vec<NodeIndex>,
}
impl<'a, B: Balance> Iterator for Nodes<'a, B> {
    type Item = NodeIndex;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let [left, right] = self.tree[current].children;
        self.stack.extend(right);
        self.stack.extend(left);
        Some(current)
    }
}
impl<'a, B: Balance> FusedIterator for Nodes<'a, B> {}

impl<B: Balance> Tree<B> {
    #[inline]
    pub fn values(&self) -> Values<'_, B> {
        Values { tree: self, front: self.bounds.root.map( |root| self.minimum(root) ) }
    }
    #[inline]
    pub fn nodes(&self) -> Nodes<'_, B> {
        Nodes { tree: self, stack: self.bounds.root.into_iter().collect() }
    }
}
