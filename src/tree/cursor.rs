use crate::{
    Value,
    tree::{Balance, Node, NodeRef, Side, Tree}
};

/// Read-only position inside a tree, for walking snapshots node by node.
///
/// A cursor may sit on a nil slot; moving from there is a no-op.
#[derive(Debug)]
pub struct Cursor<'a, B: Balance> {
    tree: &'a Tree<B>,
    current: NodeRef,
}
impl<'a, B: Balance> Clone for Cursor<'a, B> {
    #[inline]
    fn clone(&self) -> Self {
        Self { tree: self.tree, current: self.current }
    }
}

impl<B: Balance> Tree<B> {
    #[inline]
    pub fn cursor(&self) -> Cursor<'_, B> {
        Cursor { tree: self, current: self.bounds.root }
    }
    #[inline]
    pub fn cursor_at(&self, value: Value) -> Cursor<'_, B> {
        Cursor { tree: self, current: self.search(value) }
    }
}

impl<'a, B: Balance> Cursor<'a, B> {
    #[inline(always)]
    pub fn position(&self) -> NodeRef {
        self.current
    }
    #[inline(always)]
    pub fn is_nil(&self) -> bool {
        self.current.is_none()
    }
    #[inline]
    pub fn node(&self) -> Option<&'a Node<B::Meta>> {
        Some(&self.tree[self.current?])
    }
    #[inline]
    pub fn value(&self) -> Option<Value> {
        Some(self.tree[self.current?].value)
    }
    /// Moves up, returns the side the cursor came from.
    #[inline]
    pub fn move_parent(&mut self) -> Option<Side> {
        let current = self.current?;
        let parent = self.tree[current].parent?;
        self.current = Some(parent);
        Some(self.tree.side_of(parent, current))
    }
    /// Moves down, possibly onto a nil slot. Returns `false` when already on nil.
    #[inline]
    pub fn move_child(&mut self, side: Side) -> bool {
        let Some(current) = self.current else { return false };
        self.current = self.tree[current].child(side);
        true
    }
    #[inline(always)]
    pub fn move_left(&mut self) -> bool {
        self.move_child(Side::Left)
    }
    #[inline(always)]
    pub fn move_right(&mut self) -> bool {
        self.move_child(Side::Right)
    }
    #[inline]
    pub fn peek_child(&self, side: Side) -> Option<&'a Node<B::Meta>> {
        let child = self.tree[self.current?].child(side)?;
        Some(&self.tree[child])
    }
    #[inline]
    pub fn peek_parent(&self) -> Option<&'a Node<B::Meta>> {
        let parent = self.tree[self.current?].parent?;
        Some(&self.tree[parent])
    }
    /// Number of edges between the root and the cursor.
    #[inline]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut ptr = self.current;
        while let Some(parent) = ptr.and_then( |ptr| self.tree[ptr].parent ) {
            depth += 1;
            ptr = Some(parent);
        }
        depth
    }
}
