mod node;
pub use node::*;
mod interface;
pub use interface::*;
mod iter;
pub use iter::*;
mod cursor;
pub use cursor::*;
mod validate;
mod avl;
pub use avl::*;
mod red_black;
pub use red_black::*;

use std::{
    fmt::Debug,
    ops::{Index as IndexRO, IndexMut}
};

use crate::{
    Result, Value,
    arena::Arena,
    trace::{Action, Trace},
};

/// Rebalancing strategy of a binary search tree.
///
/// The shared skeleton in [`Tree`] attaches and splices nodes, implementors
/// repair whatever invariant they maintain on top of the search order.
pub trait Balance: Sized + Debug + Clone + PartialEq + Eq {
    type Meta: Copy + Debug + PartialEq + Eq;
    /// Metadata of a node that becomes the root of an empty tree.
    fn root_meta() -> Self::Meta;
    /// Metadata of a freshly attached leaf.
    fn leaf_meta() -> Self::Meta;
    /// Recomputes derived metadata of a node whose children changed.
    #[inline(always)]
    fn refresh(_tree: &mut Tree<Self>, _ptr: NodeIndex) { }
    fn repair_insert(tree: &mut Tree<Self>, ptr: NodeIndex, trace: &mut Trace<Tree<Self>>);
    fn repair_remove(tree: &mut Tree<Self>, splice: Splice<Self::Meta>, trace: &mut Trace<Tree<Self>>);
    fn check(tree: &Tree<Self>) -> Result<()>;
}

/// Where a node was physically removed.
#[derive(Debug, Clone, Copy)]
pub struct Splice<M> {
    pub parent: NodeRef,
    /// The child that took the removed node's place.
    pub child: NodeRef,
    /// Side of `parent` the removed node hung on, meaningless without a parent.
    pub side: Side,
    /// Metadata of the removed node.
    pub meta: M,
}

/// Plain binary search tree, nothing is repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plain;
impl Balance for Plain {
    type Meta = ();
    #[inline(always)]
    fn root_meta() -> Self::Meta { }
    #[inline(always)]
    fn leaf_meta() -> Self::Meta { }
    #[inline(always)]
    fn repair_insert(_tree: &mut Tree<Self>, _ptr: NodeIndex, _trace: &mut Trace<Tree<Self>>) { }
    #[inline(always)]
    fn repair_remove(_tree: &mut Tree<Self>, _splice: Splice<Self::Meta>, _trace: &mut Trace<Tree<Self>>) { }
    #[inline(always)]
    fn check(_tree: &Tree<Self>) -> Result<()> {
        Ok(())
    }
}

pub type BstTree = Tree<Plain>;
pub type AvlTree = Tree<Avl>;
pub type RbTree = Tree<RedBlack>;

#[derive(Debug)]
enum SearchResult<T> {
    Empty,
    LeftOf(T),
    Here(T),
    RightOf(T)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Bounds {
    root: NodeRef,
}

/// Binary search tree whose nodes live in an arena.
///
/// Children are owned through `children`, `parent` is a back-reference into
/// the same arena that is only ever followed upwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<B: Balance> {
    nodes: Arena<Node<B::Meta>>,
    bounds: Bounds,
}

impl<B: Balance> IndexRO<NodeIndex> for Tree<B> {
    type Output = Node<B::Meta>;
    #[inline(always)]
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}
impl<B: Balance> IndexMut<NodeIndex> for Tree<B> {
    #[inline(always)]
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

impl<B: Balance> Tree<B> {
    #[inline]
    pub const fn new() -> Self {
        Self { nodes: Arena::new(), bounds: Bounds { root: None } }
    }
    /// Descends from the root going left on `<` and right on `>=`.
    #[inline]
    fn search_slot(&self, value: Value) -> SearchResult<NodeIndex> {
        let (mut ptr, mut parent, mut left) = (self.bounds.root, None, false);
        while let Some(valid) = ptr {
            parent = ptr;
            let node = &self[valid];
            if value < node.value {
                left = true;
                ptr = node.children[0];
            } else {
                left = false;
                ptr = node.children[1];
            }
        }
        match parent {
            Some(parent) if left => SearchResult::LeftOf(parent),
            Some(parent) => SearchResult::RightOf(parent),
            None => SearchResult::Empty
        }
    }
    #[inline]
    fn search_value(&self, value: Value) -> SearchResult<NodeIndex> {
        let (mut ptr, mut parent, mut left) = (self.bounds.root, None, false);
        while let Some(valid) = ptr {
            let node = &self[valid];
            if value == node.value {
                return SearchResult::Here(valid);
            }
            parent = ptr;
            left = value < node.value;
            ptr = node.children[!left as usize];
        }
        match parent {
            Some(parent) if left => SearchResult::LeftOf(parent),
            Some(parent) => SearchResult::RightOf(parent),
            None => SearchResult::Empty
        }
    }
    /// Side of `parent` that `ptr` hangs on.
    #[inline]
    pub(crate) fn side_of(&self, parent: NodeIndex, ptr: NodeIndex) -> Side {
        if self[parent].children[0] == Some(ptr) { Side::Left } else { Side::Right }
    }
    /// Links a new leaf below `parent` and returns it.
    #[inline]
    fn attach(&mut self, value: Value, parent: NodeIndex, side: Side) -> NodeIndex {
        let mut node = Node::new(value, B::leaf_meta());
        node.parent = Some(parent);
        let ptr = self.nodes.insert(node);
        self[parent].children[side as usize] = Some(ptr);
        ptr
    }
    /// Rotates the subtree at `ptr` towards `side` and records the step.
    ///
    /// Returns the node that took the place of `ptr`.
    ///
    /// # Panics
    /// If `ptr` has no child opposite to `side`.
    pub(crate) fn rotate(&mut self, ptr: NodeIndex, side: Side, trace: &mut Trace<Self>) -> NodeIndex {
        let node = &self[ptr];
        let parent = node.parent;
        let pivot = node.child(!side)
            .unwrap_or_else( || panic!("rotating {} {:?} needs a child on the other side", node.value, side) );
        let pivot_node = &mut self[pivot];
        let inner = pivot_node.children[side as usize];
        pivot_node.parent = parent;
        pivot_node.children[side as usize] = Some(ptr);
        if let Some(inner) = inner {
            self[inner].parent = Some(ptr);
        }
        let node = &mut self[ptr];
        node.parent = Some(pivot);
        node.children[!side as usize] = inner;
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, ptr);
                self[parent].children[side as usize] = Some(pivot);
            },
            None => self.bounds.root = Some(pivot)
        }
        B::refresh(self, ptr);
        B::refresh(self, pivot);
        let value = self[ptr].value;
        tracing::trace!("rotating {value} {side:?}");
        trace.record(self, match side {
            Side::Left => Action::RotateLeft(value),
            Side::Right => Action::RotateRight(value)
        });
        pivot
    }
    /// Replaces `ptr` by `child` in the eyes of its parent.
    #[inline]
    fn transplant(&mut self, ptr: NodeIndex, child: NodeRef) {
        let parent = self[ptr].parent;
        if let Some(child) = child {
            self[child].parent = parent;
        }
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, ptr);
                self[parent].children[side as usize] = child;
            },
            None => self.bounds.root = child
        }
    }
    /// Physically removes `ptr`, which has at most one child.
    #[inline]
    fn splice(&mut self, ptr: NodeIndex) -> Splice<B::Meta> {
        let node = &self[ptr];
        debug_assert!(node.children[0].is_none() || node.children[1].is_none(), "spliced node has two children");
        let child = node.children[0].or(node.children[1]);
        let parent = node.parent;
        let meta = node.meta;
        let side = parent.map_or(Side::Left, |parent| self.side_of(parent, ptr) );
        self.transplant(ptr, child);
        self.nodes.remove(ptr);
        Splice { parent, child, side, meta }
    }
}
impl<B: Balance> Default for Tree<B> {
    #[inline(always)]
    fn default() -> Self { Self::new() }
}
