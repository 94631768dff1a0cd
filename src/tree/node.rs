use std::ops::Not;

use crate::Value;
pub use crate::arena::Index as NodeIndex;

pub type NodeRef = Option<NodeIndex>;

#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left = 0,
    Right = 1,
}
impl Not for Side {
    type Output = Side;
    #[inline]
    fn not(self) -> Self::Output {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red = 0,
    Black = 1,
}
impl Not for Color {
    type Output = Color;
    #[inline]
    fn not(self) -> Self::Output {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red
        }
    }
}

/// How a red-black node is drawn, independent of its color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Shade {
    #[default]
    Plain,
    /// Black node carrying an extra black during deletion ("bb").
    DoubleBlack,
    /// Red node that absorbs an extra black during deletion, drawn dashed ("rb").
    RedBlack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Paint {
    pub color: Color,
    pub shade: Shade,
}
impl Paint {
    #[inline]
    pub const fn new(color: Color) -> Self {
        Self { color, shade: Shade::Plain }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<M> {
    pub(crate) value: Value,
    pub(crate) parent: NodeRef,
    pub(crate) children: [NodeRef; 2],
    pub(crate) meta: M,
}
impl<M> Node<M> {
    #[inline]
    pub const fn new(value: Value, meta: M) -> Self {
        Self { value, parent: None, children: [None, None], meta }
    }
    #[inline(always)]
    pub const fn value(&self) -> Value {
        self.value
    }
    /// Back-reference for upward traversal, never an ownership edge.
    #[inline(always)]
    pub const fn parent(&self) -> NodeRef {
        self.parent
    }
    #[inline(always)]
    pub const fn child(&self, side: Side) -> NodeRef {
        self.children[side as usize]
    }
    #[inline(always)]
    pub const fn left(&self) -> NodeRef {
        self.children[0]
    }
    #[inline(always)]
    pub const fn right(&self) -> NodeRef {
        self.children[1]
    }
    #[inline(always)]
    pub const fn is_leaf(&self) -> bool {
        self.children[0].is_none() && self.children[1].is_none()
    }
    #[inline(always)]
    pub const fn meta(&self) -> &M {
        &self.meta
    }
}
impl Node<i32> {
    /// Cached AVL height, a leaf has height 0.
    #[inline(always)]
    pub const fn height(&self) -> i32 {
        self.meta
    }
}
impl Node<Paint> {
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.meta.color
    }
    #[inline(always)]
    pub const fn shade(&self) -> Shade {
        self.meta.shade
    }
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        matches!(self.meta.color, Color::Black)
    }
    #[inline(always)]
    pub const fn is_red(&self) -> bool {
        matches!(self.meta.color, Color::Red)
    }
}
