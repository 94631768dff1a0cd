use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result, SearchTree, Value,
    btree::BTree,
    trace::Trace,
    tree::{AvlTree, BstTree, RbTree}
};

/// One instruction of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    pub value: Value,
    pub insert: bool,
}
impl Operation {
    #[inline]
    pub const fn insert(value: Value) -> Self {
        Self { value, insert: true }
    }
    #[inline]
    pub const fn delete(value: Value) -> Self {
        Self { value, insert: false }
    }
}
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.insert { '+' } else { '-' }, self.value)
    }
}
/// `+5` and `5` insert, `-5` deletes.
impl FromStr for Operation {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (insert, number) = match s.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, s.strip_prefix('+').unwrap_or(s))
        };
        let value = number.parse()
            .map_err( |_| Error::InvalidOperation(format!("`{s}` is not an operation")) )?;
        Ok(Self { value, insert })
    }
}

/// Tree kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind {
    Bst,
    Avl,
    RedBlack,
    BTree { degree: usize },
}
impl Kind {
    /// Empty tree of this kind.
    #[inline]
    pub fn build(self) -> Result<AnyTree> {
        Ok(match self {
            Self::Bst => AnyTree::Bst(BstTree::new()),
            Self::Avl => AnyTree::Avl(AvlTree::new()),
            Self::RedBlack => AnyTree::RedBlack(RbTree::new()),
            Self::BTree { degree } => AnyTree::BTree(BTree::new(degree)?)
        })
    }
}
impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bst => f.write_str("bst"),
            Self::Avl => f.write_str("avl"),
            Self::RedBlack => f.write_str("rb"),
            Self::BTree { degree } => write!(f, "btree:{degree}")
        }
    }
}
/// `bst`, `avl`, `rb` (or `red-black`) and `btree:<degree>`.
impl FromStr for Kind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "bst" => Ok(Self::Bst),
            "avl" => Ok(Self::Avl),
            "rb" | "red-black" | "redblack" => Ok(Self::RedBlack),
            other => {
                let degree = other.strip_prefix("btree:")
                    .and_then( |degree| degree.parse().ok() )
                    .ok_or_else( || Error::InvalidOperation(format!("`{s}` is not a tree kind")) )?;
                Ok(Self::BTree { degree })
            }
        }
    }
}

/// A tree of any kind, so a caller can pick the kind at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyTree {
    Bst(BstTree),
    Avl(AvlTree),
    RedBlack(RbTree),
    BTree(BTree),
}
impl AnyTree {
    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Bst(_) => Kind::Bst,
            Self::Avl(_) => Kind::Avl,
            Self::RedBlack(_) => Kind::RedBlack,
            Self::BTree(tree) => Kind::BTree { degree: tree.degree() }
        }
    }
    #[inline]
    pub fn values(&self) -> Vec<Value> {
        match self {
            Self::Bst(tree) => tree.values().collect(),
            Self::Avl(tree) => tree.values().collect(),
            Self::RedBlack(tree) => tree.values().collect(),
            Self::BTree(tree) => tree.values()
        }
    }
}

macro_rules! dispatch {
    ( $self:expr, $tree:ident => $body:expr ) => {
        match $self {
            AnyTree::Bst($tree) => $body,
            AnyTree::Avl($tree) => $body,
            AnyTree::RedBlack($tree) => $body,
            AnyTree::BTree($tree) => $body
        }
    };
    ( $self:expr, $trace:expr, $tree:ident, $inner:ident => $body:expr ) => {
        match $self {
            AnyTree::Bst($tree) => {
                let mut $inner = $trace.fork();
                let result = $body;
                $trace.absorb($inner, AnyTree::Bst);
                result
            },
            AnyTree::Avl($tree) => {
                let mut $inner = $trace.fork();
                let result = $body;
                $trace.absorb($inner, AnyTree::Avl);
                result
            },
            AnyTree::RedBlack($tree) => {
                let mut $inner = $trace.fork();
                let result = $body;
                $trace.absorb($inner, AnyTree::RedBlack);
                result
            },
            AnyTree::BTree($tree) => {
                let mut $inner = $trace.fork();
                let result = $body;
                $trace.absorb($inner, AnyTree::BTree);
                result
            }
        }
    };
}

impl SearchTree for AnyTree {
    #[inline]
    fn insert(&mut self, value: Value, trace: &mut Trace<Self>) {
        dispatch!(self, trace, tree, inner => tree.insert(value, &mut inner))
    }
    #[inline]
    fn delete(&mut self, value: Value, trace: &mut Trace<Self>) -> Result<()> {
        dispatch!(self, trace, tree, inner => tree.delete(value, &mut inner))
    }
    #[inline]
    fn contains(&self, value: Value) -> bool {
        dispatch!(self, tree => tree.contains(value))
    }
    #[inline]
    fn len(&self) -> usize {
        dispatch!(self, tree => tree.len())
    }
    #[inline]
    fn validate(&self) -> Result<()> {
        dispatch!(self, tree => tree.validate())
    }
}

/// Final tree and the trace that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<T> {
    pub tree: T,
    pub trace: Trace<T>,
}

/// Applies operations to one tree in order, collecting a single trace.
#[derive(Debug, Clone)]
pub struct Sequencer<T: SearchTree> {
    tree: T,
    trace: Trace<T>,
}
impl<T: SearchTree> Sequencer<T> {
    #[inline]
    pub fn new(tree: T) -> Self {
        Self { tree, trace: Trace::new() }
    }
    #[inline(always)]
    pub fn tree(&self) -> &T {
        &self.tree
    }
    #[inline(always)]
    pub fn trace(&self) -> &Trace<T> {
        &self.trace
    }
    /// Builds the starting tree without recording anything.
    pub fn construct(&mut self, operations: &[Operation]) -> Result<()> {
        let mut silent = Trace::silent();
        for (i, op) in operations.iter().enumerate() {
            tracing::debug!(index = i, %op, "constructing");
            Self::dispatch(&mut self.tree, *op, &mut silent)?;
        }
        Ok(())
    }
    /// Applies one operation and appends its steps.
    ///
    /// A failed operation leaves the tree and the trace untouched.
    pub fn apply(&mut self, op: Operation) -> Result<()> {
        tracing::debug!(%op, "applying");
        let mut steps = Trace::new();
        Self::dispatch(&mut self.tree, op, &mut steps)?;
        tracing::debug!(%op, steps = steps.len(), "applied");
        self.trace.append(&mut steps);
        Ok(())
    }
    /// Applies operations in order and stops at the first failure.
    pub fn run(&mut self, operations: &[Operation]) -> Result<()> {
        for (i, op) in operations.iter().enumerate() {
            if let Err(error) = self.apply(*op) {
                tracing::debug!(index = i, %op, %error, "aborting batch");
                return Err(error);
            }
        }
        Ok(())
    }
    #[inline]
    pub fn finish(self) -> Solution<T> {
        Solution { tree: self.tree, trace: self.trace }
    }
    #[inline]
    fn dispatch(tree: &mut T, op: Operation, trace: &mut Trace<T>) -> Result<()> {
        if op.insert {
            tree.insert(op.value, trace);
            Ok(())
        } else {
            tree.delete(op.value, trace)
        }
    }
}

/// Everything needed to produce one traced exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub kind: Kind,
    /// Applied silently to build the starting tree.
    #[cfg_attr(feature = "serde", serde(default))]
    pub construction: Vec<Operation>,
    /// Applied with every step recorded.
    pub tasks: Vec<Operation>,
}
impl Config {
    #[inline]
    pub fn new(kind: Kind) -> Self {
        Self { kind, construction: Vec::new(), tasks: Vec::new() }
    }
    #[inline]
    pub fn construction(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.construction.extend(operations);
        self
    }
    #[inline]
    pub fn tasks(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.tasks.extend(operations);
        self
    }
}

/// Builds the tree of `config`, runs its tasks and returns the traced result.
pub fn solve(config: &Config) -> Result<Solution<AnyTree>> {
    let span = tracing::debug_span!("solve", kind = %config.kind);
    let _enter = span.enter();
    let mut sequencer = Sequencer::new(config.kind.build()?);
    sequencer.construct(&config.construction)?;
    sequencer.run(&config.tasks)?;
    Ok(sequencer.finish())
}
