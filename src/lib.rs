//! Step-by-step simulators for AVL, red-black and B-trees.
//!
//! Every structural change made while inserting or deleting is recorded in a
//! [`Trace`](trace::Trace) as an independent snapshot of the tree together with
//! the [`Action`](trace::Action) that produced it.

mod arena;
pub mod btree;
pub mod sequencer;
pub mod trace;
pub mod tree;

use thiserror::Error;

use crate::trace::Trace;

pub type Value = i64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("value {0} is not in the tree")]
    ValueNotFound(Value),
    #[error("b-tree degree has to be at least 2, got {0}")]
    InvalidDegree(usize),
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The operations a [`Sequencer`](sequencer::Sequencer) drives.
pub trait SearchTree: Clone {
    fn insert(&mut self, value: Value, trace: &mut Trace<Self>);
    /// Fails with [`Error::ValueNotFound`] before touching the tree if `value` is absent.
    fn delete(&mut self, value: Value, trace: &mut Trace<Self>) -> Result<()>;
    fn contains(&self, value: Value) -> bool;
    fn len(&self) -> usize;
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Checks every structural and balance invariant of the tree kind.
    fn validate(&self) -> Result<()>;
}

pub mod prelude {
    pub use crate::{
        Error, SearchTree, Value,
        btree::BTree,
        sequencer::{AnyTree, Config, Kind, Operation, Sequencer, Solution, solve},
        trace::{Action, Step, Trace},
        tree::{AvlTree, BstTree, Color, RbTree, Shade, Side, Tree}
    };
}

#[cfg(test)]
mod test;
