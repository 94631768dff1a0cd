use std::{fmt, slice};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Value;

/// What happened between the previous snapshot and the one recorded with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    Insert(Value),
    Delete(Value),
    RotateLeft(Value),
    RotateRight(Value),
    /// Red-black recoloring around the named node.
    Recolor(Value),
    /// B-tree split, carries the median that moved up.
    Split(Value),
    /// B-tree merge, carries the separator that moved down.
    Merge(Value),
    /// B-tree borrow, carries the key that moved up out of the sibling.
    Borrow(Value),
}
impl Action {
    #[inline]
    pub const fn value(&self) -> Value {
        match *self {
            Self::Insert(value) | Self::Delete(value)
            | Self::RotateLeft(value) | Self::RotateRight(value)
            | Self::Recolor(value)
            | Self::Split(value) | Self::Merge(value) | Self::Borrow(value) => value
        }
    }
    #[inline]
    pub const fn is_rotation(&self) -> bool {
        matches!(self, Self::RotateLeft(_) | Self::RotateRight(_))
    }
}
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(value) => write!(f, "insert {value}"),
            Self::Delete(value) => write!(f, "delete {value}"),
            Self::RotateLeft(value) => write!(f, "rotate {value} left"),
            Self::RotateRight(value) => write!(f, "rotate {value} right"),
            Self::Recolor(value) => write!(f, "recolor at {value}"),
            Self::Split(value) => write!(f, "split node at {value}"),
            Self::Merge(value) => write!(f, "merge nodes at {value}"),
            Self::Borrow(value) => write!(f, "borrow {value} from sibling"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<T> {
    pub snapshot: T,
    pub action: Action,
}

/// Append-only log of snapshots.
///
/// Every recorded snapshot is an independent copy of the tree, later mutations
/// of the live tree never reach it. A silent trace drops everything it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace<T> {
    steps: Vec<Step<T>>,
    silent: bool,
}
impl<T> Trace<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { steps: Vec::new(), silent: false }
    }
    #[inline]
    pub const fn silent() -> Self {
        Self { steps: Vec::new(), silent: true }
    }
    #[inline(always)]
    pub const fn is_silent(&self) -> bool {
        self.silent
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    #[inline]
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Step<T>> {
        self.steps.iter()
    }
    #[inline]
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.steps.iter().map( |step| step.action )
    }
    #[inline]
    pub fn last(&self) -> Option<&Step<T>> {
        self.steps.last()
    }
    #[inline]
    pub fn into_steps(self) -> Vec<Step<T>> {
        self.steps
    }
    #[inline]
    pub fn record(&mut self, tree: &T, action: Action)
        where T: Clone
    {
        tracing::trace!(step = self.steps.len(), silent = self.silent, "{action}");
        if self.silent {
            return;
        }
        self.steps.push(Step { snapshot: tree.clone(), action });
    }
    /// Empty trace with the same recording mode, for a different snapshot type.
    #[inline]
    pub fn fork<U>(&self) -> Trace<U> {
        Trace { steps: Vec::new(), silent: self.silent }
    }
    /// Appends the steps of a forked trace, converting their snapshots.
    #[inline]
    pub fn absorb<U>(&mut self, other: Trace<U>, mut convert: impl FnMut(U) -> T) {
        self.steps.extend(other.steps.into_iter().map( |step| Step {
            snapshot: convert(step.snapshot),
            action: step.action
        }));
    }
    #[inline]
    pub fn append(&mut self, other: &mut Trace<T>) {
        self.steps.append(&mut other.steps);
    }
}
impl<T> Default for Trace<T> {
    #[inline(always)]
    fn default() -> Self { Self::new() }
}
impl<'a, T> IntoIterator for &'a Trace<T> {
    type Item = &'a Step<T>;
    type IntoIter = slice::Iter<'a, Step<T>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
impl<T> IntoIterator for Trace<T> {
    type Item = Step<T>;
    type IntoIter = std::vec::IntoIter<Step<T>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
