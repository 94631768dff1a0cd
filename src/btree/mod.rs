mod node;
pub use node::*;

use crate::{
    Error, Result, SearchTree, Value,
    trace::{Action, Trace}
};

/// B-tree of minimum degree `t`.
///
/// Every node but the root holds between `t - 1` and `2t - 1` keys. Both
/// insertion and deletion repair on the way down, so a single pass from the
/// root suffices and every recorded snapshot is a valid B-tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BTree {
    root: Node,
    degree: usize,
    len: usize,
}

/// What a deletion is looking for while it descends.
#[derive(Debug, Clone, Copy)]
enum Target {
    Key(Value),
    /// Largest key of the subtree, the in-order predecessor.
    Max,
    /// Smallest key of the subtree, the in-order successor.
    Min,
}

#[derive(Debug)]
enum Locate {
    Here(usize),
    Child(usize),
}

impl BTree {
    #[inline]
    pub fn new(degree: usize) -> Result<Self> {
        if degree < 2 || degree.checked_mul(2).is_none() {
            return Err(Error::InvalidDegree(degree));
        }
        Ok(Self { root: Node::default(), degree, len: 0 })
    }
    #[inline(always)]
    pub fn degree(&self) -> usize {
        self.degree
    }
    #[inline(always)]
    pub fn max_keys(&self) -> usize {
        2 * self.degree - 1
    }
    #[inline(always)]
    pub fn min_keys(&self) -> usize {
        self.degree - 1
    }
    #[inline(always)]
    pub fn root(&self) -> &Node {
        &self.root
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    #[inline]
    pub fn contains(&self, value: Value) -> bool {
        self.root.contains(value)
    }
    /// Number of levels below the root, `0` for a lone root.
    #[inline]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = &self.root;
        while let Some(child) = node.children.first() {
            height += 1;
            node = child;
        }
        height
    }
    #[inline]
    pub fn values(&self) -> Vec<Value> {
        let mut values = Vec::with_capacity(self.len);
        self.root.collect_into(&mut values);
        values
    }
    #[inline]
    fn node_mut(&mut self, path: &[usize]) -> &mut Node {
        path.iter().fold(&mut self.root, |node, &i| &mut node.children[i] )
    }
    /// Replaces a root left without keys by its only child.
    #[inline]
    fn collapse_root(&mut self) -> bool {
        if !self.root.keys.is_empty() || self.root.is_leaf() {
            return false;
        }
        let child = self.root.children.remove(0);
        self.root = child;
        tracing::trace!("root emptied by a merge, tree shrinks to height {}", self.height());
        true
    }
    /// Inserts `value` into a leaf, splitting every full node met on the way down.
    ///
    /// Duplicates descend to the right of equal keys.
    pub fn insert(&mut self, value: Value, trace: &mut Trace<Self>) {
        let (degree, max) = (self.degree, self.max_keys());
        if self.root.keys.len() == max {
            let old = std::mem::take(&mut self.root);
            self.root.children.push(old);
            let median = self.root.split_child(0, degree);
            tracing::trace!("root overflowed, split at {median}");
            trace.record(self, Action::Split(median));
        }
        let mut path = Vec::new();
        loop {
            let node = self.node_mut(&path);
            let mut i = node.upper_bound(value);
            if node.is_leaf() {
                node.keys.insert(i, value);
                break;
            }
            if node.children[i].keys.len() == max {
                let median = node.split_child(i, degree);
                if value >= median {
                    i += 1;
                }
                tracing::trace!("child at depth {} full, split at {median}", path.len() + 1);
                trace.record(self, Action::Split(median));
            }
            path.push(i);
        }
        self.len += 1;
        trace.record(self, Action::Insert(value));
    }
    /// Removes one occurrence of `value`, making sure every node entered on the
    /// way down can lose a key.
    pub fn delete(&mut self, value: Value, trace: &mut Trace<Self>) -> Result<()> {
        if !self.contains(value) {
            return Err(Error::ValueNotFound(value));
        }
        let min = self.min_keys();
        let mut path = Vec::new();
        let mut target = Target::Key(value);
        // an internal slot still showing `value` until its replacement leaves its leaf
        let mut slot: Option<(Vec<usize>, usize)> = None;
        loop {
            let node = self.node_mut(&path);
            let locate = match target {
                Target::Key(key) => {
                    let i = node.lower_bound(key);
                    if node.keys.get(i) == Some(&key) { Locate::Here(i) } else { Locate::Child(i) }
                },
                Target::Max => Locate::Child(node.keys.len()),
                Target::Min => Locate::Child(0)
            };
            if node.is_leaf() {
                let removed = match (target, locate) {
                    (Target::Key(_), Locate::Here(i)) => node.keys.remove(i),
                    (Target::Max, _) if !node.keys.is_empty() => node.keys.remove(node.keys.len() - 1),
                    (Target::Min, _) if !node.keys.is_empty() => node.keys.remove(0),
                    _ => return Err(Error::ValueNotFound(value))
                };
                if let Some((path, i)) = slot {
                    self.node_mut(&path).keys[i] = removed;
                }
                break;
            }
            match locate {
                Locate::Here(i) => {
                    if node.children[i].keys.len() > min {
                        slot = Some((path.clone(), i));
                        target = Target::Max;
                        path.push(i);
                    } else if node.children[i + 1].keys.len() > min {
                        slot = Some((path.clone(), i));
                        target = Target::Min;
                        path.push(i + 1);
                    } else {
                        let separator = node.merge_children(i);
                        tracing::trace!("both children around {separator} are minimal, merging");
                        if !(path.is_empty() && self.collapse_root()) {
                            path.push(i);
                        }
                        trace.record(self, Action::Merge(separator));
                    }
                },
                Locate::Child(mut i) => {
                    if node.children[i].keys.len() == min {
                        if i > 0 && node.children[i - 1].keys.len() > min {
                            let key = node.borrow_from_left(i);
                            tracing::trace!("child {i} borrows {key} from its left sibling");
                            trace.record(self, Action::Borrow(key));
                        } else if i < node.keys.len() && node.children[i + 1].keys.len() > min {
                            let key = node.borrow_from_right(i);
                            tracing::trace!("child {i} borrows {key} from its right sibling");
                            trace.record(self, Action::Borrow(key));
                        } else {
                            if i == node.keys.len() {
                                i -= 1;
                            }
                            let separator = node.merge_children(i);
                            tracing::trace!("child {i} and its sibling are minimal, merging at {separator}");
                            if path.is_empty() && self.collapse_root() {
                                trace.record(self, Action::Merge(separator));
                                continue;
                            }
                            trace.record(self, Action::Merge(separator));
                        }
                    }
                    path.push(i);
                }
            }
        }
        self.len -= 1;
        trace.record(self, Action::Delete(value));
        Ok(())
    }
    /// Key counts, ordering, child counts and leaf depth.
    pub fn validate(&self) -> Result<()> {
        struct Checker {
            min: usize,
            max: usize,
            leaf_depth: Option<usize>,
            count: usize,
        }
        impl Checker {
            fn check(&mut self, node: &Node, depth: usize, low: Option<Value>, high: Option<Value>) -> Result<()> {
                let len = node.keys.len();
                if len > self.max {
                    return Err(violation(format!("node {:?} holds more than {} keys", node.keys, self.max)));
                }
                if depth > 0 && len < self.min {
                    return Err(violation(format!("node {:?} holds fewer than {} keys", node.keys, self.min)));
                }
                if node.keys.windows(2).any( |pair| pair[0] > pair[1] ) {
                    return Err(violation(format!("keys {:?} are not ascending", node.keys)));
                }
                if let (Some(first), Some(low)) = (node.keys.first(), low) {
                    if *first < low {
                        return Err(violation(format!("node {:?} lies below separator {low}", node.keys)));
                    }
                }
                if let (Some(last), Some(high)) = (node.keys.last(), high) {
                    if *last > high {
                        return Err(violation(format!("node {:?} lies above separator {high}", node.keys)));
                    }
                }
                self.count += len;
                if node.is_leaf() {
                    return match self.leaf_depth {
                        Some(expected) if expected != depth => Err(violation(format!(
                            "leaf {:?} at depth {depth}, other leaves at {expected}", node.keys
                        ))),
                        _ => {
                            self.leaf_depth = Some(depth);
                            Ok(())
                        }
                    };
                }
                if node.children.len() != len + 1 {
                    return Err(violation(format!(
                        "node {:?} has {} children", node.keys, node.children.len()
                    )));
                }
                for (i, child) in node.children.iter().enumerate() {
                    let low = if i == 0 { low } else { Some(node.keys[i - 1]) };
                    let high = node.keys.get(i).copied().or(high);
                    self.check(child, depth + 1, low, high)?;
                }
                Ok(())
            }
        }
        if !self.root.is_leaf() && self.root.keys.is_empty() {
            return Err(violation("internal root without keys".into()));
        }
        let mut checker = Checker { min: self.min_keys(), max: self.max_keys(), leaf_depth: None, count: 0 };
        checker.check(&self.root, 0, None, None)?;
        if checker.count != self.len {
            return Err(violation(format!("{} keys stored, {} counted", checker.count, self.len)));
        }
        Ok(())
    }
}

#[inline]
fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}

impl SearchTree for BTree {
    #[inline]
    fn insert(&mut self, value: Value, trace: &mut Trace<Self>) {
        BTree::insert(self, value, trace)
    }
    #[inline]
    fn delete(&mut self, value: Value, trace: &mut Trace<Self>) -> Result<()> {
        BTree::delete(self, value, trace)
    }
    #[inline]
    fn contains(&self, value: Value) -> bool {
        BTree::contains(self, value)
    }
    #[inline]
    fn len(&self) -> usize {
        BTree::len(self)
    }
    #[inline]
    fn validate(&self) -> Result<()> {
        BTree::validate(self)
    }
}
