use std::collections::HashSet;

use crate::{
    Error, Result, Value,
    tree::{Balance, NodeIndex, Tree}
};

#[inline]
fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}

impl<B: Balance> Tree<B> {
    /// Parent links agree with child links and every node is owned exactly once.
    pub fn is_well_formed(&self) -> Result<()> {
        let Some(root) = self.bounds.root else {
            return match self.len() {
                0 => Ok(()),
                len => Err(violation(format!("empty tree still holds {len} nodes")))
            };
        };
        if !self.nodes.contains(root) {
            return Err(violation(format!("dangling root {root:?}")));
        }
        if let Some(parent) = self[root].parent {
            return Err(violation(format!("root {} has parent {:?}", self[root].value, parent)));
        }
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(ptr) = stack.pop() {
            if !self.nodes.contains(ptr) {
                return Err(violation(format!("dangling link to {ptr:?}")));
            }
            if !seen.insert(ptr) {
                return Err(violation(format!("node {} is reachable twice", self[ptr].value)));
            }
            for child in self[ptr].children.into_iter().flatten() {
                if !self.nodes.contains(child) {
                    return Err(violation(format!("dangling link to {child:?}")));
                }
                if self[child].parent != Some(ptr) {
                    return Err(violation(format!(
                        "child {} of {} points to a different parent", self[child].value, self[ptr].value
                    )));
                }
                stack.push(child);
            }
        }
        if seen.len() != self.len() {
            return Err(violation(format!(
                "{} nodes reachable from the root but {} allocated", seen.len(), self.len()
            )));
        }
        Ok(())
    }
    /// Left subtrees hold smaller values, right subtrees hold values not smaller.
    pub fn is_ordered(&self) -> Result<()> {
        fn check_node<B: Balance>(tree: &Tree<B>, ptr: NodeIndex, low: Option<Value>, high: Option<Value>) -> Result<()> {
            let node = &tree[ptr];
            if low.is_some_and( |low| node.value < low ) || high.is_some_and( |high| node.value > high ) {
                return Err(violation(format!(
                    "node {} lies outside of {:?}..={:?}", node.value, low, high
                )));
            }
            if let Some(left) = node.children[0] {
                check_node(tree, left, low, Some(node.value))?;
            }
            if let Some(right) = node.children[1] {
                check_node(tree, right, Some(node.value), high)?;
            }
            Ok(())
        }
        match self.bounds.root {
            Some(root) => check_node(self, root, None, None),
            None => Ok(())
        }
    }
    /// The invariant of the balancing strategy.
    #[inline]
    pub fn is_balanced(&self) -> Result<()> {
        B::check(self)
    }
    pub fn validate(&self) -> Result<()> {
        self.is_well_formed()?;
        self.is_ordered()?;
        self.is_balanced()
    }
}
