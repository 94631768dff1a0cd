use crate::Value;

/// B-tree node owning its keys and, unless it is a leaf, `keys + 1` children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub(crate) keys: Vec<Value>,
    pub(crate) children: Vec<Node>,
}

impl Node {
    #[inline(always)]
    pub fn keys(&self) -> &[Value] {
        &self.keys
    }
    #[inline(always)]
    pub fn children(&self) -> &[Node] {
        &self.children
    }
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
    /// Index of the first key not smaller than `value`.
    #[inline]
    pub(crate) fn lower_bound(&self, value: Value) -> usize {
        self.keys.partition_point( |key| *key < value )
    }
    /// Index of the first key greater than `value`.
    #[inline]
    pub(crate) fn upper_bound(&self, value: Value) -> usize {
        self.keys.partition_point( |key| *key <= value )
    }
    pub(crate) fn contains(&self, value: Value) -> bool {
        let mut node = self;
        loop {
            let i = node.lower_bound(value);
            if node.keys.get(i) == Some(&value) {
                return true;
            }
            match node.children.get(i) {
                Some(child) => node = child,
                None => return false
            }
        }
    }
    /// Splits the full child `i` around its median, which moves up into `self`.
    ///
    /// Returns the median.
    pub(crate) fn split_child(&mut self, i: usize, degree: usize) -> Value {
        let child = &mut self.children[i];
        debug_assert_eq!(child.keys.len(), 2 * degree - 1, "only full nodes are split");
        let keys = child.keys.split_off(degree);
        let children = if child.is_leaf() { Vec::new() } else { child.children.split_off(degree) };
        // the left half keeps degree - 1 keys
        let Some(median) = child.keys.pop() else { unreachable!("a full node holds at least three keys") };
        self.keys.insert(i, median);
        self.children.insert(i + 1, Node { keys, children });
        median
    }
    /// Merges child `i + 1` and the separator between them into child `i`.
    ///
    /// Returns the separator.
    pub(crate) fn merge_children(&mut self, i: usize) -> Value {
        let right = self.children.remove(i + 1);
        let separator = self.keys.remove(i);
        let left = &mut self.children[i];
        left.keys.push(separator);
        left.keys.extend(right.keys);
        left.children.extend(right.children);
        separator
    }
    /// Moves the last key of child `i - 1` up and the separator down into child `i`.
    ///
    /// Returns the key that moved up.
    pub(crate) fn borrow_from_left(&mut self, i: usize) -> Value {
        let (head, tail) = self.children.split_at_mut(i);
        let (left, child) = (&mut head[i - 1], &mut tail[0]);
        let Some(key) = left.keys.pop() else { unreachable!("a lending sibling has spare keys") };
        let separator = std::mem::replace(&mut self.keys[i - 1], key);
        child.keys.insert(0, separator);
        if let Some(grandchild) = left.children.pop() {
            child.children.insert(0, grandchild);
        }
        key
    }
    /// Moves the first key of child `i + 1` up and the separator down into child `i`.
    ///
    /// Returns the key that moved up.
    pub(crate) fn borrow_from_right(&mut self, i: usize) -> Value {
        let (head, tail) = self.children.split_at_mut(i + 1);
        let (child, right) = (&mut head[i], &mut tail[0]);
        let key = right.keys.remove(0);
        let separator = std::mem::replace(&mut self.keys[i], key);
        child.keys.push(separator);
        if !right.is_leaf() {
            child.children.push(right.children.remove(0));
        }
        key
    }
    /// Appends the keys of this subtree in order.
    pub(crate) fn collect_into(&self, values: &mut Vec<Value>) {
        if self.is_leaf() {
            values.extend_from_slice(&self.keys);
            return;
        }
        for (child, key) in self.children.iter().zip(&self.keys) {
            child.collect_into(values);
            values.push(*key);
        }
        if let Some(last) = self.children.last() {
            last.collect_into(values);
        }
    }
}
