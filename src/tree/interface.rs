use crate::{
    Error, Result, SearchTree, Value,
    trace::{Action, Trace},
    tree::{Balance, Node, NodeIndex, NodeRef, SearchResult, Side, Tree}
};

impl<B: Balance> Tree<B> {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bounds.root.is_none()
    }
    #[inline(always)]
    pub fn root(&self) -> NodeRef {
        self.bounds.root
    }
    #[inline]
    pub fn get(&self, ptr: NodeIndex) -> Option<&Node<B::Meta>> {
        self.nodes.get(ptr)
    }
    #[inline]
    pub fn search(&self, value: Value) -> NodeRef {
        match self.search_value(value) {
            SearchResult::Here(ptr) => Some(ptr),
            _ => None
        }
    }
    #[inline]
    pub fn contains(&self, value: Value) -> bool {
        matches!(self.search_value(value), SearchResult::Here(_))
    }
    /// Leftmost descendant of `ptr`.
    #[inline]
    pub fn minimum(&self, mut ptr: NodeIndex) -> NodeIndex {
        while let Some(left) = self[ptr].children[0] {
            ptr = left;
        }
        ptr
    }
    /// Rightmost descendant of `ptr`.
    #[inline]
    pub fn maximum(&self, mut ptr: NodeIndex) -> NodeIndex {
        while let Some(right) = self[ptr].children[1] {
            ptr = right;
        }
        ptr
    }
    /// In-order successor, found through the parent links.
    #[inline]
    pub fn successor(&self, mut ptr: NodeIndex) -> NodeRef {
        if let Some(right) = self[ptr].children[1] {
            return Some(self.minimum(right));
        }
        while let Some(parent) = self[ptr].parent {
            if self.side_of(parent, ptr) == Side::Left {
                return Some(parent);
            }
            ptr = parent;
        }
        None
    }
    /// Height computed from the structure, `-1` for an absent node.
    pub fn height(&self, ptr: NodeRef) -> i32 {
        let Some(ptr) = ptr else { return -1 };
        let node = &self[ptr];
        1 + self.height(node.children[0]).max(self.height(node.children[1]))
    }
    /// `height(left) - height(right)`.
    #[inline]
    pub fn balance_factor(&self, ptr: NodeIndex) -> i32 {
        let node = &self[ptr];
        self.height(node.children[0]) - self.height(node.children[1])
    }
    /// Attaches `value` as a new leaf and repairs the tree.
    ///
    /// Duplicates descend to the right.
    pub fn insert(&mut self, value: Value, trace: &mut Trace<Self>) {
        let ptr = match self.search_slot(value) {
            SearchResult::Empty => {
                let ptr = self.nodes.insert(Node::new(value, B::root_meta()));
                self.bounds.root = Some(ptr);
                trace.record(self, Action::Insert(value));
                return;
            },
            SearchResult::LeftOf(parent) => self.attach(value, parent, Side::Left),
            SearchResult::RightOf(parent) | SearchResult::Here(parent) => self.attach(value, parent, Side::Right)
        };
        trace.record(self, Action::Insert(value));
        B::repair_insert(self, ptr, trace);
    }
    /// Removes one node holding `value` and repairs the tree.
    ///
    /// A node with two children takes over the value of its in-order successor,
    /// which is then spliced out in its place.
    pub fn delete(&mut self, value: Value, trace: &mut Trace<Self>) -> Result<()> {
        let mut ptr = self.search(value).ok_or(Error::ValueNotFound(value))?;
        if let [Some(_), Some(right)] = self[ptr].children {
            let successor = self.minimum(right);
            self[ptr].value = self[successor].value;
            ptr = successor;
        }
        let splice = self.splice(ptr);
        trace.record(self, Action::Delete(value));
        B::repair_remove(self, splice, trace);
        Ok(())
    }
}

impl<B: Balance> SearchTree for Tree<B> {
    #[inline]
    fn insert(&mut self, value: Value, trace: &mut Trace<Self>) {
        Tree::insert(self, value, trace)
    }
    #[inline]
    fn delete(&mut self, value: Value, trace: &mut Trace<Self>) -> Result<()> {
        Tree::delete(self, value, trace)
    }
    #[inline]
    fn contains(&self, value: Value) -> bool {
        Tree::contains(self, value)
    }
    #[inline]
    fn len(&self) -> usize {
        Tree::len(self)
    }
    #[inline]
    fn validate(&self) -> Result<()> {
        Tree::validate(self)
    }
}

impl<B: Balance> FromIterator<Value> for Tree<B> {
    /// Builds a tree by inserting every value without recording steps.
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut tree = Self::new();
        let mut trace = Trace::silent();
        for value in iter {
            tree.insert(value, &mut trace);
        }
        tree
    }
}
