use crate::{
    Error, Result,
    trace::{Action, Trace},
    tree::{Balance, Color, NodeIndex, NodeRef, Paint, Shade, Side, Splice, Tree}
};

/// Red-black tree, nil leaves are the absent children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedBlack;

impl Tree<RedBlack> {
    #[inline(always)]
    fn is_red(&self, ptr: NodeRef) -> bool {
        ptr.is_some_and( |ptr| self[ptr].is_red() )
    }
    #[inline(always)]
    fn paint(&mut self, ptr: NodeIndex, color: Color) {
        self[ptr].meta.color = color;
    }
    #[inline(always)]
    fn shade(&mut self, ptr: NodeRef, shade: Shade) {
        if let Some(ptr) = ptr {
            self[ptr].meta.shade = shade;
        }
    }
    #[inline]
    fn recolored(&mut self, ptr: NodeIndex, trace: &mut Trace<Self>) {
        let value = self[ptr].value;
        tracing::trace!("recoloring around {value}");
        trace.record(self, Action::Recolor(value));
    }
    /// Black nodes from `ptr` down to a nil, excluding `ptr`.
    pub fn black_height(&self, ptr: NodeRef) -> usize {
        let Some(ptr) = ptr else { return 0 };
        let mut height = 0;
        let mut ptr = self[ptr].children[0];
        while let Some(node) = ptr {
            height += self[node].is_black() as usize;
            ptr = self[node].children[0];
        }
        height + 1
    }
}

impl Balance for RedBlack {
    type Meta = Paint;
    #[inline(always)]
    fn root_meta() -> Self::Meta { Paint::new(Color::Black) }
    #[inline(always)]
    fn leaf_meta() -> Self::Meta { Paint::new(Color::Red) }
    fn repair_insert(tree: &mut Tree<Self>, mut ptr: NodeIndex, trace: &mut Trace<Tree<Self>>) {
        loop {
            let Some(mut parent) = tree[ptr].parent else { break };
            if tree[parent].is_black() {
                break;
            }
            // a red parent is never the root
            let Some(grandparent) = tree[parent].parent else { break };
            let side = tree.side_of(grandparent, parent);
            let uncle = tree[grandparent].child(!side);
            if let (Some(uncle), true) = (uncle, tree.is_red(uncle)) {
                // red uncle: push the conflict two levels up, a root stays black
                tree.paint(parent, Color::Black);
                tree.paint(uncle, Color::Black);
                let color = if tree[grandparent].parent.is_some() { Color::Red } else { Color::Black };
                tree.paint(grandparent, color);
                tree.recolored(grandparent, trace);
                ptr = grandparent;
                continue;
            }
            if tree.side_of(parent, ptr) != side {
                // inner grandchild: turn it into an outer one
                tree.rotate(parent, side, trace);
                std::mem::swap(&mut ptr, &mut parent);
            }
            tree.rotate(grandparent, !side, trace);
            tree.paint(parent, Color::Black);
            tree.paint(grandparent, Color::Red);
            tree.recolored(parent, trace);
            return;
        }
    }
    /// Resolves the extra black left behind by splicing out a black node.
    fn repair_remove(tree: &mut Tree<Self>, splice: Splice<Self::Meta>, trace: &mut Trace<Tree<Self>>) {
        if splice.meta.color == Color::Red {
            return;
        }
        let (mut ptr, mut parent, mut side) = (splice.child, splice.parent, splice.side);
        while let Some(above) = parent {
            if tree.is_red(ptr) {
                break;
            }
            tree.shade(ptr, Shade::DoubleBlack);
            // the deficient side is one black short, so the other side holds a node
            let Some(mut sibling) = tree[above].child(!side) else { break };
            if tree[sibling].is_red() {
                tree.rotate(above, side, trace);
                tree.paint(sibling, Color::Black);
                tree.paint(above, Color::Red);
                tree.recolored(sibling, trace);
                let Some(next) = tree[above].child(!side) else { break };
                sibling = next;
            }
            let [near, far] = match side {
                Side::Left => tree[sibling].children,
                Side::Right => { let [left, right] = tree[sibling].children; [right, left] }
            };
            if !tree.is_red(near) && !tree.is_red(far) {
                tree.paint(sibling, Color::Red);
                tree.shade(ptr, Shade::Plain);
                ptr = Some(above);
                parent = tree[above].parent;
                if let Some(parent) = parent {
                    side = tree.side_of(parent, above);
                }
                let shade = match (tree[above].is_red(), parent) {
                    (true, _) => Shade::RedBlack,
                    (false, Some(_)) => Shade::DoubleBlack,
                    (false, None) => Shade::Plain
                };
                tree.shade(ptr, shade);
                tree.recolored(sibling, trace);
                continue;
            }
            if !tree.is_red(far) {
                if let Some(near) = near {
                    tree.rotate(sibling, !side, trace);
                    tree.paint(near, Color::Black);
                    tree.paint(sibling, Color::Red);
                    tree.recolored(near, trace);
                    sibling = near;
                }
            }
            tree.rotate(above, side, trace);
            let color = tree[above].meta.color;
            tree.paint(sibling, color);
            tree.paint(above, Color::Black);
            if let Some(far) = tree[sibling].child(!side) {
                tree.paint(far, Color::Black);
            }
            tree.shade(ptr, Shade::Plain);
            tree.recolored(sibling, trace);
            return;
        }
        let Some(ptr) = ptr else { return };
        let recolor = tree[ptr].is_red();
        tree.paint(ptr, Color::Black);
        tree.shade(Some(ptr), Shade::Plain);
        if recolor {
            tree.recolored(ptr, trace);
        }
    }
    fn check(tree: &Tree<Self>) -> Result<()> {
        fn check_node(tree: &Tree<RedBlack>, ptr: NodeRef) -> Result<usize> {
            let Some(ptr) = ptr else { return Ok(1) };
            let node = &tree[ptr];
            if node.is_red() && (tree.is_red(node.children[0]) || tree.is_red(node.children[1])) {
                return Err(Error::InvariantViolation(format!(
                    "red node {} has a red child", node.value
                )));
            }
            let left = check_node(tree, node.children[0])?;
            let right = check_node(tree, node.children[1])?;
            if left != right {
                return Err(Error::InvariantViolation(format!(
                    "node {} has black-heights {} and {}", node.value, left, right
                )));
            }
            Ok(left + node.is_black() as usize)
        }
        if tree.is_red(tree.root()) {
            return Err(Error::InvariantViolation("root has to be black".into()));
        }
        check_node(tree, tree.root()).map( |_| () )
    }
}
