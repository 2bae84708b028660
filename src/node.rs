use crate::point::Point;

/// A tree node owning one point and up to two child subtrees.
///
/// Comparisons made at a node of depth `d` use the axis `d % k`. Points whose
/// coordinate on that axis is strictly less than the node's go left, all others
/// go right.
#[derive(Debug)]
pub struct Node {
    pos: Point,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    /// Creates a leaf.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            left: None,
            right: None,
        }
    }

    pub(crate) fn with_children(
        pos: Point,
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
    ) -> Self {
        Self { pos, left, right }
    }

    #[inline]
    pub fn pos(&self) -> &Point {
        &self.pos
    }

    #[inline]
    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes on the longest path from this node down to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            height = height.max(level);
            stack.extend(node.left().map(|child| (child, level + 1)));
            stack.extend(node.right().map(|child| (child, level + 1)));
        }
        height
    }

    /// Number of nodes in this subtree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order iterator over the nodes of this subtree.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Attaches `point` as a new leaf below this node, which sits at `depth`.
    ///
    /// No rebalancing happens: the shape depends entirely on insertion order.
    pub fn insert(&mut self, point: Point, depth: usize) {
        let k = point.k();
        let mut depth = depth;
        let mut slot = self.child_slot(&point, depth % k);
        while let Some(node) = slot {
            depth += 1;
            slot = node.child_slot(&point, depth % k);
        }
        *slot = Some(Box::new(Node::new(point)));
    }

    fn child_slot(&mut self, point: &Point, axis: usize) -> &mut Option<Box<Node>> {
        if point[axis] < self.pos[axis] {
            &mut self.left
        } else {
            &mut self.right
        }
    }

    /// Walks the comparison path of `point` from this node, which sits at `depth`.
    ///
    /// Returns `true` if a node on that path holds an equal point. The walk does not
    /// backtrack: it is complete for points that were added through [`Node::insert`].
    pub fn search(&self, point: &Point, depth: usize) -> bool {
        let k = self.pos.k();
        let mut depth = depth;
        let mut current = Some(self);
        while let Some(node) = current {
            if node.pos.equals(point) {
                return true;
            }
            let axis = depth % k;
            current = if point[axis] < node.pos[axis] {
                node.left()
            } else {
                node.right()
            };
            depth += 1;
        }
        false
    }
}

// Sorted input grows chains as deep as the point count, so cloning and
// dropping walk explicit stacks instead of recursing.

impl Clone for Node {
    fn clone(&self) -> Self {
        // Pre-order with the right subtree first, reversed below into children-before-parent.
        let mut order = Vec::new();
        let mut pending: Vec<&Node> =
            self.left().into_iter().chain(self.right()).collect();
        while let Some(node) = pending.pop() {
            order.push(node);
            pending.extend(node.left());
            pending.extend(node.right());
        }

        let mut built: Vec<Box<Node>> = Vec::with_capacity(order.len());
        for node in order.into_iter().rev() {
            let right = node.right.as_ref().and_then(|_| built.pop());
            let left = node.left.as_ref().and_then(|_| built.pop());
            built.push(Box::new(Node::with_children(node.pos.clone(), left, right)));
        }

        let right = self.right.as_ref().and_then(|_| built.pop());
        let left = self.left.as_ref().and_then(|_| built.pop());
        Node::with_children(self.pos.clone(), left, right)
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> =
            self.left.take().into_iter().chain(self.right.take()).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// Pre-order iterator returned by [`Node::iter`].
#[derive(Debug, Default)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        if let Some(left) = node.left() {
            self.stack.push(left);
        }
        Some(node)
    }
}
