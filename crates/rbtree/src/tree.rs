use std::cmp::Ordering;

use log::trace;

use crate::node::{Color, LEFT, Node, NodeId, RIGHT};

/// Red-black tree over ordered keys.
///
/// Nodes live in an arena owned by the tree and link to each other through
/// [`NodeId`] handles, parent links included. Every absent child is
/// [`NodeId::NIL`], which reads as a black leaf.
///
/// - Keys are unique. Adding a key that is already present is a no-op.
/// - Removing an absent key is a no-op.
/// - The arena holds at most `u32::MAX` slots, since that index is
///   reserved for the sentinel. Growing past it panics.
#[derive(Clone)]
pub struct RbTree<K> {
    pub(crate) nodes: Vec<Node<K>>,
    pub(crate) free: Vec<NodeId>,
    pub(crate) root: NodeId,
    pub(crate) len: usize,
}

impl<K> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RbTree<K> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId::NIL,
            len: 0,
        }
    }

    /// Creates an empty tree whose arena can hold `capacity` keys before
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: NodeId::NIL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = NodeId::NIL;
        self.len = 0;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Key stored at `id`, or `None` for the sentinel and vacated slots.
    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.slot(id).and_then(|n| n.key.as_ref())
    }

    /// Color of `id`. The sentinel is always black.
    pub fn color(&self, id: NodeId) -> Color {
        self.slot(id).map_or(Color::Black, |n| n.color)
    }

    pub fn left(&self, id: NodeId) -> NodeId {
        self.slot(id).map_or(NodeId::NIL, |n| n.ch[LEFT])
    }

    pub fn right(&self, id: NodeId) -> NodeId {
        self.slot(id).map_or(NodeId::NIL, |n| n.ch[RIGHT])
    }

    pub fn parent(&self, id: NodeId) -> NodeId {
        self.slot(id).map_or(NodeId::NIL, |n| n.p)
    }

    pub fn first(&self) -> Option<&K> {
        if self.root.is_nil() {
            return None;
        }
        Some(self.key_of(self.extreme(self.root, LEFT)))
    }

    pub fn last(&self) -> Option<&K> {
        if self.root.is_nil() {
            return None;
        }
        Some(self.key_of(self.extreme(self.root, RIGHT)))
    }

    fn slot(&self, id: NodeId) -> Option<&Node<K>> {
        if id.is_nil() {
            None
        } else {
            self.nodes.get(id.idx())
        }
    }

    #[inline(always)]
    pub(crate) fn node(&self, x: NodeId) -> &Node<K> {
        debug_assert!(!x.is_nil());
        &self.nodes[x.idx()]
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, x: NodeId) -> &mut Node<K> {
        debug_assert!(!x.is_nil());
        &mut self.nodes[x.idx()]
    }

    #[inline(always)]
    pub(crate) fn key_of(&self, x: NodeId) -> &K {
        self.node(x).key.as_ref().expect("live node holds a key")
    }

    #[inline(always)]
    pub(crate) fn set_color(&mut self, x: NodeId, color: Color) {
        self.node_mut(x).color = color;
    }

    #[inline(always)]
    pub(crate) fn is_red(&self, x: NodeId) -> bool {
        !x.is_nil() && self.node(x).color == Color::Red
    }

    /// Which child slot of its parent `x` occupies. `x` must not be the root.
    #[inline(always)]
    pub(crate) fn side_of(&self, x: NodeId) -> usize {
        let p = self.node(x).p;
        usize::from(self.node(p).ch[RIGHT] == x)
    }

    /// Walks from `x` as far as possible toward `dir`.
    pub(crate) fn extreme(&self, mut x: NodeId, dir: usize) -> NodeId {
        loop {
            let next = self.node(x).ch[dir];
            if next.is_nil() {
                return x;
            }
            x = next;
        }
    }

    /// In-order neighbour of `x` toward `dir`: the successor for `RIGHT`,
    /// the predecessor for `LEFT`.
    pub(crate) fn step(&self, x: NodeId, dir: usize) -> NodeId {
        let next = self.node(x).ch[dir];
        if !next.is_nil() {
            return self.extreme(next, dir ^ 1);
        }
        let mut x = x;
        let mut p = self.node(x).p;
        while !p.is_nil() && self.node(p).ch[dir] == x {
            x = p;
            p = self.node(p).p;
        }
        p
    }

    /// Replaces `old` with `new` in `old`'s parent slot, or at the root.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            self.root = new;
        } else if self.node(parent).ch[LEFT] == old {
            self.node_mut(parent).ch[LEFT] = new;
        } else {
            debug_assert_eq!(self.node(parent).ch[RIGHT], old);
            self.node_mut(parent).ch[RIGHT] = new;
        }
    }

    /// Rotates `x` down toward `dir`; its child on the opposite side takes
    /// its place. `rotate(x, LEFT)` is a left rotation. Colors are untouched.
    pub(crate) fn rotate(&mut self, x: NodeId, dir: usize) {
        let y = self.node(x).ch[dir ^ 1];
        debug_assert!(!y.is_nil(), "rotation pivot needs a child to lift");
        trace!("rotate {} at {x:?}", if dir == LEFT { "left" } else { "right" });

        let b = self.node(y).ch[dir];
        self.node_mut(x).ch[dir ^ 1] = b;
        if !b.is_nil() {
            self.node_mut(b).p = x;
        }

        let p = self.node(x).p;
        self.node_mut(y).p = p;
        self.replace_child(p, x, y);

        self.node_mut(y).ch[dir] = x;
        self.node_mut(x).p = y;
    }

    pub(crate) fn alloc(&mut self, key: K) -> NodeId {
        let node = Node::new(key);
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.idx()] = node;
                id
            }
            None => {
                let id = NodeId::from_idx(self.nodes.len());
                self.nodes.push(node);
                id
            }
        }
    }

    /// Returns the slot of an unlinked node to the free list and hands back
    /// its key.
    pub(crate) fn release(&mut self, x: NodeId) -> K {
        let node = self.node_mut(x);
        node.ch = [NodeId::NIL, NodeId::NIL];
        node.p = NodeId::NIL;
        node.color = Color::Black;
        let key = node.key.take().expect("released node holds a key");
        self.free.push(x);
        key
    }
}

impl<K: Ord> RbTree<K> {
    /// Node holding `key`, or `NIL` when absent.
    pub(crate) fn locate(&self, key: &K) -> NodeId {
        let mut cur = self.root;
        while !cur.is_nil() {
            match key.cmp(self.key_of(cur)) {
                Ordering::Less => cur = self.node(cur).ch[LEFT],
                Ordering::Greater => cur = self.node(cur).ch[RIGHT],
                Ordering::Equal => return cur,
            }
        }
        NodeId::NIL
    }

    pub fn contains(&self, key: &K) -> bool {
        !self.locate(key).is_nil()
    }

    /// Stored key equal to `key`.
    pub fn find(&self, key: &K) -> Option<&K> {
        let id = self.locate(key);
        if id.is_nil() {
            None
        } else {
            Some(self.key_of(id))
        }
    }
}
