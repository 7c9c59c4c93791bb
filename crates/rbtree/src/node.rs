use std::fmt;

pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

/// Handle to a node slot in a tree's arena.
///
/// Handles are only meaningful for the tree that produced them. A handle
/// stays valid until the key it addresses is removed.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The sentinel leaf. Stands in for every absent child, is always
    /// black, and addresses no arena slot, so nothing can write to it.
    pub const NIL: Self = Self(u32::MAX);

    #[inline(always)]
    pub fn is_nil(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline(always)]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub(crate) fn from_idx(v: usize) -> Self {
        assert!(v < u32::MAX as usize, "arena index {v} collides with NIL");
        Self(v as u32)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            f.write_str("NIL")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// The shared sentinel leaf.
pub const NIL_LEAF: NodeId = NodeId::NIL;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    /// `None` only while the slot sits on the free list.
    pub(crate) key: Option<K>,
    pub(crate) color: Color,
    pub(crate) ch: [NodeId; 2],
    pub(crate) p: NodeId,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key: Some(key),
            color: Color::Red,
            ch: [NodeId::NIL, NodeId::NIL],
            p: NodeId::NIL,
        }
    }
}
