use std::fmt;
use std::iter::FusedIterator;

use crate::node::{LEFT, NodeId, RIGHT};
use crate::tree::RbTree;

/// In-order iterator over the keys of an [`RbTree`].
///
/// Walks parent links, so it needs no stack of its own.
pub struct Iter<'a, K> {
    tree: &'a RbTree<K>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = self.tree.step(cur, RIGHT);
        }
        Some(self.tree.key_of(cur))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = self.tree.step(cur, LEFT);
        }
        Some(self.tree.key_of(cur))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> RbTree<K> {
    /// Keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        let (front, back) = if self.root.is_nil() {
            (NodeId::NIL, NodeId::NIL)
        } else {
            (self.extreme(self.root, LEFT), self.extreme(self.root, RIGHT))
        };
        Iter {
            tree: self,
            front,
            back,
            remaining: self.len,
        }
    }
}

impl<'a, K> IntoIterator for &'a RbTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord> Extend<K> for RbTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for RbTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: fmt::Debug> fmt::Debug for RbTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
