use log::trace;

use crate::node::{Color, LEFT, NodeId, RIGHT};
use crate::tree::RbTree;

impl<K: Ord> RbTree<K> {
    /// Removes `key` and returns the stored key, or `None` (with the tree
    /// untouched) if it is absent.
    ///
    /// When the node holding `key` has two children, its in-order
    /// successor's key is moved into it and the successor's node is the
    /// one unlinked. The handle of the node that held `key` therefore
    /// stays valid and now addresses the successor key.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let v = self.locate(key);
        if v.is_nil() {
            return None;
        }

        let [l, r] = self.node(v).ch;
        let x = if !l.is_nil() && !r.is_nil() {
            let s = self.extreme(r, LEFT);
            let succ = self.node_mut(s).key.take();
            let removed = std::mem::replace(&mut self.node_mut(v).key, succ);
            self.node_mut(s).key = removed;
            s
        } else {
            v
        };

        Some(self.splice(x))
    }

    /// Unlinks `x`, which has at most one real child, and rebalances.
    fn splice(&mut self, x: NodeId) -> K {
        let [l, r] = self.node(x).ch;
        debug_assert!(l.is_nil() || r.is_nil());
        let child = if l.is_nil() { r } else { l };
        let parent = self.node(x).p;

        if !child.is_nil() {
            self.node_mut(child).p = parent;
        }
        self.replace_child(parent, x, child);

        if self.node(x).color == Color::Black {
            self.remove_fixup(child, parent);
        }

        self.len -= 1;
        self.release(x)
    }

    /// `x` sits one black short of its sibling. `x` may be the sentinel, so
    /// its parent is carried alongside instead of read from it.
    fn remove_fixup(&mut self, mut x: NodeId, mut p: NodeId) {
        while x != self.root && !self.is_red(x) {
            // The sentinel can only fill one side here: the other side is
            // a sibling with positive black height.
            let side = usize::from(self.node(p).ch[LEFT] != x);
            let mut w = self.node(p).ch[side ^ 1];
            debug_assert!(!w.is_nil(), "double-black node must have a sibling");

            if self.is_red(w) {
                trace!("remove fixup at {x:?}: red sibling {w:?}, rotate {p:?}");
                self.set_color(w, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                w = self.node(p).ch[side ^ 1];
            }

            let [near, far] = self.near_far(w, side);
            if !self.is_red(near) && !self.is_red(far) {
                trace!("remove fixup at {x:?}: black nephews, move deficiency up to {p:?}");
                self.set_color(w, Color::Red);
                x = p;
                p = self.node(x).p;
                continue;
            }

            if !self.is_red(far) {
                trace!("remove fixup at {x:?}: red near nephew {near:?}, rotate {w:?}");
                self.set_color(near, Color::Black);
                self.set_color(w, Color::Red);
                self.rotate(w, side ^ 1);
                w = self.node(p).ch[side ^ 1];
            }

            trace!("remove fixup at {x:?}: red far nephew, rotate {p:?}");
            let far = self.node(w).ch[side ^ 1];
            let parent_color = self.node(p).color;
            self.set_color(w, parent_color);
            self.set_color(p, Color::Black);
            self.set_color(far, Color::Black);
            self.rotate(p, side);
            x = self.root;
        }

        if !x.is_nil() {
            self.set_color(x, Color::Black);
        }
    }

    /// Children of `w` as `[near, far]` relative to a sibling on `side`.
    #[inline(always)]
    fn near_far(&self, w: NodeId, side: usize) -> [NodeId; 2] {
        let ch = self.node(w).ch;
        if side == LEFT {
            ch
        } else {
            [ch[RIGHT], ch[LEFT]]
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Color;
    use crate::tree::RbTree;

    fn tree_of(keys: &[i32]) -> RbTree<i32> {
        let mut tree = RbTree::new();
        for &key in keys {
            tree.add(key);
        }
        tree
    }

    #[test]
    fn remove_only_key_empties_tree() {
        let mut tree = tree_of(&[7]);
        assert_eq!(tree.remove(&7), Some(7));
        assert!(tree.is_empty());
        assert!(tree.root().is_nil());
        assert_eq!(tree.verify(), Ok(1));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut tree = tree_of(&[10, 20]);
        let root = tree.root();
        assert_eq!(tree.remove(&15), None);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root(), root);
        assert!(tree.contains(&10));
        assert!(tree.contains(&20));
        assert!(tree.verify().is_ok());

        let mut empty = RbTree::<i32>::new();
        assert_eq!(empty.remove(&1), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn remove_black_leaf_with_black_nephews() {
        // Once 5 is gone, 10 and 30 are black leaves under a black root.
        let mut tree = tree_of(&[20, 10, 30, 5]);
        tree.remove(&5);
        assert!(tree.verify().is_ok());
        assert_eq!(tree.remove(&30), Some(30));
        tree.verify().unwrap();
        let root = tree.root();
        assert_eq!(tree.key(root), Some(&20));
        assert_eq!(tree.color(tree.left(root)), Color::Red);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn two_children_keeps_node_identity() {
        let mut tree = tree_of(&[10, 20, 15, 25, 5, 17]);
        let holder = tree.locate(&20);
        assert!(!holder.is_nil());
        assert_eq!(tree.remove(&20), Some(20));
        assert_eq!(tree.key(holder), Some(&25));
        tree.verify().unwrap();
        assert!(!tree.contains(&20));
        for key in [5, 10, 15, 17, 25] {
            assert!(tree.contains(&key));
        }
    }

    #[test]
    fn red_sibling_rotates_parent_toward_gap() {
        // 10B(5B, 20R(15B, 25B(_, 30R)))
        let mut tree = tree_of(&[10, 5, 20, 15, 25, 30]);
        let root = tree.root();
        assert_eq!(tree.key(root), Some(&10));
        assert_eq!(tree.color(tree.right(root)), Color::Red);

        tree.remove(&5);
        assert_eq!(tree.verify(), Ok(3));
        let root = tree.root();
        assert_eq!(tree.key(root), Some(&20));
        let ten = tree.left(root);
        assert_eq!(tree.key(ten), Some(&10));
        assert_eq!(tree.color(ten), Color::Black);
        assert!(tree.left(ten).is_nil());
        assert_eq!(tree.key(tree.right(ten)), Some(&15));
        assert_eq!(tree.color(tree.right(ten)), Color::Red);
        let twenty_five = tree.right(root);
        assert_eq!(tree.key(twenty_five), Some(&25));
        assert_eq!(tree.color(twenty_five), Color::Black);
        assert_eq!(tree.key(tree.right(twenty_five)), Some(&30));
    }

    #[test]
    fn red_near_nephew_rotates_sibling_first() {
        // 10B(5B, 20B(15R, _))
        let mut tree = tree_of(&[10, 5, 20, 15]);
        let twenty = tree.right(tree.root());
        assert_eq!(tree.color(tree.left(twenty)), Color::Red);
        assert!(tree.right(twenty).is_nil());

        tree.remove(&5);
        assert_eq!(tree.verify(), Ok(3));
        let root = tree.root();
        assert_eq!(tree.key(root), Some(&15));
        assert_eq!(tree.color(root), Color::Black);
        assert_eq!(tree.key(tree.left(root)), Some(&10));
        assert_eq!(tree.color(tree.left(root)), Color::Black);
        assert_eq!(tree.key(tree.right(root)), Some(&20));
        assert_eq!(tree.color(tree.right(root)), Color::Black);
    }

    #[test]
    fn red_far_nephew_rotates_parent_once() {
        // 10B(5B, 20B(_, 25R))
        let mut tree = tree_of(&[10, 5, 20, 25]);
        tree.remove(&5);
        assert_eq!(tree.verify(), Ok(3));
        let root = tree.root();
        assert_eq!(tree.key(root), Some(&20));
        assert_eq!(tree.key(tree.left(root)), Some(&10));
        assert_eq!(tree.key(tree.right(root)), Some(&25));
        assert_eq!(tree.color(tree.left(root)), Color::Black);
        assert_eq!(tree.color(tree.right(root)), Color::Black);
    }

    #[test]
    fn two_children_at_root() {
        let mut tree = tree_of(&[10, 20, 15]);
        assert_eq!(tree.key(tree.root()), Some(&15));
        assert_eq!(tree.remove(&15), Some(15));
        tree.verify().unwrap();
        assert_eq!(tree.key(tree.root()), Some(&20));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut tree = tree_of(&[1, 2, 3, 4]);
        let slots = tree.nodes.len();
        tree.remove(&2);
        tree.remove(&4);
        tree.add(8);
        tree.add(9);
        assert_eq!(tree.nodes.len(), slots);
        tree.verify().unwrap();
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 8, 9]);
    }

    #[test]
    fn removes_returned_key() {
        let mut tree = RbTree::new();
        tree.add(String::from("alpha"));
        tree.add(String::from("beta"));
        let removed = tree.remove(&String::from("alpha"));
        assert_eq!(removed.as_deref(), Some("alpha"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn drain_in_strided_orders() {
        let keys: Vec<i32> = (0..64).collect();
        for start in 0..8 {
            let mut tree = tree_of(&keys);
            let order = keys
                .iter()
                .copied()
                .cycle()
                .skip(start * 7)
                .step_by(5)
                .take(keys.len());
            let mut removed = 0;
            for key in order {
                if tree.remove(&key).is_some() {
                    removed += 1;
                }
                tree.verify().unwrap();
            }
            assert_eq!(tree.len(), keys.len() - removed);
        }
    }
}
