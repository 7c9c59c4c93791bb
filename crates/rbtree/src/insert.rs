use std::cmp::Ordering;

use log::trace;

use crate::node::{Color, LEFT, NodeId, RIGHT};
use crate::tree::RbTree;

impl<K: Ord> RbTree<K> {
    /// Inserts `key`. Returns `false` and leaves the tree untouched if an
    /// equal key is already present.
    pub fn add(&mut self, key: K) -> bool {
        let mut parent = NodeId::NIL;
        let mut dir = LEFT;
        let mut cur = self.root;
        while !cur.is_nil() {
            dir = match key.cmp(self.key_of(cur)) {
                Ordering::Less => LEFT,
                Ordering::Greater => RIGHT,
                Ordering::Equal => return false,
            };
            parent = cur;
            cur = self.node(cur).ch[dir];
        }

        let z = self.alloc(key);
        self.node_mut(z).p = parent;
        if parent.is_nil() {
            self.root = z;
        } else {
            self.node_mut(parent).ch[dir] = z;
        }
        self.len += 1;

        self.insert_fixup(z);
        true
    }

    /// `z` is red; the only possible violation is a red parent.
    fn insert_fixup(&mut self, mut z: NodeId) {
        loop {
            let mut p = self.node(z).p;
            if !self.is_red(p) {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let g = self.node(p).p;
            let side = self.side_of(p);
            let uncle = self.node(g).ch[side ^ 1];

            if self.is_red(uncle) {
                trace!("insert fixup at {z:?}: red uncle, push red up to {g:?}");
                self.set_color(p, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(g, Color::Red);
                z = g;
                continue;
            }

            if self.node(p).ch[side ^ 1] == z {
                trace!("insert fixup at {z:?}: inner grandchild, straighten");
                self.rotate(p, side);
                z = p;
                p = self.node(z).p;
            }

            trace!("insert fixup at {z:?}: outer grandchild, rotate {g:?}");
            self.set_color(p, Color::Black);
            self.set_color(g, Color::Red);
            self.rotate(g, side ^ 1);
            break;
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }
}
