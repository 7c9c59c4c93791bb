use thiserror::Error;

use crate::Result;
use crate::node::{Color, LEFT, NodeId, RIGHT};
use crate::tree::RbTree;

/// First red-black or structural invariant found broken by
/// [`RbTree::verify`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("root is red")]
    RedRoot,

    #[error("red node {node:?} has red child {child:?}")]
    RedParentOfRed { node: NodeId, child: NodeId },

    #[error("black heights differ under {node:?}: left {left}, right {right}")]
    BlackHeightMismatch {
        node: NodeId,
        left: usize,
        right: usize,
    },

    #[error("node {node:?} links to parent {found:?}, expected {expected:?}")]
    BrokenParentLink {
        node: NodeId,
        expected: NodeId,
        found: NodeId,
    },

    #[error("key at {node:?} is out of order")]
    KeysOutOfOrder { node: NodeId },

    #[error("vacated slot {node:?} is still linked into the tree")]
    VacantSlot { node: NodeId },

    #[error("tree reports {expected} keys but {found} nodes are reachable")]
    LenMismatch { expected: usize, found: usize },
}

impl<K: Ord> RbTree<K> {
    /// Checks every invariant and returns the black height of the root,
    /// counting the sentinel leaf as one.
    pub fn verify(&self) -> Result<usize> {
        if self.color(self.root) == Color::Red {
            return Err(InvariantError::RedRoot);
        }
        let found = self.parent(self.root);
        if !found.is_nil() {
            return Err(InvariantError::BrokenParentLink {
                node: self.root,
                expected: NodeId::NIL,
                found,
            });
        }

        let mut reachable = 0;
        let height = self.check_subtree(self.root, None, None, &mut reachable)?;
        if reachable != self.len {
            return Err(InvariantError::LenMismatch {
                expected: self.len,
                found: reachable,
            });
        }
        Ok(height)
    }

    fn check_subtree(
        &self,
        x: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        reachable: &mut usize,
    ) -> Result<usize> {
        if x.is_nil() {
            return Ok(1);
        }
        *reachable += 1;

        let node = self.node(x);
        let Some(key) = node.key.as_ref() else {
            return Err(InvariantError::VacantSlot { node: x });
        };
        if lower.is_some_and(|lo| lo >= key) || upper.is_some_and(|hi| hi <= key) {
            return Err(InvariantError::KeysOutOfOrder { node: x });
        }

        for child in node.ch {
            if child.is_nil() {
                continue;
            }
            let found = self.node(child).p;
            if found != x {
                return Err(InvariantError::BrokenParentLink {
                    node: child,
                    expected: x,
                    found,
                });
            }
            if node.color == Color::Red && self.is_red(child) {
                return Err(InvariantError::RedParentOfRed { node: x, child });
            }
        }

        let left = self.check_subtree(node.ch[LEFT], lower, Some(key), reachable)?;
        let right = self.check_subtree(node.ch[RIGHT], Some(key), upper, reachable)?;
        if left != right {
            return Err(InvariantError::BlackHeightMismatch {
                node: x,
                left,
                right,
            });
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}
