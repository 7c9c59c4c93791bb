mod insert;
mod iter;
mod node;
mod remove;
mod tree;
mod verify;

pub use iter::Iter;
pub use node::{Color, NIL_LEAF, NodeId};
pub use tree::RbTree;
pub use verify::InvariantError;

pub type Result<T> = std::result::Result<T, InvariantError>;
