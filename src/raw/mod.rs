mod arena;
mod handle;
mod node;
mod raw_rand_tree;
mod size;

pub(crate) use arena::Arena;
pub(crate) use handle::Handle;
pub(crate) use raw_rand_tree::{RawRandTree, Spine};
