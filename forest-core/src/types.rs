/// Identifier for a node in a [`crate::tree::Tree`].
///
/// Minted sequentially as nodes are appended, so it doubles as an index into
/// `Tree::nodes` until the forest-wide renumbering folds all trees into a
/// single ID space.
pub type NodeId = usize;
