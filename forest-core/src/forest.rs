//! Whole-forest assembly on top of the shared point pools.
//!
//! A generation pass runs in three steps:
//! 1. [`LayerPools::for_config`] sizes one shared point pool per depth.
//! 2. [`Tree::grow`] runs once per root, all trees draining the same pools.
//! 3. Renumbering folds the per-tree ID spaces into one global ID space.

use crate::config::ForestConfig;
use crate::error::ForestResult;
use crate::layer::{self, LayerPools};
use crate::tree::{Node, Tree};
use rand::Rng;
use tracing::info;

/// A fully generated forest, already renumbered into the global ID space.
#[derive(Debug)]
pub struct Forest {
    pub trees: Vec<Tree>,
    /// Depth of the deepest layer; every leaf sits exactly here.
    depth: usize,
}

impl Forest {
    /// Runs one complete generation pass.
    ///
    /// Pools are sized once for the worst-case demand of the whole forest,
    /// then one tree is grown per root point, in root order, all trees
    /// drawing from the same pools. Afterwards the trees are renumbered: a
    /// running offset, incremented by each tree's node count, is added to
    /// every ID and parent reference, so no two trees' ID ranges overlap
    /// while intra-tree linkage is preserved.
    ///
    /// RNG consumption order is observable behavior: per node one
    /// branching-factor draw followed by one pool draw per child,
    /// depth-first within a tree, trees in root order. The marker draws of
    /// [`Forest::random_leaf`] come after all of these.
    ///
    /// ### Parameters
    /// - `cfg` - Generation parameters; validated before any work happens.
    /// - `rng` - Random number generator driving all draws.
    ///
    /// ### Returns
    /// The generated forest in the global ID space.
    ///
    /// ### Errors
    /// Configuration validation failures, or the fatal
    /// [`crate::error::ForestError::LayerExhausted`] if a pool runs dry.
    pub fn generate(cfg: &ForestConfig, rng: &mut impl Rng) -> ForestResult<Self> {
        cfg.validate()?;

        let mut pools = LayerPools::for_config(cfg);
        let mut trees = Vec::with_capacity(cfg.trees);
        for root in layer::root_points(cfg) {
            trees.push(Tree::grow(root, &mut pools, cfg, rng)?);
        }

        let mut forest = Self {
            trees,
            depth: cfg.layers,
        };
        forest.renumber();

        info!(
            trees = forest.trees.len(),
            nodes = forest.num_nodes(),
            "generated forest"
        );
        Ok(forest)
    }

    // Runs exactly once, at the end of generation.
    fn renumber(&mut self) {
        let mut offset = 0;
        for tree in &mut self.trees {
            tree.translate(offset);
            offset += tree.num_nodes();
        }
    }

    /// Picks the export marker: one tree uniformly at random, then one node
    /// uniformly among that tree's deepest nodes.
    ///
    /// Every path reaches the deepest layer by construction, so the
    /// candidate set is never empty.
    ///
    /// ### Parameters
    /// - `rng` - Random number generator; consumes one tree-index draw and
    ///   one leaf-index draw.
    ///
    /// ### Returns
    /// The chosen leaf node.
    pub fn random_leaf(&self, rng: &mut impl Rng) -> &Node {
        let tree = &self.trees[rng.random_range(0..self.trees.len())];
        let leaves: Vec<&Node> = tree
            .nodes
            .iter()
            .filter(|n| n.depth == self.depth)
            .collect();
        leaves[rng.random_range(0..leaves.len())]
    }

    /// Iterates over all nodes, trees in order, nodes in depth-first
    /// insertion order.
    pub fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a Node> + 'a {
        self.trees.iter().flat_map(|t| t.nodes.iter())
    }

    pub fn num_nodes(&self) -> usize {
        self.trees.iter().map(Tree::num_nodes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn ids_are_unique_across_the_whole_forest() {
        let cfg = ForestConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let forest = Forest::generate(&cfg, &mut rng).unwrap();

        let ids: HashSet<_> = forest.nodes().map(|n| n.id).collect();
        assert_eq!(ids.len(), forest.num_nodes());
    }

    #[test]
    fn tree_id_ranges_are_contiguous_and_disjoint() {
        let cfg = ForestConfig {
            trees: 2,
            layers: 2,
            min_children: 1,
            max_children: 2,
        };
        let mut rng = StdRng::seed_from_u64(8);
        let forest = Forest::generate(&cfg, &mut rng).unwrap();

        let mut next_id = 0;
        for tree in &forest.trees {
            // Root + 1..=2 children + 1..=2 grandchildren per child.
            assert!((3..=7).contains(&tree.num_nodes()));

            for (i, node) in tree.nodes.iter().enumerate() {
                assert_eq!(node.id, next_id + i);
            }
            next_id += tree.num_nodes();
        }
    }

    #[test]
    fn parent_references_stay_inside_the_owning_tree() {
        let cfg = ForestConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let forest = Forest::generate(&cfg, &mut rng).unwrap();

        for tree in &forest.trees {
            let by_id: HashMap<_, _> = tree.nodes.iter().map(|n| (n.id, n)).collect();
            for node in &tree.nodes {
                let parent = by_id
                    .get(&node.parent)
                    .expect("parent must belong to the same tree");
                if node.id == node.parent {
                    assert_eq!(node.depth, 0, "only roots reference themselves");
                } else {
                    assert_eq!(parent.depth + 1, node.depth);
                }
            }
        }
    }

    #[test]
    fn leaves_sit_exactly_at_the_deepest_layer() {
        let cfg = ForestConfig::default();
        let mut rng = StdRng::seed_from_u64(10);
        let forest = Forest::generate(&cfg, &mut rng).unwrap();

        let referenced: HashSet<_> = forest
            .nodes()
            .filter(|n| n.id != n.parent)
            .map(|n| n.parent)
            .collect();

        for node in forest.nodes() {
            assert!(node.depth <= cfg.layers);
            let is_leaf = !referenced.contains(&node.id);
            assert_eq!(is_leaf, node.depth == cfg.layers);
        }
    }

    #[test]
    fn no_point_repeats_within_a_depth_across_trees() {
        let cfg = ForestConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let forest = Forest::generate(&cfg, &mut rng).unwrap();

        for depth in 0..=cfg.layers {
            let at_depth: Vec<_> = forest.nodes().filter(|n| n.depth == depth).collect();
            let distinct: HashSet<_> = at_depth
                .iter()
                .map(|n| ((n.pos.x * 2.0) as i64, (n.pos.y * 2.0) as i64))
                .collect();
            assert_eq!(distinct.len(), at_depth.len(), "duplicate point at depth {depth}");
        }
    }

    #[test]
    fn random_leaf_returns_a_deepest_node_of_the_forest() {
        let cfg = ForestConfig::default();
        let mut rng = StdRng::seed_from_u64(12);
        let forest = Forest::generate(&cfg, &mut rng).unwrap();

        let leaf = forest.random_leaf(&mut rng);
        assert_eq!(leaf.depth, cfg.layers);
        assert!(forest.nodes().any(|n| n.id == leaf.id));
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let cfg = ForestConfig::default();

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let forest = Forest::generate(&cfg, &mut rng).unwrap();
            let leaf_id = forest.random_leaf(&mut rng).id;
            (crate::export::render(&forest, leaf_id), leaf_id)
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn invalid_configs_are_rejected_before_generation() {
        let cfg = ForestConfig {
            trees: 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(13);
        assert!(Forest::generate(&cfg, &mut rng).is_err());
    }
}
