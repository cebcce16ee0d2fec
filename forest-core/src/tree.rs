use crate::config::ForestConfig;
use crate::error::ForestResult;
use crate::layer::LayerPools;
use crate::types::NodeId;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct Node {
    pub id: NodeId,
    pub pos: Vec2,
    pub depth: usize,
    pub parent: NodeId,
}

#[derive(Debug)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Grows a complete tree from `root`, consuming points from the shared
    /// pools. Per node the RNG is consumed in this order: one
    /// branching-factor draw, then one pool draw per child, depth-first.
    pub fn grow(
        root: Vec2,
        pools: &mut LayerPools,
        cfg: &ForestConfig,
        rng: &mut impl Rng,
    ) -> ForestResult<Self> {
        let mut tree = Self { nodes: Vec::new() };
        // The first minted ID is 0, so the root ends up as its own parent.
        tree.extend(root, pools, 0, 0, cfg, rng)?;
        Ok(tree)
    }

    fn extend(
        &mut self,
        pos: Vec2,
        pools: &mut LayerPools,
        parent: NodeId,
        depth: usize,
        cfg: &ForestConfig,
        rng: &mut impl Rng,
    ) -> ForestResult<()> {
        let id = self.add_node(pos, depth, parent);
        if depth >= cfg.layers {
            return Ok(());
        }

        let children = rng.random_range(cfg.min_children..=cfg.max_children);
        for _ in 0..children {
            let child_pos = pools.draw(depth, rng)?;
            self.extend(child_pos, pools, id, depth + 1, cfg, rng)?;
        }
        Ok(())
    }

    fn add_node(&mut self, pos: Vec2, depth: usize, parent: NodeId) -> NodeId {
        let id: NodeId = self.nodes.len();
        self.nodes.push(Node {
            id,
            pos,
            depth,
            parent,
        });
        id
    }

    /// Shifts every node's ID and parent reference by `offset`.
    pub fn translate(&mut self, offset: usize) {
        for node in &mut self.nodes {
            node.id += offset;
            node.parent += offset;
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}
