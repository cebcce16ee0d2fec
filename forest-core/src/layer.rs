use crate::config::ForestConfig;
use crate::error::{ForestError, ForestResult};
use glam::Vec2;
use rand::Rng;
use tracing::debug;

/// Returns every lattice point of a square window of side `3 + 2 * extra`.
///
/// The window is translated by `(-(extra + 1), -(extra + 1))`, which keeps
/// the 3x3 root window (top-left corner at `(0, 0)`) inside it for every
/// `extra >= 1`. For `extra == 1` the window spans `(-2, -2)` to `(2, 2)`.
///
/// When `extra` is even the whole window is additionally shifted by
/// `(0.5, 0.5)`, so its columns never line up with the root grid and an edge
/// between two consecutive layers cannot be a perfectly vertical segment.
///
/// ### Parameters
/// - `extra` - How many units the window extends beyond the 3x3 root grid
///   in each direction.
///
/// ### Returns
/// All `(3 + 2 * extra)^2` points of the window.
pub fn grid_points(extra: usize) -> Vec<Vec2> {
    let side = 2 * extra + 3;
    let shift = (extra + 1) as f32;
    let offset = if extra % 2 == 0 { 0.5 } else { 0.0 };

    let mut points = Vec::with_capacity(side * side);
    for k in 0..side {
        for m in 0..side {
            points.push(Vec2::new(
                k as f32 - shift + offset,
                m as f32 - shift + offset,
            ));
        }
    }
    points
}

/// Returns the root position of each tree, row-major on the 3x3 start grid.
///
/// Tree `i` starts at `(i / 3, i % 3)`. Roots are fixed: they are never
/// drawn from a pool and never reused.
pub fn root_points(cfg: &ForestConfig) -> Vec<Vec2> {
    (0..cfg.trees)
        .map(|i| Vec2::new((i / 3) as f32, (i % 3) as f32))
        .collect()
}

/// Depth-indexed pools of unused grid points, shared by every tree.
///
/// Pool `d` holds the candidate positions for nodes at depth `d + 1`. Each
/// pool is sized up front to survive the worst case in which every node of
/// every tree branches at `max_children`: pool `d` starts with at least
/// `trees * max_children^(d + 1)` points.
#[derive(Debug)]
pub struct LayerPools {
    pools: Vec<Vec<Vec2>>,
}

impl LayerPools {
    /// Builds one pool per configured layer, searching for the smallest
    /// window that satisfies the worst-case demand bound for its depth.
    ///
    /// The search starts at `extra = 1` and widens the window until the
    /// point count reaches the bound. The count is strictly monotonic in
    /// `extra`, so the search always terminates.
    ///
    /// ### Parameters
    /// - `cfg` - Generation parameters; `trees`, `layers` and `max_children`
    ///   determine the pool sizes.
    ///
    /// ### Returns
    /// A [`LayerPools`] with `cfg.layers` pools, each meeting its bound.
    pub fn for_config(cfg: &ForestConfig) -> Self {
        let pools = (0..cfg.layers)
            .map(|depth| {
                let required = cfg.trees * cfg.max_children.pow(depth as u32 + 1);
                let mut extra = 1;
                let mut pool = grid_points(extra);
                while pool.len() < required {
                    extra += 1;
                    pool = grid_points(extra);
                }
                debug!(depth, extra, points = pool.len(), required, "sized layer pool");
                pool
            })
            .collect();

        Self { pools }
    }

    /// Draws one point uniformly at random from pool `depth`, removing it so
    /// that no later draw can return the same point.
    ///
    /// ### Parameters
    /// - `depth` - Pool index; pool `depth` feeds nodes at depth `depth + 1`.
    /// - `rng` - Random number generator to draw with.
    ///
    /// ### Errors
    /// [`ForestError::LayerExhausted`] if the pool is empty. Under the
    /// sizing bound this cannot happen; hitting it means the configuration
    /// was changed inconsistently with the pool sizing.
    pub fn draw(&mut self, depth: usize, rng: &mut impl Rng) -> ForestResult<Vec2> {
        let pool = &mut self.pools[depth];
        if pool.is_empty() {
            return Err(ForestError::LayerExhausted { depth });
        }
        let i = rng.random_range(0..pool.len());
        Ok(pool.swap_remove(i))
    }

    /// Number of points left in pool `depth`.
    pub fn pool_size(&self, depth: usize) -> usize {
        self.pools[depth].len()
    }
}
