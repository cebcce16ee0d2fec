use crate::error::{ForestError, ForestResult};

/// Generation parameters for one forest run.
#[derive(Clone, Copy, Debug)]
pub struct ForestConfig {
    /// Number of trees to grow. Roots live on a 3x3 grid, so at most 9.
    pub trees: usize,
    /// Number of depth layers below the roots. Tree size grows
    /// exponentially with this.
    pub layers: usize,
    /// Smallest number of children a non-leaf node may get.
    pub min_children: usize,
    /// Largest number of children a non-leaf node may get.
    pub max_children: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 3,
            layers: 3,
            min_children: 1,
            max_children: 2,
        }
    }
}

impl ForestConfig {
    pub fn validate(&self) -> ForestResult<()> {
        if self.trees == 0 || self.trees > 9 {
            return Err(ForestError::TreeCount(self.trees));
        }
        if self.layers == 0 {
            return Err(ForestError::LayerCount(self.layers));
        }
        if self.min_children == 0 || self.min_children > self.max_children {
            return Err(ForestError::BranchingRange {
                min: self.min_children,
                max: self.max_children,
            });
        }
        Ok(())
    }
}
