use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForestError {
    #[error("tree count must be within 1..=9, got {0}")]
    TreeCount(usize),

    #[error("layer count must be at least 1, got {0}")]
    LayerCount(usize),

    #[error("branching range {min}..={max} must satisfy 1 <= min <= max")]
    BranchingRange { min: usize, max: usize },

    #[error("point pool for depth {depth} exhausted during draw")]
    LayerExhausted { depth: usize },

    #[error("failed to write forest output: {0}")]
    Io(#[from] std::io::Error),
}

pub type ForestResult<T> = Result<T, ForestError>;
