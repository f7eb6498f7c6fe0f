use thiserror::Error;

use crate::{MAX_ATTEMPTS, MAX_DIM, MAX_SUPPORTED_DIM, MIN_DIM};

/// Reasons a `LayoutConfig` can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minimum dimension must be at least 1")]
    ZeroDimension,

    #[error("minimum dimension {min_dim} is larger than maximum dimension {max_dim}")]
    InvertedDimensions { min_dim: usize, max_dim: usize },

    #[error("maximum dimension {max_dim} exceeds the supported limit of {limit}")]
    DimensionTooLarge { max_dim: usize, limit: usize },
}

/// The tunable bounds of the layout search. None of these change what a valid layout is, only
/// how hard we look for an interwoven one before settling for the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    min_dim: usize,
    max_dim: usize,
    max_attempts: usize,
}

impl LayoutConfig {
    /// Build a validated config. `max_attempts` may be zero, in which case every generation
    /// goes straight to the fallback layout.
    pub fn new(min_dim: usize, max_dim: usize, max_attempts: usize) -> Result<Self, ConfigError> {
        if min_dim == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if min_dim > max_dim {
            return Err(ConfigError::InvertedDimensions { min_dim, max_dim });
        }
        if max_dim > MAX_SUPPORTED_DIM {
            return Err(ConfigError::DimensionTooLarge { max_dim, limit: MAX_SUPPORTED_DIM });
        }

        Ok(LayoutConfig { min_dim, max_dim, max_attempts })
    }

    pub fn min_dim(&self) -> usize {
        self.min_dim
    }

    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig { min_dim: MIN_DIM, max_dim: MAX_DIM, max_attempts: MAX_ATTEMPTS }
    }
}

/// Smallest `dim` such that `dim * dim >= cells`.
pub(crate) fn ceil_sqrt(cells: usize) -> usize {
    let mut dim = (cells as f64).sqrt() as usize;
    while dim * dim < cells {
        dim += 1;
    }
    while dim > 0 && (dim - 1) * (dim - 1) >= cells {
        dim -= 1;
    }
    dim
}
