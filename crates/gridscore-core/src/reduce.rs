//! Reduction policies for the feature-to-cell pass.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a cell's intersecting features fold into a single statistic.
///
/// The reducer is one loop parameterised by this tagged variant, not a
/// set of near-duplicate per-workflow loops. Every policy starts from
/// the identity value `0.0`, so cells with no intersecting features
/// keep a statistic of zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ReducePolicy {
    /// Count intersecting features (one increment per feature per cell).
    Count,
    /// Track the maximum boundary length among intersecting polygons.
    /// Used by the block-size workflow.
    MaxPerimeter,
    /// Track the maximum line length among intersecting lines.
    /// Used by the transport workflow.
    MaxLength,
    /// Take the best precomputed per-feature score among intersecting
    /// features. The transport workflow variant where each feature
    /// already carries a classified score in its attributes.
    MaxScore {
        /// Name of the numeric attribute holding the feature's score.
        attribute: String,
    },
}

impl ReducePolicy {
    /// Fold one feature metric into the running statistic for a cell.
    pub fn combine(&self, accumulated: f64, metric: f64) -> f64 {
        match self {
            Self::Count => accumulated + 1.0,
            Self::MaxPerimeter | Self::MaxLength | Self::MaxScore { .. } => {
                accumulated.max(metric)
            }
        }
    }
}

impl fmt::Display for ReducePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::MaxPerimeter => write!(f, "max-perimeter"),
            Self::MaxLength => write!(f, "max-length"),
            Self::MaxScore { attribute } => write!(f, "max-score({attribute})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_ignores_metric() {
        let p = ReducePolicy::Count;
        assert_eq!(p.combine(0.0, 123.0), 1.0);
        assert_eq!(p.combine(3.0, 0.0), 4.0);
    }

    #[test]
    fn max_keeps_largest() {
        let p = ReducePolicy::MaxPerimeter;
        assert_eq!(p.combine(0.0, 800.0), 800.0);
        assert_eq!(p.combine(800.0, 200.0), 800.0);
    }
}
