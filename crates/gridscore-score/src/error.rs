//! Scoring-subsystem error types.

use std::error::Error;
use std::fmt;

/// Errors from the reduction and classification passes.
#[derive(Clone, Debug, PartialEq)]
pub enum ScoreError {
    /// Cooperative cancellation observed inside the feature loop.
    /// Distinct from a failure: the caller reports a cancelled run.
    Cancelled,
    /// A `MaxScore` policy named an attribute a feature does not carry
    /// (or carries as something non-numeric). Silently skipping the
    /// feature would corrupt the composite index, so this is fatal.
    MissingAttribute {
        /// The attribute name the policy asked for.
        name: String,
        /// Index of the offending feature in the layer.
        feature: usize,
    },
    /// The statistic pass could not be applied to the arena.
    StatisticPassFailed {
        /// Description from the grid layer.
        reason: String,
    },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "reduction cancelled"),
            Self::MissingAttribute { name, feature } => {
                write!(f, "feature {feature} has no numeric attribute '{name}'")
            }
            Self::StatisticPassFailed { reason } => {
                write!(f, "statistic pass failed: {reason}")
            }
        }
    }
}

impl Error for ScoreError {}
