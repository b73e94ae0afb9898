//! Score bands and threshold tables.
//!
//! A [`ScoreTable`] maps a cell's numeric statistic to a discrete
//! [`Score`] via an ordered list of [`ScoreBand`]s. Bands are evaluated
//! in declaration order and the first matching band wins; statistics
//! matching no band receive the table's default score. This first-match
//! rule is what makes classification deterministic even when bands are
//! written carelessly by a caller.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// A discrete classification score.
///
/// The default domain is `{0, 1, 2, 3, 4, 5}`, but the type does not
/// enforce it — the domain is fixed by the table that produced the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score(pub u8);

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Score {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

/// One threshold rule: statistics in `(lower, upper]` map to `score`.
///
/// Bounds are optional on both sides. The boundary convention is
/// exclusive on the lower side and inclusive on the upper side, which
/// reproduces published cutoffs of the form "501–750" exactly: a
/// statistic of 750 falls in the 501–750 band, 751 in the next one up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    /// Exclusive lower bound; `None` means unbounded below.
    pub lower: Option<f64>,
    /// Inclusive upper bound; `None` means unbounded above.
    pub upper: Option<f64>,
    /// Score assigned to statistics inside the band.
    pub score: Score,
}

impl ScoreBand {
    /// Band matching `lower < x <= upper`.
    pub fn between(lower: f64, upper: f64, score: Score) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
            score,
        }
    }

    /// Band matching `x > lower`.
    pub fn above(lower: f64, score: Score) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
            score,
        }
    }

    /// Band matching `x <= upper`.
    pub fn at_most(upper: f64, score: Score) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
            score,
        }
    }

    /// True when the statistic falls inside this band.
    pub fn contains(&self, statistic: f64) -> bool {
        let above_lower = self.lower.map_or(true, |lo| statistic > lo);
        let below_upper = self.upper.map_or(true, |hi| statistic <= hi);
        above_lower && below_upper
    }
}

/// Errors detected during [`ScoreTable::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScoreTableError {
    /// A band's lower bound is not strictly below its upper bound,
    /// so the band can never match.
    EmptyBand {
        /// Position of the offending band in the table.
        index: usize,
    },
    /// A band bound is NaN, which would poison every comparison.
    NonFiniteBound {
        /// Position of the offending band in the table.
        index: usize,
    },
}

impl fmt::Display for ScoreTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBand { index } => {
                write!(f, "band {index} has lower >= upper and can never match")
            }
            Self::NonFiniteBound { index } => {
                write!(f, "band {index} has a non-finite bound")
            }
        }
    }
}

impl Error for ScoreTableError {}

/// An ordered threshold table with a default score.
///
/// Classification evaluates bands in order; the first matching band
/// wins. The two published workflow tables ship as constructors:
/// [`ScoreTable::feature_count`] and [`ScoreTable::block_perimeter`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    bands: Vec<ScoreBand>,
    default_score: Score,
}

impl ScoreTable {
    /// Build a table from ordered bands and a default score.
    pub fn new(bands: Vec<ScoreBand>, default_score: Score) -> Self {
        Self {
            bands,
            default_score,
        }
    }

    /// The count-based table used by the features-per-cell workflow.
    ///
    /// Exactly three buckets: `count == 0 -> 0`, `count == 1 -> 3`,
    /// `count >= 2 -> 5`. Finer-grained bands would be added here, but
    /// the three-bucket collapse is required for parity with existing
    /// indicator outputs.
    pub fn feature_count() -> Self {
        Self::new(
            vec![
                ScoreBand::at_most(0.0, Score(0)),
                ScoreBand::between(0.0, 1.0, Score(3)),
                ScoreBand::above(1.0, Score(5)),
            ],
            Score(0),
        )
    }

    /// The perimeter-based table used by the block-size workflow.
    ///
    /// Larger blocks score *lower*: `>1000 -> 1`, `751-1000 -> 2`,
    /// `501-750 -> 3`, `251-500 -> 4`, `0 < p <= 250 -> 5`, and no
    /// intersecting block at all scores 0. Block size is an inverse
    /// proxy for walkability, so the inversion is intentional domain
    /// semantics and must not be "fixed".
    pub fn block_perimeter() -> Self {
        Self::new(
            vec![
                ScoreBand::above(1000.0, Score(1)),
                ScoreBand::between(750.0, 1000.0, Score(2)),
                ScoreBand::between(500.0, 750.0, Score(3)),
                ScoreBand::between(250.0, 500.0, Score(4)),
                ScoreBand::between(0.0, 250.0, Score(5)),
            ],
            Score(0),
        )
    }

    /// The bands in evaluation order.
    pub fn bands(&self) -> &[ScoreBand] {
        &self.bands
    }

    /// Score for statistics matching no band.
    pub fn default_score(&self) -> Score {
        self.default_score
    }

    /// Check structural invariants: every band must be matchable and
    /// every bound finite.
    pub fn validate(&self) -> Result<(), ScoreTableError> {
        for (index, band) in self.bands.iter().enumerate() {
            let lower_bad = band.lower.is_some_and(|v| v.is_nan());
            let upper_bad = band.upper.is_some_and(|v| v.is_nan());
            if lower_bad || upper_bad {
                return Err(ScoreTableError::NonFiniteBound { index });
            }
            if let (Some(lo), Some(hi)) = (band.lower, band.upper) {
                if lo >= hi {
                    return Err(ScoreTableError::EmptyBand { index });
                }
            }
        }
        Ok(())
    }

    /// Classify one statistic value. First matching band wins;
    /// no match yields the default score.
    pub fn classify(&self, statistic: f64) -> Score {
        self.bands
            .iter()
            .find(|band| band.contains(statistic))
            .map(|band| band.score)
            .unwrap_or(self.default_score)
    }
}
