//! Dimension scoring and tier classification.
//!
//! Survey answers are on a 1-5 scale. A dimension's raw score is the mean of
//! its answers; it is compared against a survey's minimum acceptable
//! threshold after both are converted to percentages of the scale maximum.

use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Highest value on the response scale.
pub const SCALE_MAX: f64 = 5.0;

/// Lowest value a single answer may take.
pub const MIN_ANSWER: i16 = 1;

/// Highest value a single answer may take.
pub const MAX_ANSWER: i16 = 5;

/// Width of the at-risk band above the threshold, in raw scale points.
pub const AT_RISK_MARGIN: f64 = 0.5;

/// Minimum threshold used when a survey does not configure one.
pub const DEFAULT_MINIMUM_THRESHOLD: f64 = 3.0;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Classification bucket for a dimension score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Critical,
    AtRisk,
    Strong,
}

impl Tier {
    /// Wire/storage name of the tier. Matches the `actions.tier` column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::AtRisk => "at_risk",
            Tier::Strong => "strong",
        }
    }
}

/// Dimension names split into the three tiers, each preserving input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DimensionTiers {
    pub critical: Vec<String>,
    pub at_risk: Vec<String>,
    pub strong: Vec<String>,
}

impl DimensionTiers {
    /// Iterate `(tier, names)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[String])> {
        [
            (Tier::Critical, self.critical.as_slice()),
            (Tier::AtRisk, self.at_risk.as_slice()),
            (Tier::Strong, self.strong.as_slice()),
        ]
        .into_iter()
    }

    pub fn len(&self) -> usize {
        self.critical.len() + self.at_risk.len() + self.strong.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Convert a raw 0-5 score to a percentage of the scale maximum.
pub fn to_percentage(score: f64) -> f64 {
    score / SCALE_MAX * 100.0
}

/// Classify a single raw score against a raw threshold.
///
/// Lower bounds are inclusive: a score equal to the threshold is critical and
/// a score equal to `threshold + 0.5` is at-risk.
pub fn classify_score(score: f64, threshold: f64) -> Tier {
    let pct = to_percentage(score);
    if pct <= to_percentage(threshold) {
        Tier::Critical
    } else if pct <= to_percentage(threshold + AT_RISK_MARGIN) {
        Tier::AtRisk
    } else {
        Tier::Strong
    }
}

/// Split `(dimension, raw score)` pairs into tiers.
pub fn classify_dimensions(scores: &[DimensionScore], threshold: f64) -> DimensionTiers {
    let mut tiers = DimensionTiers::default();
    for dim in scores {
        let bucket = match classify_score(dim.score, threshold) {
            Tier::Critical => &mut tiers.critical,
            Tier::AtRisk => &mut tiers.at_risk,
            Tier::Strong => &mut tiers.strong,
        };
        bucket.push(dim.name.clone());
    }
    tiers
}

/// Check that a threshold lies on the response scale.
pub fn validate_threshold(threshold: f64) -> Result<(), String> {
    if threshold.is_finite() && (0.0..=SCALE_MAX).contains(&threshold) {
        Ok(())
    } else {
        Err(format!(
            "Threshold must be between 0 and {SCALE_MAX}, got {threshold}"
        ))
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// A dimension paired with its raw average score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub name: String,
    pub score: f64,
}

impl DimensionScore {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    pub fn percentage(&self) -> f64 {
        to_percentage(self.score)
    }
}

/// Average raw answers per dimension.
///
/// Rows are `(dimension, answer)` pairs. The result is ordered by dimension
/// name so classification output is deterministic.
pub fn score_dimensions<'a, I>(rows: I) -> Vec<DimensionScore>
where
    I: IntoIterator<Item = (&'a str, i16)>,
{
    let mut sums: BTreeMap<&str, (i64, u32)> = BTreeMap::new();
    for (dimension, answer) in rows {
        let entry = sums.entry(dimension).or_insert((0, 0));
        entry.0 += i64::from(answer);
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(name, (sum, count))| DimensionScore::new(name, sum as f64 / f64::from(count)))
        .collect()
}

/// Mean of all answers, or `0.0` when there are none.
pub fn average_score<I>(answers: I) -> f64
where
    I: IntoIterator<Item = i16>,
{
    let (sum, count) = answers
        .into_iter()
        .fold((0i64, 0u32), |(s, c), a| (s + i64::from(a), c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / f64::from(count)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
