//! Response summary aggregation.
//!
//! Combines a survey's headline numbers with its classified dimensions and
//! cross-references the actions raised against each `(dimension, tier)`.

use std::collections::HashMap;

use serde::Serialize;

use crate::actions::ActionRecord;
use crate::scoring::{to_percentage, DimensionScore, DimensionTiers, Tier};

/// Inputs to [`build_summary`].
pub struct SummaryInput<'a, A> {
    pub respondent_count: i64,
    /// Mean answer across all responses, 0-5.
    pub average_score: f64,
    /// Minimum acceptable score, 0-5.
    pub minimum_threshold: f64,
    pub scores: &'a [DimensionScore],
    pub tiers: &'a DimensionTiers,
    pub actions: &'a [A],
}

/// One dimension within a tier, with the actions raised against it.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionSummary<A> {
    pub name: String,
    pub score: f64,
    pub percentage: f64,
    pub action_count: usize,
    pub actions: Vec<A>,
}

/// The composite summary rendered by the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSummary<A> {
    pub respondent_count: i64,
    pub average_score: f64,
    pub average_percentage: f64,
    pub minimum_threshold: f64,
    pub threshold_percentage: f64,
    pub critical: Vec<DimensionSummary<A>>,
    pub at_risk: Vec<DimensionSummary<A>>,
    pub strong: Vec<DimensionSummary<A>>,
}

/// Build the summary. Purely derived; nothing is persisted.
///
/// A dimension named in `tiers` but missing from `scores` is reported with a
/// score of `0.0`.
pub fn build_summary<A>(input: SummaryInput<'_, A>) -> ResponseSummary<A>
where
    A: ActionRecord + Clone,
{
    let score_by_name: HashMap<&str, f64> = input
        .scores
        .iter()
        .map(|d| (d.name.as_str(), d.score))
        .collect();

    let summarize = |tier: Tier, names: &[String]| -> Vec<DimensionSummary<A>> {
        names
            .iter()
            .map(|name| {
                let actions: Vec<A> = input
                    .actions
                    .iter()
                    .filter(|a| a.dimension() == name.as_str() && a.tier() == tier.as_str())
                    .cloned()
                    .collect();
                let score = score_by_name.get(name.as_str()).copied().unwrap_or(0.0);
                DimensionSummary {
                    name: name.clone(),
                    score,
                    percentage: to_percentage(score),
                    action_count: actions.len(),
                    actions,
                }
            })
            .collect()
    };

    ResponseSummary {
        respondent_count: input.respondent_count,
        average_score: input.average_score,
        average_percentage: to_percentage(input.average_score),
        minimum_threshold: input.minimum_threshold,
        threshold_percentage: to_percentage(input.minimum_threshold),
        critical: summarize(Tier::Critical, &input.tiers.critical),
        at_risk: summarize(Tier::AtRisk, &input.tiers.at_risk),
        strong: summarize(Tier::Strong, &input.tiers.strong),
    }
}
