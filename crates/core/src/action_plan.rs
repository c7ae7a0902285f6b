//! Action-plan view: a survey's actions split into active and completed.

use serde::Serialize;

use crate::actions::{priority_weight, ActionRecord};

/// Actions partitioned for display.
///
/// `active` is ordered by priority (high first), `completed` by most recently
/// updated first.
#[derive(Debug, Clone, Serialize)]
pub struct ActionPlan<A> {
    pub active: Vec<A>,
    pub completed: Vec<A>,
}

impl<A> ActionPlan<A> {
    pub fn total(&self) -> usize {
        self.active.len() + self.completed.len()
    }
}

/// Partition and order actions. The input slice is left untouched.
///
/// Both sorts are stable, so equal-priority active actions keep their input
/// order.
pub fn build_action_plan<A>(actions: &[A]) -> ActionPlan<A>
where
    A: ActionRecord + Clone,
{
    let (mut completed, mut active): (Vec<A>, Vec<A>) =
        actions.iter().cloned().partition(|a| a.is_completed());

    active.sort_by_key(|a| std::cmp::Reverse(priority_weight(a.priority())));
    completed.sort_by_key(|a| std::cmp::Reverse(a.updated_at()));

    ActionPlan { active, completed }
}
