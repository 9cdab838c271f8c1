//! Milestone-based activation gate.

use crate::ports::ActivationGate;
use std::collections::HashSet;

/// Set of milestones enabled on the network.
#[derive(Debug, Clone, Default)]
pub struct MilestoneGate {
    active: HashSet<String>,
}

impl MilestoneGate {
    pub fn new<I, S>(milestones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active: milestones.into_iter().map(Into::into).collect(),
        }
    }

    pub fn activate(&mut self, milestone: impl Into<String>) {
        self.active.insert(milestone.into());
    }
}

impl ActivationGate for MilestoneGate {
    fn is_milestone_active(&self, milestone: &str) -> bool {
        self.active.contains(milestone)
    }
}
