#[cfg(feature = "serde")]
use serde::Serialize;

use crate::action::ActionCandidate;

/// The planner's output: an ordered action sequence in start-to-goal order,
/// plus its accumulated path cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Plan {
    steps: Vec<ActionCandidate>,
    cost: u32,
}

impl Plan {
    pub fn new(steps: Vec<ActionCandidate>, cost: u32) -> Self {
        Self { steps, cost }
    }

    pub fn empty() -> Self {
        Self {
            steps: Vec::new(),
            cost: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn steps(&self) -> &[ActionCandidate] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<ActionCandidate> {
        self.steps
    }
}
