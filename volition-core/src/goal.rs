#[cfg(feature = "serde")]
use serde::Serialize;

use crate::expr::{Assignment, Comparison, ExprError};
use crate::fact::{Fact, Value};
use crate::memory::WorldState;

/// What a goal asserts about the world.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Condition {
    /// An exact fact is present.
    Fact(Fact),
    /// A comparison over named values holds.
    Compare(Comparison),
    /// A named value equals the result of an expression; the effect form.
    Assign(Assignment),
    /// Trivially satisfied.
    Always,
    /// Never satisfied.
    Never,
}

/// A testable condition with an "as-satisfied" projection and a relevancy
/// weight.
///
/// Goals are immutable value objects. The same goal serves as a planning
/// target (via [`Goal::test`]), as an action effect (via [`Goal::touch`]),
/// and as an arbitration candidate (via [`Goal::relevancy`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Goal {
    condition: Condition,
    weight: f32,
}

impl Goal {
    pub fn fact(fact: Fact) -> Self {
        Self {
            condition: Condition::Fact(fact),
            weight: 1.0,
        }
    }

    /// A true named flag: `Goal::flag("is_drunk")` matches `is_drunk = true`.
    pub fn flag(name: &'static str) -> Self {
        Self::fact(Fact::flag(name))
    }

    /// A comparison goal, e.g. `Goal::compare("money >= 100")`.
    pub fn compare(src: &'static str) -> Result<Self, ExprError> {
        Ok(Self {
            condition: Condition::Compare(Comparison::parse(src)?),
            weight: 1.0,
        })
    }

    /// An assignment effect, e.g. `Goal::assign("money = money + 5")`.
    pub fn assign(src: &'static str) -> Result<Self, ExprError> {
        Ok(Self {
            condition: Condition::Assign(Assignment::parse(src)?),
            weight: 1.0,
        })
    }

    pub fn always() -> Self {
        Self {
            condition: Condition::Always,
            weight: 1.0,
        }
    }

    pub fn never() -> Self {
        Self {
            condition: Condition::Never,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Satisfaction in `[0, 1]`: 1.0 fully satisfied, fractional values for
    /// greater-style comparisons, 0.0 otherwise.
    pub fn test(&self, state: &WorldState) -> f32 {
        match &self.condition {
            Condition::Fact(fact) => {
                if state.contains(fact) {
                    1.0
                } else {
                    0.0
                }
            }
            Condition::Compare(cmp) => cmp.score(state),
            Condition::Assign(asg) => match state.value_of(asg.name()) {
                Some(Value::Num(n)) if n == asg.value() => 1.0,
                _ => 0.0,
            },
            Condition::Always => 1.0,
            Condition::Never => 0.0,
        }
    }

    /// Project the state as if this goal were just achieved.
    ///
    /// Idempotent: touching twice yields the same fact set as touching once.
    /// Comparison goals assert nothing concrete and touch as a no-op.
    pub fn touch(&self, state: &mut WorldState) {
        match &self.condition {
            Condition::Fact(fact) => state.add(*fact),
            Condition::Assign(asg) => state.add(Fact::datum(asg.name(), asg.value())),
            Condition::Compare(_) | Condition::Always | Condition::Never => {}
        }
    }

    /// Arbitration priority: satisfied goals score near zero, unsatisfied
    /// goals score up to `weight`. Never used for planner termination.
    pub fn relevancy(&self, state: &WorldState) -> f32 {
        self.weight * (1.0 - self.test(state))
    }
}
