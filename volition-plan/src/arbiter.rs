use std::collections::BTreeSet;

use thiserror::Error;

use volition_core::{ActionTemplate, Entity, Goal, Plan, WorldState};
use volition_tools::{NullTraceSink, TraceEvent, TraceSink};

use crate::planner::Planner;

/// Arbitration failure, recoverable by the caller (typically by idling).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArbitrationError {
    #[error("agent has no goals to arbitrate")]
    EmptyGoalPool,
    #[error("agent has no action templates")]
    EmptyActionPool,
    #[error("no relevant goal produced a plan")]
    Exhausted,
}

/// A successfully arbitrated goal: its index in the agent's pool, and the
/// plan that satisfies it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub goal: usize,
    pub plan: Plan,
}

/// Ranks an agent's goal pool by relevancy and plans against candidates in
/// order until one succeeds.
///
/// Goals that fail to plan are invalidated for the rest of the current
/// decision cycle; [`Arbiter::revalidate_all`] clears the bookkeeping when
/// new facts arrive or an idle timeout elapses. Goals are identified by pool
/// index, since pools are immutable for the run.
#[derive(Debug, Default)]
pub struct Arbiter {
    invalid: BTreeSet<usize>,
}

impl Arbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self, goal: usize) {
        self.invalid.insert(goal);
    }

    pub fn is_invalid(&self, goal: usize) -> bool {
        self.invalid.contains(&goal)
    }

    /// Give every previously failed goal another chance.
    pub fn revalidate_all(&mut self) {
        self.invalid.clear();
    }

    /// Pick the most relevant satisfiable goal and plan for it.
    pub fn select<E: 'static>(
        &mut self,
        planner: &Planner,
        agent: Entity,
        env: &E,
        templates: &[Box<dyn ActionTemplate<E>>],
        goals: &[Goal],
        state: &WorldState,
    ) -> Result<Selection, ArbitrationError> {
        self.select_traced(
            planner,
            agent,
            env,
            templates,
            goals,
            state,
            &mut NullTraceSink,
        )
    }

    /// As [`Arbiter::select`], emitting trace events into `sink`.
    #[allow(clippy::too_many_arguments)]
    pub fn select_traced<E: 'static>(
        &mut self,
        planner: &Planner,
        agent: Entity,
        env: &E,
        templates: &[Box<dyn ActionTemplate<E>>],
        goals: &[Goal],
        state: &WorldState,
        sink: &mut dyn TraceSink,
    ) -> Result<Selection, ArbitrationError> {
        if goals.is_empty() {
            return Err(ArbitrationError::EmptyGoalPool);
        }
        if templates.is_empty() {
            return Err(ArbitrationError::EmptyActionPool);
        }

        let mut ranked: Vec<(usize, f32)> = goals
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.invalid.contains(idx))
            .map(|(idx, goal)| (idx, goal.relevancy(state)))
            .filter(|(_, relevancy)| *relevancy > 0.0)
            .collect();

        // Stable sort: equally relevant goals keep pool order.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(core::cmp::Ordering::Equal));

        for (idx, relevancy) in ranked {
            sink.emit(
                TraceEvent::new("arbiter.try")
                    .with_a(idx as u64)
                    .with_b((relevancy * 1000.0) as u64),
            );
            match planner.plan_traced(agent, env, templates, state, &goals[idx], sink) {
                Ok(plan) => {
                    sink.emit(
                        TraceEvent::new("arbiter.select")
                            .with_a(idx as u64)
                            .with_b(plan.len() as u64),
                    );
                    return Ok(Selection { goal: idx, plan });
                }
                Err(_) => {
                    sink.emit(TraceEvent::new("arbiter.invalidate").with_a(idx as u64));
                    self.invalid.insert(idx);
                }
            }
        }

        Err(ArbitrationError::Exhausted)
    }
}
