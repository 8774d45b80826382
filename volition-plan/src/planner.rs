use core::cmp::Ordering;
use std::collections::BinaryHeap;

use thiserror::Error;

use volition_core::{ActionCandidate, ActionTemplate, Entity, Goal, Plan, TemplateId, WorldState};
use volition_tools::{NullTraceSink, TraceEvent, TraceSink};

/// Planning failure, recoverable by the caller.
///
/// `BudgetExhausted` is distinct from `Unreachable` so runaway builders
/// (unbounded fan-out) can be diagnosed separately from genuinely
/// unsatisfiable goals.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    #[error("no action sequence reaches the goal")]
    Unreachable,
    #[error("search expanded {expanded} nodes without reaching the goal")]
    BudgetExhausted { expanded: usize },
}

/// Optional domain heuristic: an admissible estimate of remaining cost from
/// a state to the goal. Without one, search degrades to uniform-cost.
pub type Heuristic = fn(&WorldState, &Goal) -> u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Hard cap on node expansions per search, the cooperative bound on
    /// planning latency.
    pub max_expansions: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: 4096,
        }
    }
}

/// One node of the search tree: the action that produced it, its parent, the
/// accumulated cost, and an exclusively-owned state snapshot with this
/// node's effects applied. Nodes live in an arena and refer to parents by
/// index; sibling branches can never observe each other's state.
struct SearchNode {
    parent: Option<usize>,
    step: Option<ActionCandidate>,
    g: u32,
    h: u32,
    state: WorldState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    g: u32,
    tie: u64,
    node: usize,
}

impl OpenEntry {
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.g, self.tie)
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first search over (action, simulated-state) nodes.
///
/// The graph is implicit: which edges exist at a node depends on what its
/// simulated state lets the templates generate. There is no closed set —
/// state is node-local, so reaching a similar state by a different path is a
/// legitimately different node. A template already used on the path from the
/// root is skipped, which bounds plan length by the number of distinct
/// templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    config: PlannerConfig,
    heuristic: Option<Heuristic>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// Search for an action sequence taking `state` to one satisfying
    /// `goal`. Deterministic for fixed inputs and template order.
    pub fn plan<E: 'static>(
        &self,
        agent: Entity,
        env: &E,
        templates: &[Box<dyn ActionTemplate<E>>],
        state: &WorldState,
        goal: &Goal,
    ) -> Result<Plan, PlanError> {
        self.plan_traced(agent, env, templates, state, goal, &mut NullTraceSink)
    }

    /// As [`Planner::plan`], emitting trace events into `sink`.
    pub fn plan_traced<E: 'static>(
        &self,
        agent: Entity,
        env: &E,
        templates: &[Box<dyn ActionTemplate<E>>],
        state: &WorldState,
        goal: &Goal,
        sink: &mut dyn TraceSink,
    ) -> Result<Plan, PlanError> {
        sink.emit(
            TraceEvent::new("plan.call")
                .with_a(state.len() as u64)
                .with_b(templates.len() as u64),
        );

        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut open = BinaryHeap::<OpenEntry>::new();
        let mut tie: u64 = 0;

        // Synthetic start node: no action, a lossless copy of current state.
        nodes.push(SearchNode {
            parent: None,
            step: None,
            g: 0,
            h: self.estimate(state, goal),
            state: state.snapshot(),
        });
        open.push(OpenEntry {
            f: nodes[0].h,
            g: 0,
            tie,
            node: 0,
        });
        tie += 1;

        let mut expansions: usize = 0;

        while let Some(entry) = open.pop() {
            expansions += 1;
            if expansions > self.config.max_expansions {
                sink.emit(TraceEvent::new("plan.budget").with_a(self.config.max_expansions as u64));
                return Err(PlanError::BudgetExhausted {
                    expanded: self.config.max_expansions,
                });
            }

            let current = entry.node;

            // Partial satisfaction never terminates the search.
            if goal.test(&nodes[current].state) >= 1.0 {
                let plan = reconstruct(&nodes, current);
                sink.emit(
                    TraceEvent::new("plan.result")
                        .with_a(plan.len() as u64)
                        .with_b(plan.cost() as u64),
                );
                return Ok(plan);
            }

            for template in templates {
                if path_uses_template(&nodes, current, template.id()) {
                    continue;
                }

                for candidate in template.candidates(agent, env, &nodes[current].state) {
                    let mut child_state = nodes[current].state.snapshot();
                    candidate.apply(&mut child_state);

                    let g = nodes[current].g.saturating_add(candidate.cost);
                    let h = self.estimate(&child_state, goal);

                    nodes.push(SearchNode {
                        parent: Some(current),
                        step: Some(candidate),
                        g,
                        h,
                        state: child_state,
                    });
                    open.push(OpenEntry {
                        f: g.saturating_add(h),
                        g,
                        tie,
                        node: nodes.len() - 1,
                    });
                    tie += 1;
                }
            }
        }

        sink.emit(TraceEvent::new("plan.unreachable").with_a(expansions as u64));
        Err(PlanError::Unreachable)
    }

    fn estimate(&self, state: &WorldState, goal: &Goal) -> u32 {
        match self.heuristic {
            Some(h) => h(state, goal),
            None => 0,
        }
    }
}

/// Whether `template` was already applied on the path from the root to
/// `node`. One application per template per plan.
fn path_uses_template(nodes: &[SearchNode], mut node: usize, template: TemplateId) -> bool {
    loop {
        if let Some(step) = &nodes[node].step {
            if step.template == template {
                return true;
            }
        }
        match nodes[node].parent {
            Some(parent) => node = parent,
            None => return false,
        }
    }
}

/// Walk parent links goal-to-start, then reverse into execution order.
fn reconstruct(nodes: &[SearchNode], mut node: usize) -> Plan {
    let cost = nodes[node].g;
    let mut steps: Vec<ActionCandidate> = Vec::new();
    loop {
        if let Some(step) = &nodes[node].step {
            steps.push(step.clone());
        }
        match nodes[node].parent {
            Some(parent) => node = parent,
            None => break,
        }
    }
    steps.reverse();
    Plan::new(steps, cost)
}
