use std::collections::VecDeque;

use volition_core::{
    ActionCandidate, ActionStatus, ActionTemplate, Entity, Fact, Goal, StepFactory, TemplateId,
    WorldState, DEFAULT_MEMORY_CAPACITY,
};
use volition_plan::{Arbiter, ArbitrationError, Planner};
use volition_tools::{NullTraceSink, TraceEvent, TraceLog, TraceSink};

use crate::runtime::StepRuntime;

/// The always-available fallback action. A [`StepFactory`] handed to
/// [`Agent::tick`] must be able to build a step for it.
pub const IDLE: TemplateId = TemplateId("idle");

/// A perception filter: may rewrite an incoming fact, or drop it by
/// returning `None`. Useful for simulating errors in judgement.
pub type PerceptFilter = fn(Fact) -> Option<Fact>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentConfig {
    pub memory_capacity: usize,
    /// Consecutive idle ticks after which invalidated goals are given
    /// another chance.
    pub idle_timeout: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
            idle_timeout: 5,
        }
    }
}

/// Orchestrates one autonomous agent: receive facts, arbitrate goals, plan,
/// and step through the winning plan.
///
/// Every failure mode (no goals, no templates, nothing plannable) is
/// recovered here: the agent records the error, idles, and retries after new
/// facts arrive or the idle timeout elapses. Nothing propagates out of a
/// decision cycle.
pub struct Agent<E> {
    entity: Entity,
    config: AgentConfig,
    memory: WorldState,
    goals: Vec<Goal>,
    templates: Vec<Box<dyn ActionTemplate<E>>>,
    filters: Vec<PerceptFilter>,
    planner: Planner,
    arbiter: Arbiter,
    queue: VecDeque<ActionCandidate>,
    current_goal: Option<usize>,
    runtime: StepRuntime<E>,
    idle_ticks: u32,
    last_error: Option<ArbitrationError>,
    trace: Option<TraceLog>,
}

impl<E: 'static> Agent<E> {
    pub fn new(entity: Entity) -> Self {
        let config = AgentConfig::default();
        Self {
            entity,
            memory: WorldState::bounded(config.memory_capacity),
            config,
            goals: Vec::new(),
            templates: Vec::new(),
            filters: Vec::new(),
            planner: Planner::new(),
            arbiter: Arbiter::new(),
            queue: VecDeque::new(),
            current_goal: None,
            runtime: StepRuntime::new(),
            idle_ticks: 0,
            last_error: None,
            trace: None,
        }
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self.memory = WorldState::bounded(config.memory_capacity);
        self
    }

    pub fn with_planner(mut self, planner: Planner) -> Self {
        self.planner = planner;
        self
    }

    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    pub fn add_template(&mut self, template: Box<dyn ActionTemplate<E>>) {
        self.templates.push(template);
    }

    pub fn add_filter(&mut self, filter: PerceptFilter) {
        self.filters.push(filter);
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn memory(&self) -> &WorldState {
        &self.memory
    }

    pub fn current_goal(&self) -> Option<usize> {
        self.current_goal
    }

    pub fn pending_steps(&self) -> usize {
        self.queue.len()
    }

    /// The most recent arbitration failure, if the agent is idling on one.
    pub fn last_error(&self) -> Option<ArbitrationError> {
        self.last_error
    }

    /// Start collecting trace events in an owned log.
    pub fn enable_trace(&mut self) {
        if self.trace.is_none() {
            self.trace = Some(TraceLog::default());
        }
    }

    pub fn trace(&self) -> Option<&TraceLog> {
        self.trace.as_ref()
    }

    /// Receive one fact from the environment.
    ///
    /// The fact passes through the perception filters, lands in memory, and
    /// revalidates previously unplannable goals: new information may have
    /// made them satisfiable.
    pub fn observe(&mut self, fact: Fact) {
        let mut fact = fact;
        for filter in &self.filters {
            match filter(fact) {
                Some(next) => fact = next,
                None => return,
            }
        }
        self.memory.add(fact);
        self.arbiter.revalidate_all();
    }

    /// One decision/execution cycle: ensure a step is running (arbitrating
    /// and planning if the queue is empty), tick it, and on success feed its
    /// effects back into memory.
    pub fn tick<F: StepFactory<E>>(&mut self, env: &mut E, factory: &F) {
        if self.runtime.is_idle() {
            let candidate = self
                .next_candidate(env)
                .unwrap_or_else(|| ActionCandidate::new(IDLE));
            let step = factory.build(&candidate, env);
            self.runtime.start(candidate, step, env);
        }

        if let Some((candidate, status)) = self.runtime.tick(env) {
            match status {
                ActionStatus::Success => {
                    candidate.apply(&mut self.memory);
                    if self.queue.is_empty() {
                        self.current_goal = None;
                    }
                }
                ActionStatus::Failure => {
                    // A failed step invalidates the rest of the plan, not
                    // the goal; the next cycle replans from current memory.
                    self.queue.clear();
                    self.current_goal = None;
                }
                ActionStatus::Running => {}
            }
        }
    }

    fn next_candidate(&mut self, env: &E) -> Option<ActionCandidate> {
        if let Some(candidate) = self.queue.pop_front() {
            self.idle_ticks = 0;
            return Some(candidate);
        }

        let mut null = NullTraceSink;
        let sink: &mut dyn TraceSink = match self.trace.as_mut() {
            Some(log) => log,
            None => &mut null,
        };

        match self.arbiter.select_traced(
            &self.planner,
            self.entity,
            env,
            &self.templates,
            &self.goals,
            &self.memory,
            sink,
        ) {
            Ok(selection) => {
                sink.emit(
                    TraceEvent::new("agent.plan")
                        .with_a(selection.goal as u64)
                        .with_b(selection.plan.len() as u64),
                );
                self.current_goal = Some(selection.goal);
                self.queue = selection.plan.into_steps().into();
                self.last_error = None;
                self.idle_ticks = 0;
                self.queue.pop_front()
            }
            Err(error) => {
                sink.emit(TraceEvent::new("agent.idle").with_a(self.idle_ticks as u64));
                self.last_error = Some(error);
                self.idle_ticks += 1;
                if self.idle_ticks >= self.config.idle_timeout {
                    self.arbiter.revalidate_all();
                    self.idle_ticks = 0;
                }
                None
            }
        }
    }
}
