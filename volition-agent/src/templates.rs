//! Stock action templates usable by most agents.

use volition_core::{
    ActionCandidate, ActionTemplate, Entity, Fact, Goal, Position, TemplateId, Terrain, WorldState,
};

/// One candidate per position reachable within a travel radius.
///
/// Fan-out is capped: an unbounded position list would make the search
/// branching factor, and therefore termination, hostage to map size.
pub struct MoveTemplate {
    radius: u32,
    max_fanout: usize,
}

impl MoveTemplate {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            max_fanout: 32,
        }
    }

    pub fn with_fanout(mut self, max_fanout: usize) -> Self {
        self.max_fanout = max_fanout;
        self
    }
}

impl<E: Terrain> ActionTemplate<E> for MoveTemplate {
    fn id(&self) -> TemplateId {
        TemplateId("move")
    }

    fn candidates(&self, agent: Entity, env: &E, state: &WorldState) -> Vec<ActionCandidate> {
        let Some(from) = state.position_of(agent) else {
            return Vec::new();
        };
        env.reachable(from, self.radius)
            .into_iter()
            .filter(|destination| *destination != from)
            .take(self.max_fanout)
            .map(|destination| {
                ActionCandidate::new(<MoveTemplate as ActionTemplate<E>>::id(self))
                    .with_effect(Goal::fact(Fact::position(agent, destination)))
            })
            .collect()
    }
}

/// One candidate per remembered item at the agent's own position; the effect
/// re-homes the item into the agent's carry slot.
#[derive(Debug, Default)]
pub struct PickupTemplate;

impl PickupTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl<E> ActionTemplate<E> for PickupTemplate {
    fn id(&self) -> TemplateId {
        TemplateId("pickup")
    }

    fn candidates(&self, agent: Entity, _env: &E, state: &WorldState) -> Vec<ActionCandidate> {
        let Some(here) = state.position_of(agent) else {
            return Vec::new();
        };
        state
            .matching(|fact| {
                matches!(fact, Fact::Position { entity, position }
                    if *entity != agent && *position == here)
            })
            .filter_map(|fact| match fact {
                Fact::Position { entity, .. } => Some(*entity),
                _ => None,
            })
            .map(|item| {
                ActionCandidate::new(TemplateId("pickup"))
                    .with_effect(Goal::fact(Fact::position(item, Position::carried(agent))))
            })
            .collect()
    }
}
