//! A pirate wanders a small island, finds the rum, picks it up, and drinks
//! until satisfied. Run with `cargo run -p volition-agent --example pirate`.

use volition_agent::{Agent, MoveTemplate, PickupTemplate};
use volition_core::{
    ActionCandidate, ActionStatus, ActionTemplate, Entity, Fact, Goal, Position, StepAction,
    StepFactory, TemplateId, Terrain, WorldState,
};

const PIRATE: Entity = Entity(1);
const RUM: Entity = Entity(2);
const ISLAND: Entity = Entity(0);

struct Island {
    spots: Vec<Position>,
}

impl Terrain for Island {
    fn reachable(&self, _from: Position, _radius: u32) -> Vec<Position> {
        self.spots.clone()
    }

    fn path_cost(&self, from: Position, to: Position) -> Option<u32> {
        let dx = (from.coord.0 - to.coord.0).unsigned_abs();
        let dy = (from.coord.1 - to.coord.1).unsigned_abs();
        Some(dx + dy)
    }
}

/// Drinking needs the rum in hand; the effect is a happy pirate.
struct DrinkRum;

impl ActionTemplate<Island> for DrinkRum {
    fn id(&self) -> TemplateId {
        TemplateId("drink_rum")
    }

    fn candidates(
        &self,
        agent: Entity,
        _env: &Island,
        state: &WorldState,
    ) -> Vec<ActionCandidate> {
        if state.position_of(RUM) != Some(Position::carried(agent)) {
            return Vec::new();
        }
        vec![ActionCandidate::new(self.id())
            .with_effect(Goal::flag("is_drunk"))
            .with_effect(Goal::assign("charisma = charisma + 10").expect("effect"))]
    }
}

struct Narrated {
    name: &'static str,
}

impl StepAction<Island> for Narrated {
    fn tick(&mut self, _env: &mut Island) -> ActionStatus {
        println!("the pirate does: {}", self.name);
        ActionStatus::Success
    }
}

struct NarratedFactory;

impl StepFactory<Island> for NarratedFactory {
    fn build(&self, candidate: &ActionCandidate, _env: &Island) -> Box<dyn StepAction<Island>> {
        Box::new(Narrated {
            name: candidate.template.0,
        })
    }
}

fn main() {
    let beach = Position::at(ISLAND, 0, 0);
    let cave = Position::at(ISLAND, 6, 2);
    let island = Island {
        spots: vec![beach, cave],
    };

    let mut pirate = Agent::new(PIRATE);
    pirate.enable_trace();
    pirate.add_goal(Goal::flag("is_drunk"));
    pirate.add_template(Box::new(MoveTemplate::new(10)));
    pirate.add_template(Box::new(PickupTemplate::new()));
    pirate.add_template(Box::new(DrinkRum));

    // What the pirate knows at dawn.
    pirate.observe(Fact::position(PIRATE, beach));
    pirate.observe(Fact::position(RUM, cave));

    let mut env = island;
    for _ in 0..6 {
        pirate.tick(&mut env, &NarratedFactory);
        if pirate.memory().contains(&Fact::flag("is_drunk")) {
            break;
        }
    }

    println!("drunk: {}", pirate.memory().contains(&Fact::flag("is_drunk")));
    if let Some(log) = pirate.trace() {
        for event in &log.events {
            println!("{} a={} b={}", event.tag, event.a, event.b);
        }
    }
}
