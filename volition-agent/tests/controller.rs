use volition_agent::{Agent, AgentConfig, MoveTemplate, PickupTemplate, IDLE};
use volition_core::{
    ActionCandidate, ActionStatus, ActionTemplate, Entity, Fact, Goal, Position, StepAction,
    StepFactory, TemplateId, Terrain, WorldState,
};
use volition_plan::ArbitrationError;

const AGENT: Entity = Entity(1);
const MAP: Entity = Entity(0);
const RUM: Entity = Entity(9);

/// Toy environment: a handful of walkable spots plus an execution log.
#[derive(Default)]
struct Cove {
    spots: Vec<Position>,
    log: Vec<&'static str>,
}

impl Terrain for Cove {
    fn reachable(&self, _from: Position, _radius: u32) -> Vec<Position> {
        self.spots.clone()
    }

    fn path_cost(&self, _from: Position, _to: Position) -> Option<u32> {
        Some(1)
    }
}

struct LogStep {
    name: &'static str,
    fail: bool,
}

impl StepAction<Cove> for LogStep {
    fn tick(&mut self, env: &mut Cove) -> ActionStatus {
        env.log.push(self.name);
        if self.fail {
            ActionStatus::Failure
        } else {
            ActionStatus::Success
        }
    }
}

/// Builds one-tick steps that log their template name; templates listed in
/// `fail_on` fail instead of succeeding.
#[derive(Default)]
struct ScriptedFactory {
    fail_on: Vec<&'static str>,
}

impl StepFactory<Cove> for ScriptedFactory {
    fn build(&self, candidate: &ActionCandidate, _env: &Cove) -> Box<dyn StepAction<Cove>> {
        Box::new(LogStep {
            name: candidate.template.0,
            fail: self.fail_on.contains(&candidate.template.0),
        })
    }
}

struct FlagTemplate {
    id: &'static str,
    flag: &'static str,
}

impl ActionTemplate<Cove> for FlagTemplate {
    fn id(&self) -> TemplateId {
        TemplateId(self.id)
    }

    fn candidates(&self, _agent: Entity, _env: &Cove, _state: &WorldState) -> Vec<ActionCandidate> {
        vec![ActionCandidate::new(self.id()).with_effect(Goal::flag(self.flag))]
    }
}

#[test]
fn plans_executes_and_feeds_effects_back() {
    let mut agent = Agent::new(AGENT);
    agent.add_goal(Goal::flag("is_drunk"));
    agent.add_template(Box::new(FlagTemplate {
        id: "drink",
        flag: "is_drunk",
    }));

    let mut env = Cove::default();
    let factory = ScriptedFactory::default();

    agent.tick(&mut env, &factory);

    assert_eq!(env.log, vec!["drink"]);
    assert!(agent.memory().contains(&Fact::flag("is_drunk")));
    assert_eq!(agent.current_goal(), None);
}

#[test]
fn most_relevant_goal_is_pursued_first() {
    let mut agent = Agent::new(AGENT);
    agent.add_goal(Goal::flag("is_drunk").with_weight(1.0));
    agent.add_goal(Goal::flag("is_idle").with_weight(0.1));
    agent.add_template(Box::new(FlagTemplate {
        id: "drink",
        flag: "is_drunk",
    }));
    agent.add_template(Box::new(FlagTemplate {
        id: "loiter",
        flag: "is_idle",
    }));

    let mut env = Cove::default();
    agent.tick(&mut env, &ScriptedFactory::default());

    assert_eq!(env.log, vec!["drink"]);
}

#[test]
fn satisfied_agent_falls_back_to_idle() {
    let mut agent = Agent::new(AGENT);
    agent.add_goal(Goal::flag("is_drunk"));
    agent.add_template(Box::new(FlagTemplate {
        id: "drink",
        flag: "is_drunk",
    }));

    let mut env = Cove::default();
    let factory = ScriptedFactory::default();
    agent.tick(&mut env, &factory);
    agent.tick(&mut env, &factory);

    assert_eq!(env.log, vec!["drink", IDLE.0]);
    assert_eq!(agent.last_error(), Some(ArbitrationError::Exhausted));
}

#[test]
fn empty_goal_pool_is_reported_and_idles() {
    let mut agent: Agent<Cove> = Agent::new(AGENT);
    agent.add_template(Box::new(FlagTemplate {
        id: "drink",
        flag: "is_drunk",
    }));

    let mut env = Cove::default();
    agent.tick(&mut env, &ScriptedFactory::default());

    assert_eq!(env.log, vec![IDLE.0]);
    assert_eq!(agent.last_error(), Some(ArbitrationError::EmptyGoalPool));
}

#[test]
fn failed_step_drops_the_rest_of_the_plan() {
    // "drink" only opens up after rum is fetched, so the plan is two steps;
    // the first step failing must discard the second.
    struct Gated;
    impl ActionTemplate<Cove> for Gated {
        fn id(&self) -> TemplateId {
            TemplateId("drink")
        }
        fn candidates(&self, _: Entity, _: &Cove, state: &WorldState) -> Vec<ActionCandidate> {
            if !state.contains(&Fact::flag("has_rum")) {
                return Vec::new();
            }
            vec![ActionCandidate::new(TemplateId("drink")).with_effect(Goal::flag("is_drunk"))]
        }
    }

    let mut agent = Agent::new(AGENT);
    agent.add_goal(Goal::flag("is_drunk"));
    agent.add_template(Box::new(FlagTemplate {
        id: "fetch_rum",
        flag: "has_rum",
    }));
    agent.add_template(Box::new(Gated));

    let mut env = Cove::default();
    let factory = ScriptedFactory {
        fail_on: vec!["fetch_rum"],
    };

    agent.tick(&mut env, &factory);

    assert_eq!(env.log, vec!["fetch_rum"]);
    assert_eq!(agent.pending_steps(), 0);
    assert_eq!(agent.current_goal(), None);
    assert!(!agent.memory().contains(&Fact::flag("has_rum")));
}

#[test]
fn new_facts_revalidate_unplannable_goals() {
    let mut agent = Agent::new(AGENT);
    agent.add_goal(Goal::fact(Fact::position(RUM, Position::carried(AGENT))));
    agent.add_template(Box::new(PickupTemplate::new()));

    let mut env = Cove::default();
    let factory = ScriptedFactory::default();

    // Nothing is known yet: pickup generates no candidates, the goal is
    // invalidated, the agent idles.
    agent.tick(&mut env, &factory);
    assert_eq!(env.log, vec![IDLE.0]);
    assert_eq!(agent.last_error(), Some(ArbitrationError::Exhausted));

    // Seeing the rum at the agent's own position makes the goal plannable.
    let spot = Position::at(MAP, 3, 3);
    agent.observe(Fact::position(AGENT, spot));
    agent.observe(Fact::position(RUM, spot));

    agent.tick(&mut env, &factory);
    assert_eq!(env.log, vec![IDLE.0, "pickup"]);
    assert!(agent
        .memory()
        .contains(&Fact::position(RUM, Position::carried(AGENT))));
}

#[test]
fn idle_timeout_revalidates_goals() {
    let mut agent = Agent::new(AGENT).with_config(AgentConfig {
        memory_capacity: 20,
        idle_timeout: 2,
    });
    agent.enable_trace();
    agent.add_goal(Goal::flag("has_wings"));
    agent.add_template(Box::new(FlagTemplate {
        id: "loiter",
        flag: "is_idle",
    }));

    let mut env = Cove::default();
    let factory = ScriptedFactory::default();

    // Tick 1 tries and invalidates the goal; tick 2 skips it (still
    // invalid) and trips the timeout; tick 3 tries it again.
    agent.tick(&mut env, &factory);
    agent.tick(&mut env, &factory);
    agent.tick(&mut env, &factory);

    let tries = agent
        .trace()
        .expect("trace")
        .events
        .iter()
        .filter(|e| e.tag == "arbiter.try")
        .count();
    assert_eq!(tries, 2);
}

#[test]
fn perception_filters_can_drop_facts() {
    fn drop_datums(fact: Fact) -> Option<Fact> {
        match fact {
            Fact::Datum { .. } => None,
            other => Some(other),
        }
    }

    let mut agent: Agent<Cove> = Agent::new(AGENT);
    agent.add_filter(drop_datums);

    agent.observe(Fact::flag("rumor"));
    assert!(agent.memory().is_empty());

    agent.observe(Fact::position(RUM, Position::at(MAP, 1, 1)));
    assert_eq!(agent.memory().len(), 1);
}

#[test]
fn move_template_walks_the_agent_over_terrain() {
    let start = Position::at(MAP, 0, 0);
    let target = Position::at(MAP, 4, 0);

    let mut agent = Agent::new(AGENT);
    agent.add_goal(Goal::fact(Fact::position(AGENT, target)));
    agent.add_template(Box::new(MoveTemplate::new(10)));
    agent.observe(Fact::position(AGENT, start));

    let mut env = Cove {
        spots: vec![start, Position::at(MAP, 2, 0), target],
        log: Vec::new(),
    };

    agent.tick(&mut env, &ScriptedFactory::default());

    assert_eq!(env.log, vec!["move"]);
    assert_eq!(agent.memory().position_of(AGENT), Some(target));
}
