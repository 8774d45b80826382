use criterion::{black_box, criterion_group, criterion_main, Criterion};

use volition_core::{ActionCandidate, ActionTemplate, Entity, Fact, Goal, TemplateId, WorldState};
use volition_plan::Planner;

const STAGES: [&str; 6] = ["scout", "gather", "craft", "haul", "trade", "feast"];

/// Each stage only opens up after the previous one, forcing a full-depth
/// search chain.
struct Stage {
    index: usize,
}

impl ActionTemplate<()> for Stage {
    fn id(&self) -> TemplateId {
        TemplateId(STAGES[self.index])
    }

    fn candidates(&self, _agent: Entity, _env: &(), state: &WorldState) -> Vec<ActionCandidate> {
        if self.index > 0 && !state.contains(&Fact::flag(STAGES[self.index - 1])) {
            return Vec::new();
        }
        vec![ActionCandidate::new(self.id()).with_effect(Goal::flag(STAGES[self.index]))]
    }
}

fn bench_planner(c: &mut Criterion) {
    let templates: Vec<Box<dyn ActionTemplate<()>>> = (0..STAGES.len())
        .map(|index| Box::new(Stage { index }) as Box<dyn ActionTemplate<()>>)
        .collect();
    let goal = Goal::flag(STAGES[STAGES.len() - 1]);
    let state = WorldState::new();
    let planner = Planner::new();

    c.bench_function("volition-plan/planner.plan(chain=6)", |b| {
        b.iter(|| {
            let plan = planner
                .plan(Entity(1), &(), &templates, &state, &goal)
                .expect("plan");
            black_box(plan.len());
        })
    });
}

criterion_group!(benches, bench_planner);
criterion_main!(benches);
