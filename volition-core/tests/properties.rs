use proptest::prelude::*;

use volition_core::{Fact, Goal, WorldState};

const NAMES: [&str; 6] = ["money", "rum", "hp", "is_idle", "is_drunk", "charisma"];

fn arb_fact() -> impl Strategy<Value = Fact> {
    prop_oneof![
        (0..NAMES.len(), any::<bool>()).prop_map(|(i, b)| Fact::datum(NAMES[i], b)),
        (0..NAMES.len(), -100.0f64..100.0).prop_map(|(i, n)| Fact::datum(NAMES[i], n)),
    ]
}

proptest! {
    #[test]
    fn touch_is_idempotent_for_any_fact_goal(fact in arb_fact(), seed in prop::collection::vec(arb_fact(), 0..12)) {
        let goal = Goal::fact(fact);
        let mut once: WorldState = seed.into_iter().collect();
        goal.touch(&mut once);

        let mut twice = once.clone();
        goal.touch(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn bounded_store_never_exceeds_capacity(capacity in 1usize..8, facts in prop::collection::vec(arb_fact(), 0..40)) {
        let mut state = WorldState::bounded(capacity);
        for fact in facts {
            state.add(fact);
            prop_assert!(state.len() <= capacity);
        }
    }

    #[test]
    fn comparison_scores_stay_in_unit_range(money in -1000.0f64..1000.0, price in -1000.0f64..1000.0) {
        let goal = Goal::compare("money >= price").unwrap();
        let mut state = WorldState::new();
        state.add(Fact::datum("money", money));
        state.add(Fact::datum("price", price));

        let score = goal.test(&state);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn touched_goal_tests_fully_satisfied(fact in arb_fact()) {
        let goal = Goal::fact(fact);
        let mut state = WorldState::new();
        goal.touch(&mut state);
        prop_assert_eq!(goal.test(&state), 1.0);
    }
}
