use volition_core::{Entity, Fact, FactKind, Position, Value, WorldState};

#[test]
fn bounded_store_evicts_oldest_first() {
    let mut state = WorldState::bounded(2);
    state.add(Fact::flag("a"));
    state.add(Fact::flag("b"));
    state.add(Fact::flag("c"));

    assert_eq!(state.len(), 2);
    assert!(!state.contains(&Fact::flag("a")));
    assert!(state.contains(&Fact::flag("b")));
    assert!(state.contains(&Fact::flag("c")));
}

#[test]
fn capacity_is_exact_after_many_adds() {
    let mut state = WorldState::bounded(5);
    for time in 0..40u64 {
        state.add(Fact::position(
            Entity(time),
            Position::at(Entity(0), time as i32, 0),
        ));
    }
    assert_eq!(state.len(), 5);
    // The retained facts are the five most recently added.
    for entity in 35..40u64 {
        assert!(state.position_of(Entity(entity)).is_some());
    }
}

#[test]
fn time_facts_are_never_stored() {
    let mut state = WorldState::new();
    state.add(Fact::time(1));
    state.add(Fact::time(2));
    assert!(state.is_empty());
    assert_eq!(state.of_kind(FactKind::Time).count(), 0);
}

#[test]
fn duplicate_facts_collapse() {
    let mut state = WorldState::new();
    state.add(Fact::flag("seen"));
    state.add(Fact::flag("seen"));
    assert_eq!(state.len(), 1);
}

#[test]
fn datum_with_same_name_supersedes() {
    let mut state = WorldState::new();
    state.add(Fact::datum("money", 5.0));
    state.add(Fact::datum("money", 10.0));
    assert_eq!(state.len(), 1);
    assert_eq!(state.value_of("money"), Some(Value::Num(10.0)));
}

#[test]
fn position_is_last_known_location() {
    let map = Entity(0);
    let who = Entity(7);
    let mut state = WorldState::new();
    state.add(Fact::position(who, Position::at(map, 1, 1)));
    state.add(Fact::position(who, Position::at(map, 2, 2)));

    assert_eq!(state.position_of(who), Some(Position::at(map, 2, 2)));
    assert_eq!(state.of_kind(FactKind::Position).count(), 1);
}

#[test]
fn snapshot_is_deep_and_unbounded() {
    let mut state = WorldState::bounded(2);
    state.add(Fact::flag("a"));
    state.add(Fact::flag("b"));

    let mut snap = state.snapshot();
    assert_eq!(snap.capacity(), None);

    // Growing the snapshot never evicts inherited beliefs...
    snap.add(Fact::flag("c"));
    snap.add(Fact::flag("d"));
    assert_eq!(snap.len(), 4);

    // ...and never aliases the original.
    assert_eq!(state.len(), 2);
    assert!(!state.contains(&Fact::flag("c")));
}

#[test]
fn matching_iterates_lazily_and_restarts() {
    let mut state = WorldState::new();
    state.add(Fact::datum("x", 1.0));
    state.add(Fact::datum("y", 2.0));
    state.add(Fact::flag("done"));

    let numeric = |f: &Fact| matches!(f, Fact::Datum { value: Value::Num(_), .. });
    assert_eq!(state.matching(numeric).count(), 2);
    // Restartable: a fresh iterator sees the same facts again.
    assert_eq!(state.matching(numeric).count(), 2);
}
