use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::fact::{Entity, Fact, FactKind, Position, Value};

/// Default capacity of a live agent's long-term memory.
pub const DEFAULT_MEMORY_CAPACITY: usize = 20;

/// Everything an agent currently believes: an ordered set of [`Fact`]s.
///
/// Insertion rules:
/// - exact duplicates collapse (re-adding refreshes recency);
/// - a `Datum` supersedes an earlier `Datum` with the same name — named
///   values are single-valued;
/// - a `Position` supersedes an earlier `Position` for the same entity — a
///   position is a *last-known* location;
/// - `Time` facts are dropped outright, so periodic clock notifications can
///   never grow memory;
/// - at capacity, the least-recently-added fact is evicted first.
///
/// A `WorldState` is owned by exactly one agent or one search node. Search
/// nodes derive theirs with [`WorldState::snapshot`], a deep copy that drops
/// the capacity bound so hypothetical effects never evict real beliefs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WorldState {
    facts: VecDeque<Fact>,
    capacity: Option<usize>,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldState {
    /// An unbounded store, suitable for tests and search snapshots.
    pub fn new() -> Self {
        Self {
            facts: VecDeque::new(),
            capacity: None,
        }
    }

    /// A bounded store that evicts its oldest fact once `capacity` is
    /// reached. Agents use [`DEFAULT_MEMORY_CAPACITY`].
    pub fn bounded(capacity: usize) -> Self {
        Self {
            facts: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Insert a fact, applying the supersede/dedup/eviction rules above.
    pub fn add(&mut self, fact: Fact) {
        match fact {
            Fact::Time { .. } => return,
            Fact::Datum { name, .. } => {
                self.facts
                    .retain(|f| !matches!(f, Fact::Datum { name: n, .. } if *n == name));
            }
            Fact::Position { entity, .. } => {
                self.facts
                    .retain(|f| !matches!(f, Fact::Position { entity: e, .. } if *e == entity));
            }
        }

        if let Some(cap) = self.capacity {
            while self.facts.len() >= cap.max(1) {
                self.facts.pop_front();
            }
        }
        self.facts.push_back(fact);
    }

    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    /// All facts, oldest first.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Facts of one kind, oldest first.
    pub fn of_kind(&self, kind: FactKind) -> impl Iterator<Item = &Fact> {
        self.facts.iter().filter(move |f| f.kind() == kind)
    }

    /// Facts satisfying an arbitrary predicate, oldest first.
    pub fn matching<'a, P>(&'a self, pred: P) -> impl Iterator<Item = &'a Fact>
    where
        P: Fn(&Fact) -> bool + 'a,
    {
        self.facts.iter().filter(move |f| pred(f))
    }

    /// The value of a named datum, if any. At most one datum per name exists.
    pub fn value_of(&self, name: &str) -> Option<Value> {
        self.facts.iter().find_map(|f| match f {
            Fact::Datum { name: n, value } if *n == name => Some(*value),
            _ => None,
        })
    }

    /// An entity's last-known position, if any.
    pub fn position_of(&self, entity: Entity) -> Option<Position> {
        self.facts.iter().find_map(|f| match f {
            Fact::Position {
                entity: e,
                position,
            } if *e == entity => Some(*position),
            _ => None,
        })
    }

    /// Deep, exclusively-owned copy for a search node. Lossless: the copy is
    /// unbounded, so applying hypothetical effects cannot evict inherited
    /// beliefs.
    pub fn snapshot(&self) -> WorldState {
        WorldState {
            facts: self.facts.clone(),
            capacity: None,
        }
    }
}

impl FromIterator<Fact> for WorldState {
    fn from_iter<T: IntoIterator<Item = Fact>>(iter: T) -> Self {
        let mut state = WorldState::new();
        for fact in iter {
            state.add(fact);
        }
        state
    }
}
