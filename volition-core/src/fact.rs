#[cfg(feature = "serde")]
use serde::Serialize;

/// Stable identifier for anything an agent can hold a belief about: agents,
/// items, and containers (maps, rooms, inventories) alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Entity(pub u64);

/// A location: which container an entity is in, and where inside it.
///
/// "Carried by X" is a position too: `container` is the holder and the
/// coordinate is zeroed. This keeps inventory queries and spatial queries on
/// the same fact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Position {
    pub container: Entity,
    pub coord: (i32, i32),
}

impl Position {
    pub fn at(container: Entity, x: i32, y: i32) -> Self {
        Self {
            container,
            coord: (x, y),
        }
    }

    /// The position of something held by `owner`.
    pub fn carried(owner: Entity) -> Self {
        Self {
            container: owner,
            coord: (0, 0),
        }
    }
}

/// Payload of a named datum fact.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Value {
    Flag(bool),
    Num(f64),
}

impl Value {
    pub fn as_num(self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(n),
            Value::Flag(_) => None,
        }
    }

    pub fn as_flag(self) -> Option<bool> {
        match self {
            Value::Flag(b) => Some(b),
            Value::Num(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Flag(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Num(value)
    }
}

/// One immutable belief about the world.
///
/// Facts are compared structurally: two facts with the same variant and
/// payload are the same fact, which is what gives [`crate::WorldState`] its
/// set semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Fact {
    /// An entity's last-known location.
    Position { entity: Entity, position: Position },
    /// An arbitrary named scalar, e.g. a counter or flag.
    Datum { name: &'static str, value: Value },
    /// Simulation time. Never stored in memory; see `WorldState::add`.
    Time { time: u64 },
}

impl Fact {
    pub fn position(entity: Entity, position: Position) -> Self {
        Fact::Position { entity, position }
    }

    pub fn datum(name: &'static str, value: impl Into<Value>) -> Self {
        Fact::Datum {
            name,
            value: value.into(),
        }
    }

    /// A true named flag, the common "something happened" belief.
    pub fn flag(name: &'static str) -> Self {
        Fact::Datum {
            name,
            value: Value::Flag(true),
        }
    }

    pub fn time(time: u64) -> Self {
        Fact::Time { time }
    }

    pub fn kind(&self) -> FactKind {
        match self {
            Fact::Position { .. } => FactKind::Position,
            Fact::Datum { .. } => FactKind::Datum,
            Fact::Time { .. } => FactKind::Time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FactKind {
    Position,
    Datum,
    Time,
}
