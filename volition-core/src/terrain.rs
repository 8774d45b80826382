use crate::fact::Position;

/// The spatial surface movement builders depend on from the host
/// environment. Implementations typically wrap a grid map plus its
/// pathfinder; this crate never queries space any other way.
pub trait Terrain {
    /// Positions the agent could occupy, starting from `from`, within
    /// `radius` worth of travel. Finite, and expected to be in a stable
    /// order for deterministic planning.
    fn reachable(&self, from: Position, radius: u32) -> Vec<Position>;

    /// Travel cost between two positions, `None` when unreachable.
    fn path_cost(&self, from: Position, to: Position) -> Option<u32>;
}
