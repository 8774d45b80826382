//! Deterministic best-first planner and goal arbitration over fact memory.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod arbiter;
pub mod planner;

pub use arbiter::{Arbiter, ArbitrationError, Selection};
pub use planner::{Heuristic, PlanError, Planner, PlannerConfig};
