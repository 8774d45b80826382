//! Typed fact memory, goals, and action primitives for agent planning.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod expr;
pub mod fact;
pub mod goal;
pub mod memory;
pub mod plan;
pub mod terrain;

pub use action::{
    ActionCandidate, ActionStatus, ActionTemplate, StepAction, StepFactory, TemplateId,
};
pub use expr::{ArithExpr, ArithOp, Assignment, CmpOp, Comparison, ExprError, Operand};
pub use fact::{Entity, Fact, FactKind, Position, Value};
pub use goal::{Condition, Goal};
pub use memory::{WorldState, DEFAULT_MEMORY_CAPACITY};
pub use plan::Plan;
pub use terrain::Terrain;
