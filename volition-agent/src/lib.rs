//! Agent controller glue: perception intake, goal arbitration, plan stepping.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod controller;
pub mod runtime;
pub mod templates;

pub use controller::{Agent, AgentConfig, PerceptFilter, IDLE};
pub use runtime::StepRuntime;
pub use templates::{MoveTemplate, PickupTemplate};
