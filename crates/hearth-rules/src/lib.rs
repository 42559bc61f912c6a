//! Decision-and-policy engine for the Hearth controller.
//!
//! Three stages gate every device mutation:
//!
//! - the [`DecisionEngine`] evaluates rules over the current snapshot and a
//!   bounded trend memory, arbitrating against manual-override locks;
//! - the [`PolicyValidator`] checks the proposed action against safety
//!   rules, the energy budget, and the anti-oscillation guard;
//! - the [`reflect`] generator narrates the energy trade-off after the fact.

pub mod engine;
pub mod policy;
pub mod reflection;
pub mod trend;

pub use engine::DecisionEngine;
pub use policy::{PolicyState, PolicyValidator};
pub use reflection::reflect;
pub use trend::{SampleWindow, TrendMemory};
