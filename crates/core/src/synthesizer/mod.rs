//! Constructor Synthesizer.
//!
//! Turns a [`Classification`](crate::analyzer::classify::Classification) into
//! a [`ConstructorPlan`], renders it as source text, and emits the final item.
//! No validation happens here; every decision was made by the analyzer.

mod emit;
mod lower;
mod plan;

pub use emit::emit;
pub use lower::lower;
pub use plan::{ConstructorPlan, FieldInit, Parameter};
