// model/mod.rs
//! Data model shared by the analysis passes.
//!
//! Everything here is built fresh for one host declaration and dropped once
//! its constructor has been emitted.

mod access;
mod macros;
mod member;
mod types;

pub use access::*;
pub use member::*;
pub use types::*;
