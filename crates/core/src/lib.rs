//! Memberwise constructor synthesis for Rust structs.
//!
//! # Overview
//!
//! Given a struct and a small set of directives, this crate generates a `new`
//! constructor taking one parameter per member that still needs a value, in
//! declaration order. Members declared with the `_` placeholder type get their
//! type inferred from their initializer literal.
//!
//! # Key Features
//!
//! - Literal type inference (`[1, None]` is a `Vec<Option<i32>>`)
//! - Excluded members and initialized constants are assigned their initializer
//! - Per-parameter default values
//! - Access level checks against the host type
//!
//! # Quick Start
//!
//! ```rust
//! use memberwise_core::prelude::*;
//! use quote::quote;
//!
//! let plan = plan(
//!     quote!(exclude = ["retries"]),
//!     quote! {
//!         pub struct Client {
//!             host: String,
//!             #[member(init = 3)]
//!             retries: _,
//!         }
//!     },
//! ).expect("analysis failed");
//!
//! assert_eq!(plan.describe(), "pub fn new(host: String)");
//! ```

pub mod analyzer;
pub mod prelude;
pub mod synthesizer;
pub mod tokens;

use analyzer::error::MemberwiseResult;
use proc_macro2::TokenStream;
use synthesizer::ConstructorPlan;

/// Builds the constructor plan for `item` without emitting code.
pub fn plan(args: TokenStream, item: TokenStream) -> MemberwiseResult<ConstructorPlan> {
    let analysis = analyzer::analyze(args, item)?;
    Ok(ConstructorPlan::new(
        &analysis.classification,
        analysis.directives.access,
    ))
}

/// Expands `#[memberwise_init(args)] item` into the rewritten item and its
/// constructor.
pub fn expand(args: TokenStream, item: TokenStream) -> MemberwiseResult<TokenStream> {
    let analysis = analyzer::analyze(args, item)?;
    let plan = ConstructorPlan::new(&analysis.classification, analysis.directives.access);
    synthesizer::emit(&analysis.host, &analysis.classification, &plan)
}
