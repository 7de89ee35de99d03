// analyzer/mod.rs
//! Analysis of one `#[memberwise_init]` invocation.
//!
//! # Architecture
//!
//! - [`directives`]: Directive Resolver, parses the attribute arguments
//! - [`context`]: the host declaration and its member records
//! - [`literal`] and [`infer`]: initializer literals and their types
//! - [`classify`]: decides the role of every member
//! - [`validate`]: host and directive-key checks
//! - [`error`]: the error taxonomy

pub mod classify;
pub mod context;
pub mod directives;
pub mod error;
pub mod infer;
pub mod literal;
pub mod model;
pub mod validate;

use classify::Classification;
use context::HostDecl;
use directives::DirectiveSet;
use error::MemberwiseResult;
use proc_macro2::TokenStream;

/// Everything known about one host declaration after analysis.
pub struct Analysis {
    pub directives: DirectiveSet,
    pub host: HostDecl,
    pub classification: Classification,
}

/// Analyzes the attribute arguments `args` and the annotated `item`.
///
/// # Errors
/// Returns the first of:
/// - malformed attribute syntax
/// - an unsupported declaration kind or a private host type
/// - a requested access level wider than the host's
/// - an excluded member without initializer, or a member whose type cannot be inferred
/// - a directive key that names no member
pub fn analyze(args: TokenStream, item: TokenStream) -> MemberwiseResult<Analysis> {
    let directives = directives::resolve(args)?;

    let item = validate::host_kind(syn::parse2(item)?)?;
    validate::host_access(&item, &directives)?;
    let host = HostDecl::new(item)?;

    let _span = tracing::debug_span!("classify", host = %host.name()).entered();
    let classification = classify::classify(&host.members, &directives)?;
    validate::directive_keys(&classification.known, &directives)?;

    Ok(Analysis {
        directives,
        host,
        classification,
    })
}
