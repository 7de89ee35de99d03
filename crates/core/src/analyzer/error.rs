use super::model::AccessLevel;
use proc_macro2::{Span, TokenStream};
use thiserror::Error;

/// Result type for constructor synthesis
pub type MemberwiseResult<T> = Result<T, MemberwiseError>;

/// Errors that abort the expansion of one host declaration
#[derive(Debug, Error)]
pub enum MemberwiseError {
    /// Malformed attribute or helper-attribute syntax
    #[error("{0}")]
    Syntax(#[from] syn::Error),

    /// The attribute was applied to something other than a struct with named fields
    #[error("#[memberwise_init] can only be applied to a struct with named fields")]
    InvalidType { span: Span },

    /// The host type is module-private
    #[error("#[memberwise_init] cannot be applied to a private type")]
    InvalidAccessLevel { span: Span },

    /// The requested constructor access exceeds the host type's own access
    #[error("cannot generate a {requested} constructor for a {host} type")]
    InvalidAccessLevelHierarchy {
        requested: AccessLevel,
        host: AccessLevel,
        span: Span,
    },

    /// A member needs a parameter but neither declares a type nor has an
    /// initializer whose type can be inferred
    #[error("cannot infer the type of `{member}`")]
    CannotInferType { member: String, span: Span },

    /// An excluded member has no initializer to fall back on
    #[error("cannot exclude `{member}`: it has no initial value")]
    ExcludingNonInitialisedProperty { member: String, span: Span },

    /// A directive key names no member of the host type
    #[error("no member named `{key}`")]
    InexistentKey { key: String, span: Span },

    /// A static member cannot become an associated function without a value
    #[error("static member `{member}` has no initial value")]
    MissingStaticValue { member: String, span: Span },
}

impl MemberwiseError {
    /// Location the diagnostic is attached to.
    pub fn span(&self) -> Span {
        match self {
            Self::Syntax(err) => err.span(),
            Self::InvalidType { span }
            | Self::InvalidAccessLevel { span }
            | Self::InvalidAccessLevelHierarchy { span, .. }
            | Self::CannotInferType { span, .. }
            | Self::ExcludingNonInitialisedProperty { span, .. }
            | Self::InexistentKey { span, .. }
            | Self::MissingStaticValue { span, .. } => *span,
        }
    }

    /// Renders the error as a `compile_error!` invocation at its span.
    pub fn to_compile_error(&self) -> TokenStream {
        match self {
            Self::Syntax(err) => err.to_compile_error(),
            other => syn::Error::new(other.span(), other.to_string()).to_compile_error(),
        }
    }

    pub fn report(&self) -> String {
        match self {
            Self::Syntax(err) => {
                format!(
                    "Invalid attribute syntax: {}\n\
                         Suggestion: Check the #[memberwise_init] and #[member] arguments.",
                    err
                )
            }
            Self::InvalidType { .. } => "Unsupported declaration kind\n\
                     Suggestion: Apply #[memberwise_init] to a struct with named fields."
                .to_string(),
            Self::InvalidAccessLevel { .. } => "Private host type\n\
                     Suggestion: Declare the type `pub` or `pub(crate)`."
                .to_string(),
            Self::InvalidAccessLevelHierarchy {
                requested, host, ..
            } => {
                format!(
                    "Cannot generate a {} constructor for a {} type\n\
                         Suggestion: Use `access = internal` or widen the type's visibility.",
                    requested, host
                )
            }
            Self::CannotInferType { member, .. } => {
                format!(
                    "Cannot infer the type of `{}`\n\
                         Suggestion: Replace `_` with an explicit type, or use a cast such as `init = 0 as u64`.",
                    member
                )
            }
            Self::ExcludingNonInitialisedProperty { member, .. } => {
                format!(
                    "Cannot exclude `{}` because it has no initial value\n\
                         Suggestion: Add #[member(init = ...)] or remove it from `exclude`.",
                    member
                )
            }
            Self::InexistentKey { key, .. } => {
                format!(
                    "No member named `{}`\n\
                         Suggestion: Check the spelling of the key in `exclude` or `defaults`.",
                    key
                )
            }
            Self::MissingStaticValue { member, .. } => {
                format!(
                    "Static member `{}` has no initial value\n\
                         Suggestion: Add #[member(init = ...)] to the static member.",
                    member
                )
            }
        }
    }

    pub fn cannot_infer_type(ident: &syn::Ident) -> Self {
        Self::CannotInferType {
            member: ident.to_string(),
            span: ident.span(),
        }
    }
}
