//! Directive Resolver: reads the `#[memberwise_init(...)]` arguments.
//!
//! Parsing is deliberately lenient about value *shapes*: a non-array
//! `exclude`, a non-map `defaults`, or non-string keys degrade to the empty
//! case instead of failing. Keys are only checked against real members later,
//! by the validator.

use super::error::MemberwiseResult;
use super::literal::LiteralExpr;
use super::model::AccessLevel;
use crate::tokens::source_text;
use indexmap::IndexMap;
use proc_macro2::{Span, TokenStream, TokenTree};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream, Parser};
use syn::punctuated::Punctuated;
use syn::{Ident, Token};

/// Parsed directives of one invocation.
#[derive(Clone, Debug)]
pub struct DirectiveSet {
    pub access: AccessLevel,
    pub access_span: Span,
    /// Member names to leave out of the constructor, with the span of each key.
    pub exclude: IndexMap<String, Span>,
    pub defaults: IndexMap<String, DefaultValue>,
}

impl Default for DirectiveSet {
    fn default() -> Self {
        Self {
            access: AccessLevel::Public,
            access_span: Span::call_site(),
            exclude: IndexMap::new(),
            defaults: IndexMap::new(),
        }
    }
}

/// A default value for one parameter.
#[derive(Clone, Debug)]
pub struct DefaultValue {
    /// The value as written, spliced into the constructor.
    pub raw: String,
    pub value: LiteralExpr,
    /// Span of the key naming the member.
    pub span: Span,
}

struct Directive {
    name: Ident,
    value: LiteralExpr,
}

impl Parse for Directive {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = input.call(Ident::parse_any)?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;
        Ok(Self { name, value })
    }
}

/// Parses the attribute argument list into a [`DirectiveSet`].
pub fn resolve(args: TokenStream) -> MemberwiseResult<DirectiveSet> {
    let parser = Punctuated::<Directive, Token![,]>::parse_terminated;
    let directives = parser.parse2(args)?;

    let mut set = DirectiveSet::default();
    for directive in directives {
        match directive.name.to_string().as_str() {
            "access" => {
                set.access = access_level(&directive.value);
                set.access_span = directive.name.span();
            }
            "exclude" => resolve_exclude(&directive.value, &mut set.exclude),
            "defaults" => resolve_defaults(&directive.value, &mut set.defaults),
            other => tracing::debug!(directive = other, "ignoring unknown directive"),
        }
    }

    tracing::debug!(
        access = %set.access,
        excluded = set.exclude.len(),
        defaults = set.defaults.len(),
        "resolved directives"
    );
    Ok(set)
}

/// The last identifier of the value decides: `internal`, `.internal`,
/// `Access::Internal` and `crate` request an internal constructor, anything
/// else a public one.
fn access_level(value: &LiteralExpr) -> AccessLevel {
    let last = value
        .to_token_stream()
        .into_iter()
        .filter_map(|tree| match tree {
            TokenTree::Ident(ident) => Some(ident.to_string()),
            _ => None,
        })
        .last();

    match last.as_deref() {
        Some("internal" | "Internal" | "crate") => AccessLevel::Internal,
        _ => AccessLevel::Public,
    }
}

fn resolve_exclude(value: &LiteralExpr, exclude: &mut IndexMap<String, Span>) {
    let LiteralExpr::Array(elements) = value else {
        tracing::debug!("`exclude` is not an array literal, ignoring it");
        return;
    };

    for element in elements {
        match element {
            LiteralExpr::Str(lit) => {
                exclude.entry(lit.value()).or_insert(lit.span());
            }
            other => tracing::debug!(
                element = %source_text(other),
                "skipping non-string `exclude` element"
            ),
        }
    }
}

fn resolve_defaults(value: &LiteralExpr, defaults: &mut IndexMap<String, DefaultValue>) {
    let LiteralExpr::Map(entries) = value else {
        tracing::debug!("`defaults` is not a map literal, ignoring it");
        return;
    };

    for (key, value) in entries {
        match key {
            LiteralExpr::Str(lit) => {
                defaults.insert(
                    lit.value(),
                    DefaultValue {
                        raw: source_text(value),
                        value: value.clone(),
                        span: lit.span(),
                    },
                );
            }
            other => tracing::debug!(
                key = %source_text(other),
                "skipping non-string `defaults` key"
            ),
        }
    }
}
