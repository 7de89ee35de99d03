//! Validator: host-level checks before classification and directive key
//! checks after it.

use super::directives::DirectiveSet;
use super::error::{MemberwiseError, MemberwiseResult};
use super::model::AccessLevel;
use std::collections::HashSet;
use syn::spanned::Spanned;
use syn::{Fields, Item, ItemStruct};

/// Accepts structs with named fields and unit structs.
pub fn host_kind(item: Item) -> MemberwiseResult<ItemStruct> {
    match item {
        Item::Struct(item) => match item.fields {
            Fields::Named(_) | Fields::Unit => Ok(item),
            Fields::Unnamed(_) => Err(MemberwiseError::InvalidType {
                span: item.ident.span(),
            }),
        },
        other => Err(MemberwiseError::InvalidType { span: other.span() }),
    }
}

/// Checks the host's own access level and that the requested constructor
/// access does not exceed it. Returns the host access level.
pub fn host_access(item: &ItemStruct, directives: &DirectiveSet) -> MemberwiseResult<AccessLevel> {
    let host = AccessLevel::of(&item.vis);
    if host == AccessLevel::Private {
        return Err(MemberwiseError::InvalidAccessLevel {
            span: item.ident.span(),
        });
    }

    if directives.access > host {
        return Err(MemberwiseError::InvalidAccessLevelHierarchy {
            requested: directives.access,
            host,
            span: directives.access_span,
        });
    }

    Ok(host)
}

/// Every `exclude` and `defaults` key must name a member.
pub fn directive_keys(known: &HashSet<String>, directives: &DirectiveSet) -> MemberwiseResult<()> {
    let excluded = directives.exclude.iter().map(|(key, span)| (key, *span));
    let defaulted = directives
        .defaults
        .iter()
        .map(|(key, default)| (key, default.span));

    for (key, span) in excluded.chain(defaulted) {
        if !known.contains(key) {
            return Err(MemberwiseError::InexistentKey {
                key: key.clone(),
                span,
            });
        }
    }
    Ok(())
}
