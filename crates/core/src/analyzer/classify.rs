//! Member Classifier.
//!
//! Walks the members in declaration order and decides what each one becomes
//! in the generated code. Only [`Role::Parameter`] members appear in the
//! constructor signature; the other roles exist because a Rust struct literal
//! has to initialize every stored field, and static or computed members have
//! to be lifted out of storage.

use super::directives::{DefaultValue, DirectiveSet};
use super::error::{MemberwiseError, MemberwiseResult};
use super::infer::infer;
use super::model::{MemberRecord, Mutability, TypeDescriptor};
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub enum Role {
    /// Supplied by the caller.
    Parameter {
        ty: TypeDescriptor,
        default: Option<DefaultValue>,
    },
    /// Stored, but assigned from its own initializer.
    Initialized { ty: TypeDescriptor },
    /// Emitted as an associated function.
    Static { ty: TypeDescriptor },
    /// Emitted as a `&self` getter.
    Computed { ty: TypeDescriptor },
}

#[derive(Clone, Debug)]
pub struct ClassifiedMember {
    pub member: MemberRecord,
    pub role: Role,
}

#[derive(Debug, Default)]
pub struct Classification {
    /// Every member, in declaration order.
    pub members: Vec<ClassifiedMember>,
    /// Names of all members, whatever their role.
    pub known: HashSet<String>,
}

impl Classification {
    /// Members that require a constructor parameter, in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &ClassifiedMember> {
        self.members
            .iter()
            .filter(|classified| matches!(classified.role, Role::Parameter { .. }))
    }
}

pub fn classify(
    members: &[MemberRecord],
    directives: &DirectiveSet,
) -> MemberwiseResult<Classification> {
    let mut classification = Classification::default();

    for member in members {
        let name = member.name();
        classification.known.insert(name.clone());

        let role = if let Some(key_span) = directives.exclude.get(&name) {
            if !member.is_self_initializing() {
                return Err(MemberwiseError::ExcludingNonInitialisedProperty {
                    member: name,
                    span: *key_span,
                });
            }
            tracing::debug!(member = %name, "excluded");
            if member.modifiers.is_static {
                Role::Static {
                    ty: stored_type(member)?,
                }
            } else {
                Role::Initialized {
                    ty: stored_type(member)?,
                }
            }
        } else if member.modifiers.is_static {
            tracing::debug!(member = %name, "static member, not a parameter");
            if !member.is_self_initializing() {
                return Err(MemberwiseError::MissingStaticValue {
                    member: name,
                    span: member.ident.span(),
                });
            }
            Role::Static {
                ty: stored_type(member)?,
            }
        } else if member.mutability == Mutability::Constant && member.is_self_initializing() {
            tracing::debug!(member = %name, "initialized constant, not a parameter");
            Role::Initialized {
                ty: stored_type(member)?,
            }
        } else if member.modifiers.is_computed() {
            tracing::debug!(member = %name, "computed member, not a parameter");
            Role::Computed {
                ty: member
                    .explicit
                    .clone()
                    .ok_or_else(|| MemberwiseError::cannot_infer_type(&member.ident))?,
            }
        } else {
            let default = directives.defaults.get(&name).cloned();
            tracing::debug!(member = %name, defaulted = default.is_some(), "parameter");
            Role::Parameter {
                ty: stored_type(member)?,
                default,
            }
        };

        if !matches!(role, Role::Parameter { .. }) && directives.defaults.contains_key(&name) {
            tracing::debug!(member = %name, "default value ignored, member is not a parameter");
        }

        classification.members.push(ClassifiedMember {
            member: member.clone(),
            role,
        });
    }

    Ok(classification)
}

/// The explicit type, else the type inferred from the initializer.
fn stored_type(member: &MemberRecord) -> MemberwiseResult<TypeDescriptor> {
    if let Some(explicit) = &member.explicit {
        return Ok(explicit.clone());
    }

    member
        .initializer
        .as_ref()
        .and_then(infer)
        .ok_or_else(|| MemberwiseError::cannot_infer_type(&member.ident))
}
