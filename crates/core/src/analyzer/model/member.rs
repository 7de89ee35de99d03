use super::TypeDescriptor;
use crate::analyzer::literal::LiteralExpr;
use syn::{Expr, Ident, Visibility};

/// `let`- or `var`-equivalent storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    Constant,
    Variable,
}

#[derive(Clone, Debug)]
pub struct Modifiers {
    pub vis: Visibility,
    pub is_static: bool,
    /// Accessor body of a computed member.
    pub computed: Option<Expr>,
}

impl Modifiers {
    pub fn is_computed(&self) -> bool {
        self.computed.is_some()
    }
}

/// One declared member of the host type.
#[derive(Clone, Debug)]
pub struct MemberRecord {
    pub ident: Ident,
    /// `None` when the member was declared with the `_` placeholder.
    pub explicit: Option<TypeDescriptor>,
    pub initializer: Option<LiteralExpr>,
    pub mutability: Mutability,
    pub modifiers: Modifiers,
    pub index: usize,
}

impl MemberRecord {
    pub fn name(&self) -> String {
        self.ident.to_string()
    }

    pub fn is_self_initializing(&self) -> bool {
        self.initializer.is_some()
    }
}
