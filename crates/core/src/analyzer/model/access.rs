use std::fmt;
use syn::Visibility;

/// Access levels, ordered from most to least restrictive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessLevel {
    /// Module-private: no visibility, `pub(self)` or `pub(in self)`.
    Private,
    /// Crate-visible or narrower but still exported from its module:
    /// `pub(crate)`, `pub(super)`, `pub(in path)`.
    Internal,
    Public,
}

impl AccessLevel {
    pub fn of(vis: &Visibility) -> Self {
        match vis {
            Visibility::Public(_) => Self::Public,
            Visibility::Inherited => Self::Private,
            Visibility::Restricted(restricted) => {
                if restricted.path.is_ident("self") {
                    Self::Private
                } else {
                    Self::Internal
                }
            }
        }
    }

    /// The visibility keyword emitted for an item with this access level.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Private => "",
            Self::Internal => "pub(crate)",
            Self::Public => "pub",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Public => "public",
        })
    }
}
