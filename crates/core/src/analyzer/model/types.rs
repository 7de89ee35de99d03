use crate::tokens::source_text;
use std::borrow::Cow;
use std::fmt;
use syn::punctuated::Punctuated;
use syn::{GenericArgument, PathArguments, Token, Type, TypeParamBound};

/// Semantic type of a constructor parameter or stored member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A nominal type, written verbatim.
    Named(String),
    Array(Box<TypeDescriptor>),
    Map(Box<TypeDescriptor>, Box<TypeDescriptor>),
    Optional(Box<TypeDescriptor>),
    /// A callable. `signature` holds the trait bounds (`Fn(i32) -> i32 + Send`)
    /// used when the parameter has to be annotated as escaping.
    FunctionLike {
        raw: String,
        signature: String,
        requires_escape_annotation: bool,
    },
}

impl TypeDescriptor {
    // Helper constructors
    pub fn named(name: impl Into<String>) -> Self { Self::Named(name.into()) }
    pub fn bool() -> Self { Self::named("bool") }
    pub fn string() -> Self { Self::named("String") }
    pub fn char() -> Self { Self::named("char") }
    pub fn int() -> Self { Self::named("i32") }
    pub fn double() -> Self { Self::named("f64") }

    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Wraps `inner` in `Optional` unless it already is one.
    pub fn optional(inner: TypeDescriptor) -> Self {
        match inner {
            Self::Optional(_) => inner,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// Descriptor of an explicitly written type, or `None` for the `_`
    /// placeholder.
    pub fn from_syn(ty: &Type) -> Option<Self> {
        match ty {
            Type::Infer(_) => None,
            Type::Group(group) => Self::from_syn(&group.elem),
            Type::BareFn(_) => {
                let raw = source_text(ty);
                Some(Self::FunctionLike {
                    signature: raw.clone(),
                    raw,
                    requires_escape_annotation: false,
                })
            }
            Type::Reference(reference) => match &*reference.elem {
                Type::TraitObject(object) if is_callable(&object.bounds) => {
                    Some(Self::FunctionLike {
                        raw: source_text(ty),
                        signature: source_text(&object.bounds),
                        requires_escape_annotation: false,
                    })
                }
                _ => Some(Self::named(source_text(ty))),
            },
            Type::Path(path) if path.qself.is_none() => {
                match boxed_callable(ty, &path.path) {
                    Some(callable) => Some(callable),
                    None => Some(Self::named(source_text(ty))),
                }
            }
            _ => Some(Self::named(source_text(ty))),
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, Self::Named(n) if n == name)
    }

    /// The type written in a constructor parameter list. Stored callables are
    /// taken as `impl Trait` with a lifetime bound so they can outlive the call.
    pub fn parameter_type(&self) -> String {
        match self {
            Self::FunctionLike {
                signature,
                requires_escape_annotation: true,
                ..
            } => {
                if signature.split('+').any(|bound| bound.trim().starts_with('\'')) {
                    format!("impl {}", signature)
                } else {
                    format!("impl {} + 'static", signature)
                }
            }
            other => other.to_string(),
        }
    }

    pub fn requires_escape_annotation(&self) -> bool {
        matches!(
            self,
            Self::FunctionLike {
                requires_escape_annotation: true,
                ..
            }
        )
    }

    /// The container structure of a type written as source text:
    /// `Vec<T>`, `Option<T>`, `HashMap<K, V>`, `BTreeMap<K, V>` and `String`
    /// map to their structural descriptors, recursively. Rendering keeps the
    /// verbatim text; lowering an initializer needs the structure.
    pub fn shape(&self) -> Cow<'_, Self> {
        let Self::Named(text) = self else {
            return Cow::Borrowed(self);
        };
        match syn::parse_str::<Type>(text).ok().as_ref().and_then(shape_of) {
            Some(shape) => Cow::Owned(shape),
            None => Cow::Borrowed(self),
        }
    }
}

fn shape_of(ty: &Type) -> Option<TypeDescriptor> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    let args: Vec<&Type> = match &segment.arguments {
        PathArguments::None => Vec::new(),
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        PathArguments::Parenthesized(_) => return None,
    };
    let nested =
        |ty: &Type| shape_of(ty).unwrap_or_else(|| TypeDescriptor::named(source_text(ty)));

    match (segment.ident.to_string().as_str(), args.as_slice()) {
        ("String", []) => Some(TypeDescriptor::string()),
        ("Vec", [element]) => Some(TypeDescriptor::array(nested(*element))),
        // `Option<Option<T>>` is kept as written.
        ("Option", [inner]) => Some(TypeDescriptor::Optional(Box::new(nested(*inner)))),
        ("HashMap" | "BTreeMap", [key, value, ..]) => {
            Some(TypeDescriptor::map(nested(*key), nested(*value)))
        }
        _ => None,
    }
}

/// `Box<dyn Fn..>`: a callable owned by the member, so it escapes the constructor.
fn boxed_callable(ty: &Type, path: &syn::Path) -> Option<TypeDescriptor> {
    let segment = path.segments.last()?;
    if segment.ident != "Box" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(Type::TraitObject(object)) if is_callable(&object.bounds) => {
            Some(TypeDescriptor::FunctionLike {
                raw: source_text(ty),
                signature: source_text(&object.bounds),
                requires_escape_annotation: true,
            })
        }
        _ => None,
    }
}

fn is_callable(bounds: &Punctuated<TypeParamBound, Token![+]>) -> bool {
    bounds.iter().any(|bound| match bound {
        TypeParamBound::Trait(trait_bound) => trait_bound
            .path
            .segments
            .last()
            .is_some_and(|segment| {
                matches!(
                    segment.ident.to_string().as_str(),
                    "Fn" | "FnMut" | "FnOnce"
                )
            }),
        _ => false,
    })
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Array(element) => write!(f, "Vec<{}>", element),
            Self::Map(key, value) => {
                write!(f, "::std::collections::HashMap<{}, {}>", key, value)
            }
            Self::Optional(inner) => write!(f, "Option<{}>", inner),
            Self::FunctionLike { raw, .. } => f.write_str(raw),
        }
    }
}
