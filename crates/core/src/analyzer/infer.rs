//! Literal Type Inferrer.
//!
//! Derives a [`TypeDescriptor`] from an initializer literal, mirroring the
//! literal defaulting rules of Rust itself: unsuffixed integers are `i32`,
//! unsuffixed floats are `f64`, and a suffix always wins.
//!
//! A `None` literal only means something inside a container, where it makes
//! the element (or map value) type optional. On its own it has no type.

use super::literal::LiteralExpr;
use super::model::TypeDescriptor;
use crate::tokens::source_text;
use syn::Type;

/// Intermediate result: `Nil` never leaves this module.
enum Inferred {
    Nil,
    Type(TypeDescriptor),
}

/// Infers the type of `expr`, or `None` when the literal does not determine one.
pub fn infer(expr: &LiteralExpr) -> Option<TypeDescriptor> {
    let inferred = match infer_literal(expr)? {
        Inferred::Type(ty) => Some(ty),
        Inferred::Nil => None,
    };

    tracing::trace!(
        literal = %source_text(expr),
        inferred = ?inferred.as_ref().map(ToString::to_string),
        "inferred literal type"
    );
    inferred
}

fn infer_literal(expr: &LiteralExpr) -> Option<Inferred> {
    let ty = match expr {
        LiteralExpr::Cast {
            ty, conditional, ..
        } => {
            if matches!(ty, Type::Infer(_)) {
                return None;
            }
            let named = TypeDescriptor::named(source_text(ty));
            if *conditional {
                TypeDescriptor::optional(named)
            } else {
                named
            }
        }
        LiteralExpr::Array(elements) => {
            let element = infer(elements.first()?)?;
            if elements.iter().any(LiteralExpr::is_nil) {
                TypeDescriptor::array(TypeDescriptor::optional(element))
            } else {
                TypeDescriptor::array(element)
            }
        }
        LiteralExpr::Map(entries) => {
            let (key, value) = entries.iter().find(|(_, value)| !value.is_nil())?;
            let key = infer(key)?;
            let value = infer(value)?;
            if entries.iter().any(|(_, value)| value.is_nil()) {
                TypeDescriptor::map(key, TypeDescriptor::optional(value))
            } else {
                TypeDescriptor::map(key, value)
            }
        }
        LiteralExpr::Bool(_) => TypeDescriptor::bool(),
        LiteralExpr::Str(_) => TypeDescriptor::string(),
        LiteralExpr::Char(_) => TypeDescriptor::char(),
        LiteralExpr::Int { lit, .. } => match lit.suffix() {
            "" => TypeDescriptor::int(),
            suffix => TypeDescriptor::named(suffix),
        },
        LiteralExpr::Float { lit, .. } => match lit.suffix() {
            "" => TypeDescriptor::double(),
            suffix => TypeDescriptor::named(suffix),
        },
        LiteralExpr::Nil(_) => return Some(Inferred::Nil),
        LiteralExpr::Other(_) => return None,
    };

    Some(Inferred::Type(ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor;

    fn infer_src(src: &str) -> Option<TypeDescriptor> {
        let expr: LiteralExpr = syn::parse_str(src).expect("literal should parse");
        infer(&expr)
    }

    #[test]
    fn primitives() {
        assert_eq!(infer_src("true"), Some(descriptor!(bool)));
        assert_eq!(infer_src("\"x\""), Some(descriptor!(String)));
        assert_eq!(infer_src("'x'"), Some(descriptor!(char)));
        assert_eq!(infer_src("3"), Some(descriptor!(i32)));
        assert_eq!(infer_src("-3"), Some(descriptor!(i32)));
        assert_eq!(infer_src("3.0"), Some(descriptor!(f64)));
    }

    #[test]
    fn suffixes_win_over_defaults() {
        assert_eq!(infer_src("3u8"), Some(descriptor!(u8)));
        assert_eq!(infer_src("-2i64"), Some(descriptor!(i64)));
        assert_eq!(infer_src("1.5f32"), Some(descriptor!(f32)));
    }

    #[test]
    fn casts() {
        assert_eq!(infer_src("3.0 as f32"), Some(descriptor!(f32)));
        assert_eq!(infer_src("3.0 as? f32"), Some(descriptor!(?f32)));
        assert_eq!(infer_src("compute() as u64"), Some(descriptor!(u64)));
        assert_eq!(
            infer_src("0 as std::num::Wrapping<u8>"),
            Some(TypeDescriptor::named("std::num::Wrapping<u8>"))
        );
        assert_eq!(infer_src("3 as _"), None);
    }

    #[test]
    fn arrays() {
        assert_eq!(infer_src("[1, 2]"), Some(descriptor!([i32])));
        assert_eq!(infer_src("[1, None]"), Some(descriptor!([?i32])));
        assert_eq!(infer_src("[[1], [2, None]]"), Some(descriptor!([[i32]])));
        assert_eq!(infer_src("[1 as? u8, None]"), Some(descriptor!([?u8])));
        assert_eq!(infer_src("[]"), None);
        assert_eq!(infer_src("[None, 1]"), None);
        assert_eq!(infer_src("[Vec::new()]"), None);
    }

    #[test]
    fn maps() {
        assert_eq!(infer_src("{\"a\": 1}"), Some(descriptor!({ String: i32 })));
        assert_eq!(infer_src("{1: None, 2: \"v\"}"), Some(descriptor!({ i32: ?String })));
        assert_eq!(infer_src("{\"a\": [true]}"), Some(descriptor!({ String: [bool] })));
        assert_eq!(infer_src("{\"a\": None}"), None);
        assert_eq!(infer_src("{}"), None);
        assert_eq!(infer_src("{None: 1}"), None);
    }

    #[test]
    fn bare_nil_and_opaque_expressions_fail() {
        assert_eq!(infer_src("None"), None);
        assert_eq!(infer_src("String::new()"), None);
        assert_eq!(infer_src("Some(1)"), None);
        assert_eq!(infer_src("b\"bytes\""), None);
    }
}
