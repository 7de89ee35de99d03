//! Lowers literals into Rust expressions of a known target type.
//!
//! The literal language is looser than Rust: `[1, None]` is a valid
//! `Vec<Option<i32>>` initializer and `{"a": 1}` is a map. Lowering adds the
//! `Some(..)`, `vec![..]`, `String::from(..)` and `from_iter(..)` wrappers
//! Rust needs for the value to have the member's type.

use crate::analyzer::literal::LiteralExpr;
use crate::analyzer::model::TypeDescriptor;
use crate::tokens::source_text;

pub fn lower(expr: &LiteralExpr, target: Option<&TypeDescriptor>) -> String {
    // Explicit member types arrive as verbatim text; `Vec<u16>` still needs `vec![..]`.
    let shape = target.map(TypeDescriptor::shape);
    let target = shape.as_deref();

    match (expr, target) {
        (LiteralExpr::Nil(_), _) => "None".to_string(),
        (
            LiteralExpr::Cast {
                expr,
                ty,
                conditional: true,
            },
            _,
        ) => format!(
            "<{} as ::std::convert::TryFrom<_>>::try_from({}).ok()",
            source_text(ty),
            lower(expr, None)
        ),
        (expr, Some(TypeDescriptor::Optional(inner))) => {
            format!("Some({})", lower(expr, Some(&**inner)))
        }
        (LiteralExpr::Str(lit), Some(ty)) if ty.is_named("String") => {
            format!("::std::string::String::from({})", source_text(lit))
        }
        (LiteralExpr::Array(elements), Some(TypeDescriptor::Array(element))) => {
            format!("vec![{}]", lower_all(elements, Some(&**element)))
        }
        (LiteralExpr::Array(elements), _) => format!("[{}]", lower_all(elements, None)),
        (LiteralExpr::Map(entries), target) => {
            let (key_ty, value_ty) = match target {
                Some(TypeDescriptor::Map(key, value)) => (Some(&**key), Some(&**value)),
                _ => (None, None),
            };
            let entries: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("({}, {})", lower(key, key_ty), lower(value, value_ty)))
                .collect();
            format!("::std::iter::FromIterator::from_iter([{}])", entries.join(", "))
        }
        (
            LiteralExpr::Cast {
                expr,
                ty,
                conditional: false,
            },
            _,
        ) => format!("({} as {})", lower(expr, None), source_text(ty)),
        (other, _) => source_text(other),
    }
}

fn lower_all(elements: &[LiteralExpr], target: Option<&TypeDescriptor>) -> String {
    elements
        .iter()
        .map(|element| lower(element, target))
        .collect::<Vec<_>>()
        .join(", ")
}
