//! Token-stream to source-text rendering.
//!
//! `TokenStream::to_string` separates every token with a space
//! (`Vec < Option < i32 > >`). Generated constructors are read by people and
//! compared by tests, so types and spliced expressions go through
//! [`source_text`], which joins tokens the way rustfmt would write them.

use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};
use quote::ToTokens;

/// Renders tokens as compact, conventionally spaced source text.
pub fn source_text(tokens: &impl ToTokens) -> String {
    let mut out = String::new();
    write_stream(&mut out, tokens.to_token_stream());
    out.trim().to_string()
}

fn write_stream(out: &mut String, tokens: TokenStream) {
    let mut op = String::new();

    for tree in tokens {
        if let TokenTree::Punct(punct) = &tree {
            op.push(punct.as_char());
            if punct.spacing() == Spacing::Alone {
                write_op(out, &op);
                op.clear();
            }
            continue;
        }

        if !op.is_empty() {
            write_op(out, &op);
            op.clear();
        }

        match tree {
            TokenTree::Ident(ident) => {
                word_gap(out);
                out.push_str(&ident.to_string());
            }
            TokenTree::Literal(lit) => {
                word_gap(out);
                out.push_str(&lit.to_string());
            }
            TokenTree::Group(group) => {
                let (open, close) = match group.delimiter() {
                    Delimiter::Parenthesis => {
                        keyword_gap(out);
                        ("(", ")")
                    }
                    Delimiter::Bracket => {
                        keyword_gap(out);
                        ("[", "]")
                    }
                    Delimiter::Brace => {
                        word_gap(out);
                        ("{ ", " }")
                    }
                    Delimiter::None => ("", ""),
                };
                let mut inner = String::new();
                write_stream(&mut inner, group.stream());
                let inner = inner.trim();
                if inner.is_empty() {
                    out.push_str(open.trim());
                    out.push_str(close.trim());
                } else {
                    out.push_str(open);
                    out.push_str(inner);
                    out.push_str(close);
                }
            }
            TokenTree::Punct(_) => unreachable!("punctuation is collected above"),
        }
    }

    if !op.is_empty() {
        write_op(out, &op);
    }
}

fn write_op(out: &mut String, op: &str) {
    match op {
        "," | ";" => {
            trim_end(out);
            out.push_str(op);
            out.push(' ');
        }
        ":" => {
            trim_end(out);
            out.push_str(": ");
        }
        "+" | "=" | "->" | "=>" | "==" | "!=" | "<=" | ">=" | "&&" | "||" | "+=" | "-="
        | "*=" | "/=" | "/" | "%" | "^" => spaced(out, op),
        "-" | "&" | "*" if follows_operand(out) => spaced(out, op),
        _ => out.push_str(op),
    }
}

fn spaced(out: &mut String, op: &str) {
    trim_end(out);
    out.push(' ');
    out.push_str(op);
    out.push(' ');
}

fn word_gap(out: &mut String) {
    if out
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | ')' | ']' | '"' | '?' | '>'))
    {
        out.push(' ');
    }
}

// `&mut [u8]` and `dyn (Trait)` keep their space, `f(x)` and `v[0]` do not.
fn keyword_gap(out: &mut String) {
    let word: String = out
        .chars()
        .rev()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    let word: String = word.chars().rev().collect();
    if matches!(word.as_str(), "mut" | "dyn" | "impl" | "as" | "in" | "const" | "return" | "move") {
        out.push(' ');
    }
}

fn follows_operand(out: &str) -> bool {
    out.trim_end()
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | ')' | ']' | '"'))
}

fn trim_end(out: &mut String) {
    let len = out.trim_end().len();
    out.truncate(len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::Type;

    fn ty(src: &str) -> String {
        source_text(&syn::parse_str::<Type>(src).unwrap())
    }

    #[test]
    fn generic_types_are_compact() {
        assert_eq!(ty("Vec < Option < i32 > >"), "Vec<Option<i32>>");
        assert_eq!(
            ty("std :: collections :: HashMap<String , Vec<u8>>"),
            "std::collections::HashMap<String, Vec<u8>>"
        );
    }

    #[test]
    fn references_and_arrays() {
        assert_eq!(ty("&'static str"), "&'static str");
        assert_eq!(ty("& mut [u8 ; 4]"), "&mut [u8; 4]");
    }

    #[test]
    fn callable_types() {
        assert_eq!(
            ty("Box<dyn Fn(i32) -> i32 + Send>"),
            "Box<dyn Fn(i32) -> i32 + Send>"
        );
        assert_eq!(ty("fn(&str) -> bool"), "fn(&str) -> bool");
    }

    #[test]
    fn expressions() {
        let expr: syn::Expr = syn::parse_str("vec ! [1 , - 2]").unwrap();
        assert_eq!(source_text(&expr), "vec![1, -2]");
        let expr: syn::Expr = syn::parse_str("a - b . len ()").unwrap();
        assert_eq!(source_text(&expr), "a - b.len()");
    }
}
