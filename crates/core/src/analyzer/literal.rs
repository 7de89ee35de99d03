//! Initializer and default-value literals.
//!
//! Field initializers (`#[member(init = ...)]`) and `defaults` entries are
//! written in a small literal language that is a superset of Rust literals:
//!
//! ```text
//! true  "text"  'c'  42  -7i64  2.5  1e3f32  None
//! [1, 2, None]               array literal
//! {"a": 1, "b": None}        map literal
//! 3.0 as f32                 cast
//! 3.0 as? f32                conditional cast (yields an Option)
//! ```
//!
//! Anything else is kept as an opaque expression so it can still be spliced
//! into generated code; it simply has no inferable type.

use proc_macro2::{Span, TokenStream, TokenTree};
use quote::{quote, ToTokens, TokenStreamExt};
use syn::parse::discouraged::Speculative;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{
    braced, bracketed, token, Ident, Lit, LitBool, LitChar, LitFloat, LitInt, LitStr, Token, Type,
};

#[derive(Clone, Debug)]
pub enum LiteralExpr {
    Bool(LitBool),
    Str(LitStr),
    Char(LitChar),
    Int { negative: bool, lit: LitInt },
    Float { negative: bool, lit: LitFloat },
    /// `None`
    Nil(Span),
    Array(Vec<LiteralExpr>),
    Map(Vec<(LiteralExpr, LiteralExpr)>),
    Cast {
        expr: Box<LiteralExpr>,
        ty: Type,
        conditional: bool,
    },
    Other(TokenStream),
}

impl LiteralExpr {
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil(_))
    }

    fn parse_operand(input: ParseStream) -> syn::Result<Self> {
        if input.peek(token::Bracket) {
            let fork = input.fork();
            if let Ok(elements) = parse_array(&fork) {
                input.advance_to(&fork);
                return Ok(Self::Array(elements));
            }
        } else if input.peek(token::Brace) {
            let fork = input.fork();
            if let Ok(entries) = parse_map(&fork) {
                input.advance_to(&fork);
                return Ok(Self::Map(entries));
            }
        } else if input.peek(Token![-]) && (input.peek2(LitInt) || input.peek2(LitFloat)) {
            input.parse::<Token![-]>()?;
            return match input.parse::<Lit>()? {
                Lit::Int(lit) => Ok(Self::Int { negative: true, lit }),
                Lit::Float(lit) => Ok(Self::Float { negative: true, lit }),
                other => Err(syn::Error::new(other.span(), "expected a number")),
            };
        } else if input.peek(Lit) {
            return Ok(match input.parse::<Lit>()? {
                Lit::Bool(lit) => Self::Bool(lit),
                Lit::Str(lit) => Self::Str(lit),
                Lit::Char(lit) => Self::Char(lit),
                Lit::Int(lit) => Self::Int { negative: false, lit },
                Lit::Float(lit) => Self::Float { negative: false, lit },
                other => Self::Other(other.into_token_stream()),
            });
        } else if input.peek(Ident) && !input.peek2(Token![::]) && !input.peek2(token::Paren) {
            let fork = input.fork();
            let ident: Ident = fork.parse()?;
            if ident == "None" {
                input.advance_to(&fork);
                return Ok(Self::Nil(ident.span()));
            }
        }

        parse_opaque(input).map(Self::Other)
    }
}

impl Parse for LiteralExpr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut expr = Self::parse_operand(input)?;

        // Casts bind left to right: `x as i64 as? u8`.
        while input.peek(Token![as]) {
            input.parse::<Token![as]>()?;
            let conditional = input.parse::<Option<Token![?]>>()?.is_some();
            let ty: Type = input.parse()?;
            expr = Self::Cast {
                expr: Box::new(expr),
                ty,
                conditional,
            };
        }

        Ok(expr)
    }
}

fn parse_array(input: ParseStream) -> syn::Result<Vec<LiteralExpr>> {
    let content;
    bracketed!(content in input);
    let elements = Punctuated::<LiteralExpr, Token![,]>::parse_terminated(&content)?;
    Ok(elements.into_iter().collect())
}

fn parse_map(input: ParseStream) -> syn::Result<Vec<(LiteralExpr, LiteralExpr)>> {
    let content;
    braced!(content in input);

    let mut entries = Vec::new();
    while !content.is_empty() {
        let key: LiteralExpr = content.parse()?;
        content.parse::<Token![:]>()?;
        let value: LiteralExpr = content.parse()?;
        entries.push((key, value));

        if content.is_empty() {
            break;
        }
        content.parse::<Token![,]>()?;
    }
    Ok(entries)
}

/// Collects tokens up to the next top-level `,`, `:` or `as`.
fn parse_opaque(input: ParseStream) -> syn::Result<TokenStream> {
    let mut tokens = TokenStream::new();

    while !input.is_empty() && !input.peek(Token![,]) && !input.peek(Token![as]) {
        if input.peek(Token![::]) {
            input.parse::<Token![::]>()?.to_tokens(&mut tokens);
        } else if input.peek(Token![:]) {
            break;
        } else {
            tokens.append(input.parse::<TokenTree>()?);
        }
    }

    if tokens.is_empty() {
        return Err(input.error("expected a literal or an expression"));
    }
    Ok(tokens)
}

impl ToTokens for LiteralExpr {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Self::Bool(lit) => lit.to_tokens(tokens),
            Self::Str(lit) => lit.to_tokens(tokens),
            Self::Char(lit) => lit.to_tokens(tokens),
            Self::Int { negative, lit } => {
                if *negative {
                    tokens.extend(quote!(-));
                }
                lit.to_tokens(tokens);
            }
            Self::Float { negative, lit } => {
                if *negative {
                    tokens.extend(quote!(-));
                }
                lit.to_tokens(tokens);
            }
            Self::Nil(span) => tokens.append(Ident::new("None", *span)),
            Self::Array(elements) => tokens.extend(quote!([#(#elements),*])),
            Self::Map(entries) => {
                let keys = entries.iter().map(|(key, _)| key);
                let values = entries.iter().map(|(_, value)| value);
                tokens.extend(quote!({ #(#keys: #values),* }));
            }
            Self::Cast {
                expr,
                ty,
                conditional,
            } => {
                let question = conditional.then(|| quote!(?));
                tokens.extend(quote!(#expr as #question #ty));
            }
            Self::Other(stream) => stream.to_tokens(tokens),
        }
    }
}
