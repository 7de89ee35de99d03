use super::lower::lower;
use super::plan::{ConstructorPlan, FieldInit};
use crate::analyzer::classify::{Classification, Role};
use crate::analyzer::context::HostDecl;
use crate::analyzer::error::{MemberwiseError, MemberwiseResult};
use crate::analyzer::model::{AccessLevel, TypeDescriptor};
use proc_macro2::{Group, Span, TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::punctuated::Punctuated;
use syn::{Fields, Type};

/// Emits the rewritten struct followed by an `impl` block holding the
/// constructor and any lifted static or computed members.
pub fn emit(
    host: &HostDecl,
    classification: &Classification,
    plan: &ConstructorPlan,
) -> MemberwiseResult<TokenStream> {
    let mut item = host.item.clone();
    let mut statics = Vec::new();
    let mut getters = Vec::new();

    if let Fields::Named(named) = &mut item.fields {
        let fields = std::mem::replace(&mut named.named, Punctuated::new());

        for (mut field, classified) in fields.into_iter().zip(&classification.members) {
            let member = &classified.member;
            let ident = &member.ident;
            let vis = &member.modifiers.vis;

            match &classified.role {
                Role::Static { ty } => {
                    let init = member.initializer.as_ref().ok_or_else(|| {
                        MemberwiseError::MissingStaticValue {
                            member: member.name(),
                            span: ident.span(),
                        }
                    })?;
                    let value = respan(
                        parse_expr(&lower(init, Some(ty)))?.to_token_stream(),
                        ident.span(),
                    );
                    let ty = parse_type(ty)?;
                    statics.push(quote! {
                        #vis fn #ident() -> #ty {
                            #value
                        }
                    });
                }
                Role::Computed { ty } => {
                    let ty = parse_type(ty)?;
                    let body = &member.modifiers.computed;
                    getters.push(quote! {
                        #vis fn #ident(&self) -> #ty {
                            #body
                        }
                    });
                }
                Role::Parameter { ty, .. } | Role::Initialized { ty } => {
                    if matches!(field.ty, Type::Infer(_)) {
                        field.ty = parse_type(ty)?;
                    }
                    named.named.push(field);
                }
            }
        }
    }

    let constructor = constructor(plan)?;
    let ident = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics #ident #ty_generics #where_clause {
            #constructor
            #(#statics)*
            #(#getters)*
        }
    })
}

fn parse_type(ty: &TypeDescriptor) -> MemberwiseResult<Type> {
    Ok(syn::parse_str(&ty.to_string())?)
}

fn parse_expr(src: &str) -> MemberwiseResult<syn::Expr> {
    Ok(syn::parse_str(src)?)
}

/// The constructor as tokens. Types and values are spanned at the member
/// they were built from, so type errors point into the struct.
fn constructor(plan: &ConstructorPlan) -> MemberwiseResult<TokenStream> {
    let vis = match plan.access {
        AccessLevel::Public => quote!(pub),
        AccessLevel::Internal => quote!(pub(crate)),
        AccessLevel::Private => TokenStream::new(),
    };

    let mut params = Vec::new();
    let mut fields = Vec::new();
    for field in &plan.fields {
        match field {
            FieldInit::Parameter(parameter) => {
                let ident = &parameter.ident;
                let ty: Type = syn::parse_str(&parameter.type_text())?;
                let ty = respan(ty.to_token_stream(), ident.span());
                params.push(quote!(#ident: #ty));

                match parameter.value_text() {
                    Some(value) => {
                        let value = respan(parse_expr(&value)?.to_token_stream(), ident.span());
                        fields.push(quote!(#ident: #value));
                    }
                    None => fields.push(quote!(#ident)),
                }
            }
            FieldInit::Value { ident, value } => {
                let value = respan(parse_expr(value)?.to_token_stream(), ident.span());
                fields.push(quote!(#ident: #value));
            }
        }
    }

    Ok(quote! {
        #vis fn new(#(#params),*) -> Self {
            Self { #(#fields),* }
        }
    })
}

fn respan(tokens: TokenStream, span: Span) -> TokenStream {
    tokens
        .into_iter()
        .map(|tree| match tree {
            TokenTree::Group(group) => {
                let mut inner = Group::new(group.delimiter(), respan(group.stream(), span));
                inner.set_span(span);
                TokenTree::Group(inner)
            }
            mut other => {
                other.set_span(span);
                other
            }
        })
        .collect()
}
