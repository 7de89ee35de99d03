use memberwise_core::prelude::*;
use memberwise_core::tokens::source_text;
use proc_macro2::{TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::{FnArg, ImplItem, Item, ItemImpl, ItemStruct, Pat};

struct Expanded {
    item: ItemStruct,
    imp: ItemImpl,
}

fn expand_ok(args: TokenStream, item: TokenStream) -> Expanded {
    let tokens = expand(args, item).expect("expansion should succeed");
    let file: syn::File = syn::parse2(tokens).expect("expansion should be valid Rust");

    let mut items = file.items.into_iter();
    match (items.next(), items.next(), items.next()) {
        (Some(Item::Struct(item)), Some(Item::Impl(imp)), None) => Expanded { item, imp },
        other => panic!("unexpected expansion shape: {:?}", other),
    }
}

impl Expanded {
    fn field_types(&self) -> Vec<(String, String)> {
        self.item
            .fields
            .iter()
            .map(|field| {
                (
                    field.ident.as_ref().unwrap().to_string(),
                    source_text(&field.ty),
                )
            })
            .collect()
    }

    fn method(&self, name: &str) -> &syn::ImplItemFn {
        self.imp
            .items
            .iter()
            .find_map(|item| match item {
                ImplItem::Fn(method) if method.sig.ident == name => Some(method),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no method `{}`", name))
    }

    fn parameters(&self) -> Vec<(String, String)> {
        self.method("new")
            .sig
            .inputs
            .iter()
            .map(|arg| match arg {
                FnArg::Typed(typed) => match &*typed.pat {
                    Pat::Ident(pat) => (pat.ident.to_string(), source_text(&typed.ty)),
                    other => panic!("unexpected pattern {:?}", other),
                },
                FnArg::Receiver(_) => panic!("constructor takes no receiver"),
            })
            .collect()
    }
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

#[test]
fn placeholder_types_are_replaced_by_inferred_ones() {
    let expanded = expand_ok(
        quote!(),
        quote! {
            pub struct Settings {
                #[member(init = "dark")]
                theme: _,
                #[member(init = [1, None])]
                slots: _,
                #[member(init = {"a": 1.5})]
                weights: _,
                #[member(init = 3.0 as? f32)]
                ratio: _,
                id: u64,
            }
        },
    );

    assert_eq!(
        expanded.field_types(),
        pairs(&[
            ("theme", "String"),
            ("slots", "Vec<Option<i32>>"),
            ("weights", "::std::collections::HashMap<String, f64>"),
            ("ratio", "Option<f32>"),
            ("id", "u64"),
        ])
    );
    assert_eq!(expanded.parameters(), expanded.field_types());
}

#[test]
fn static_and_computed_members_leave_storage() {
    let expanded = expand_ok(
        quote!(),
        quote! {
            pub struct Circle {
                #[member(static, init = "circle")]
                pub kind: _,
                radius: f64,
                #[member(computed = self.radius * 2.0)]
                pub diameter: f64,
            }
        },
    );

    assert_eq!(expanded.field_types(), pairs(&[("radius", "f64")]));
    assert_eq!(expanded.parameters(), pairs(&[("radius", "f64")]));
    assert!(expanded.method("kind").sig.inputs.is_empty());
    assert_eq!(source_text(&expanded.method("kind").sig.output), "-> String");
    assert_eq!(expanded.method("diameter").sig.inputs.len(), 1);
}

#[test]
fn helper_attributes_are_stripped() {
    let expanded = expand_ok(
        quote!(exclude = ["count"]),
        quote! {
            #[derive(Debug)]
            pub struct Tally {
                /// Running count.
                #[member(init = 0)]
                count: _,
            }
        },
    );

    assert_eq!(expanded.item.attrs.len(), 1);
    let field = expanded.item.fields.iter().next().unwrap();
    assert!(field.attrs.iter().all(|attr| attr.path().is_ident("doc")));
    assert!(expanded.parameters().is_empty());
}

#[test]
fn generics_are_carried_to_the_impl() {
    let expanded = expand_ok(
        quote!(),
        quote! {
            pub struct Wrapper<'a, T: Clone> where T: Default {
                value: T,
                label: &'a str,
            }
        },
    );

    assert_eq!(expanded.imp.generics.params.len(), 2);
    assert!(expanded.imp.generics.where_clause.is_some());
    assert_eq!(source_text(&expanded.imp.self_ty), "Wrapper<'a, T>");
}

#[test]
fn internal_constructor_on_public_type() {
    let expanded = expand_ok(quote!(access = .internal), quote!(pub struct Id { raw: u64 }));
    assert_eq!(source_text(&expanded.method("new").vis), "pub(crate)");
}

#[test]
fn plan_matches_declaration_order() {
    let plan = plan(
        quote!(defaults = { "b": 2 }),
        quote!(pub struct Abc { a: i32, b: i32, c: i32 }),
    )
    .unwrap();

    let names: Vec<_> = plan.parameters().map(|p| p.ident.to_string()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(plan.describe(), "pub fn new(a: i32, b: i32 = 2, c: i32)");
}

#[test]
fn written_container_types_get_matching_values() {
    let expanded = expand_ok(
        quote!(exclude = ["limits"], defaults = { "label": "x" }),
        quote! {
            pub struct Listener {
                #[member(constant, init = [80, 443])]
                ports: Vec<u16>,
                #[member(init = {"burst": 10})]
                limits: std::collections::BTreeMap<String, u32>,
                label: Option<String>,
            }
        },
    );

    assert_eq!(
        expanded.field_types(),
        pairs(&[
            ("ports", "Vec<u16>"),
            ("limits", "std::collections::BTreeMap<String, u32>"),
            ("label", "Option<String>"),
        ])
    );
    assert_eq!(expanded.parameters(), pairs(&[("label", "Option<Option<String>>")]));

    let body = source_text(&expanded.method("new").block);
    assert!(body.contains("ports: vec![80, 443]"));
    assert!(body.contains(
        "limits: ::std::iter::FromIterator::from_iter([(::std::string::String::from(\"burst\"), 10)])"
    ));
    assert!(body.contains("label: label.unwrap_or_else("));
    assert!(body.contains("Some(::std::string::String::from(\"x\"))"));
}

#[test]
fn constructor_tokens_point_at_their_members() {
    let src = concat!(
        "pub struct Ports {\n",
        "    host: String,\n",
        "    #[member(constant, init = [80, 443])]\n",
        "    ports: Vec<u16>,\n",
        "}",
    );
    let item: TokenStream = src.parse().unwrap();
    let expanded = expand_ok(TokenStream::new(), item);
    let new = expanded.method("new");

    let FnArg::Typed(host) = &new.sig.inputs[0] else {
        panic!("constructor takes no receiver");
    };
    let host_ty = host.ty.to_token_stream().into_iter().next().unwrap();
    assert_eq!(host_ty.span().start().line, 2);

    let value = flatten(new.block.to_token_stream())
        .into_iter()
        .find(|tree| tree.to_string() == "vec")
        .expect("`vec!` in the constructor body");
    assert_eq!(value.span().start().line, 4);
}

fn flatten(tokens: TokenStream) -> Vec<TokenTree> {
    tokens
        .into_iter()
        .flat_map(|tree| match tree {
            TokenTree::Group(group) => flatten(group.stream()),
            other => vec![other],
        })
        .collect()
}
