use super::error::{MemberwiseError, MemberwiseResult};
use super::literal::LiteralExpr;
use super::model::{MemberRecord, Modifiers, Mutability, TypeDescriptor};
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Fields, Ident, ItemStruct, Token};

/// Name of the field helper attribute.
pub const MEMBER_ATTRIBUTE: &str = "member";

/// The host declaration of one invocation: the struct with its `#[member]`
/// attributes stripped, and one [`MemberRecord`] per field.
pub struct HostDecl {
    pub item: ItemStruct,
    pub members: Vec<MemberRecord>,
}

impl HostDecl {
    pub fn new(mut item: ItemStruct) -> MemberwiseResult<Self> {
        let mut members = Vec::new();

        if let Fields::Named(named) = &mut item.fields {
            for (index, field) in named.named.iter_mut().enumerate() {
                let Some(ident) = field.ident.clone() else {
                    continue;
                };
                let options = take_member_options(&mut field.attrs)?;

                members.push(MemberRecord {
                    ident,
                    explicit: TypeDescriptor::from_syn(&field.ty),
                    initializer: options.init,
                    mutability: if options.constant {
                        Mutability::Constant
                    } else {
                        Mutability::Variable
                    },
                    modifiers: Modifiers {
                        vis: field.vis.clone(),
                        is_static: options.is_static,
                        computed: options.computed,
                    },
                    index,
                });
            }
        }

        Ok(Self { item, members })
    }

    pub fn name(&self) -> String {
        self.item.ident.to_string()
    }
}

#[derive(Default)]
struct MemberOptions {
    init: Option<LiteralExpr>,
    constant: bool,
    is_static: bool,
    computed: Option<Expr>,
}

enum MemberOption {
    Init(LiteralExpr),
    Constant,
    Static,
    Computed(Expr),
}

impl Parse for MemberOption {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = input.call(Ident::parse_any)?;
        match name.to_string().as_str() {
            "init" => {
                input.parse::<Token![=]>()?;
                Ok(Self::Init(input.parse()?))
            }
            "computed" => {
                input.parse::<Token![=]>()?;
                Ok(Self::Computed(input.parse()?))
            }
            "constant" => Ok(Self::Constant),
            "static" => Ok(Self::Static),
            _ => Err(syn::Error::new(
                name.span(),
                format!("unknown member option `{}`", name),
            )),
        }
    }
}

/// Removes every `#[member(...)]` attribute from `attrs` and merges their options.
fn take_member_options(attrs: &mut Vec<Attribute>) -> MemberwiseResult<MemberOptions> {
    let mut options = MemberOptions::default();
    let mut result = Ok(());

    attrs.retain(|attr| {
        if !attr.path().is_ident(MEMBER_ATTRIBUTE) {
            return true;
        }
        if result.is_ok() {
            result = attr
                .parse_args_with(Punctuated::<MemberOption, Token![,]>::parse_terminated)
                .map(|parsed| {
                    for option in parsed {
                        match option {
                            MemberOption::Init(expr) => options.init = Some(expr),
                            MemberOption::Constant => options.constant = true,
                            MemberOption::Static => options.is_static = true,
                            MemberOption::Computed(expr) => options.computed = Some(expr),
                        }
                    }
                });
        }
        false
    });

    result.map_err(MemberwiseError::from)?;
    Ok(options)
}
