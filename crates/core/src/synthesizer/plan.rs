use super::lower::lower;
use crate::analyzer::classify::{Classification, Role};
use crate::analyzer::directives::DefaultValue;
use crate::analyzer::model::{AccessLevel, TypeDescriptor};
use syn::Ident;

/// Parameters up to this count are rendered on the header line.
const SINGLE_LINE_LIMIT: usize = 2;

#[derive(Clone, Debug)]
pub struct Parameter {
    pub ident: Ident,
    pub ty: TypeDescriptor,
    pub default: Option<DefaultValue>,
}

impl Parameter {
    /// `name: Type` as written in the signature.
    pub fn text(&self) -> String {
        format!("{}: {}", self.ident, self.type_text())
    }

    /// The parameter's type: `Option<T>` when defaulted.
    pub fn type_text(&self) -> String {
        match &self.default {
            Some(_) => format!("Option<{}>", self.ty),
            None => self.ty.parameter_type(),
        }
    }

    /// The value assigned to the field, or `None` for field shorthand.
    pub fn value_text(&self) -> Option<String> {
        match &self.default {
            Some(default) => Some(format!(
                "{}.unwrap_or_else(|| {})",
                self.ident,
                lower(&default.value, Some(&self.ty))
            )),
            None if self.ty.requires_escape_annotation() => {
                Some(format!("::std::boxed::Box::new({})", self.ident))
            }
            None => None,
        }
    }

    /// `name: Type = default`, the signature as documented to users.
    pub fn signature(&self) -> String {
        match &self.default {
            Some(default) => format!("{}: {} = {}", self.ident, self.ty, default.raw),
            None => format!("{}: {}", self.ident, self.ty),
        }
    }
}

/// How one stored field of `Self { .. }` gets its value.
#[derive(Clone, Debug)]
pub enum FieldInit {
    Parameter(Parameter),
    Value { ident: Ident, value: String },
}

impl FieldInit {
    /// The field initializer inside `Self { .. }`.
    pub fn assignment(&self) -> String {
        match self {
            Self::Parameter(parameter) => match parameter.value_text() {
                Some(value) => format!("{}: {}", parameter.ident, value),
                None => parameter.ident.to_string(),
            },
            Self::Value { ident, value } => format!("{}: {}", ident, value),
        }
    }
}

/// The constructor to generate: stored fields in declaration order.
#[derive(Clone, Debug)]
pub struct ConstructorPlan {
    pub access: AccessLevel,
    pub fields: Vec<FieldInit>,
}

impl ConstructorPlan {
    pub fn new(classification: &Classification, access: AccessLevel) -> Self {
        let fields = classification
            .members
            .iter()
            .filter_map(|classified| {
                let ident = classified.member.ident.clone();
                match &classified.role {
                    Role::Parameter { ty, default } => Some(FieldInit::Parameter(Parameter {
                        ident,
                        ty: ty.clone(),
                        default: default.clone(),
                    })),
                    Role::Initialized { ty } => {
                        let value = classified
                            .member
                            .initializer
                            .as_ref()
                            .map(|init| lower(init, Some(ty)))?;
                        Some(FieldInit::Value { ident, value })
                    }
                    Role::Static { .. } | Role::Computed { .. } => None,
                }
            })
            .collect();

        Self { access, fields }
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.fields.iter().filter_map(|field| match field {
            FieldInit::Parameter(parameter) => Some(parameter),
            FieldInit::Value { .. } => None,
        })
    }

    /// Renders the constructor as a Rust associated function.
    pub fn render(&self) -> String {
        let params: Vec<String> = self.parameters().map(Parameter::text).collect();
        let mut out = String::new();

        if params.len() <= SINGLE_LINE_LIMIT {
            out.push_str(&format!(
                "{} fn new({}) -> Self {{\n",
                self.access.keyword(),
                params.join(", ")
            ));
        } else {
            out.push_str(&format!("{} fn new(\n", self.access.keyword()));
            for param in &params {
                out.push_str(&format!("    {},\n", param));
            }
            out.push_str(") -> Self {\n");
        }

        if self.fields.is_empty() {
            out.push_str("    Self {}\n");
        } else {
            out.push_str("    Self {\n");
            for field in &self.fields {
                out.push_str(&format!("        {},\n", field.assignment()));
            }
            out.push_str("    }\n");
        }
        out.push_str("}\n");
        out
    }

    /// One-line summary, e.g. `pub fn new(id: u64, name: String = "guest")`.
    pub fn describe(&self) -> String {
        let params: Vec<String> = self.parameters().map(Parameter::signature).collect();
        format!("{} fn new({})", self.access.keyword(), params.join(", "))
    }
}
