//! `#[memberwise_init]` generates a memberwise `new` constructor for a struct.
//!
//! ```ignore
//! use memberwise_macros::memberwise_init;
//!
//! #[memberwise_init(access = internal, defaults = { "port": 8080 })]
//! pub struct Server {
//!     host: String,
//!     port: u16,
//!     #[member(init = 0)]
//!     requests: _,
//! }
//!
//! let server = Server::new("localhost".into(), None, 12);
//! ```
//!
//! Arguments:
//!
//! - `access = public | internal`: visibility of `new`. Defaults to `public`;
//!   `internal` emits `pub(crate)`.
//! - `exclude = ["name", ..]`: members left out of the signature. Each needs
//!   an initial value.
//! - `defaults = { "name": value, .. }`: the parameter becomes `Option<T>` and
//!   falls back to `value` when `None` is passed.
//!
//! Fields may carry `#[member(..)]`:
//!
//! - `init = value`: initial value. A field declared as `_` takes the type
//!   inferred from it.
//! - `constant`: an initialized constant is assigned its value and never
//!   becomes a parameter.
//! - `static`: moved out of the struct into an associated `fn name() -> T`.
//! - `computed = expr`: moved out of the struct into a `fn name(&self) -> T`
//!   getter.

use proc_macro::TokenStream;

#[proc_macro_attribute]
pub fn memberwise_init(attr: TokenStream, item: TokenStream) -> TokenStream {
    match memberwise_core::expand(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
