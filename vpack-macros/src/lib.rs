//! Derive macro for vpack.

use proc_macro::TokenStream;
mod attrs;
mod pack;

/// Derive `Pack`.
#[proc_macro_derive(Pack, attributes(vpack))]
pub fn derive_pack(input: TokenStream) -> TokenStream {
    pack::derive_pack(input)
}
