//! Derive macros shared by the held-karp crates.
//!
//! Generated code refers to `crate::Error` and `crate::Result`, so the
//! deriving crate must expose both at its root.

mod cli_options;
mod cli_value;
mod kv_display;
mod new;
mod utils;

use proc_macro::TokenStream;

/// Parsing and `Display` for unit enums used as option values.
#[proc_macro_derive(CliValue, attributes(cli_value, cli))]
pub fn derive_cli_value(item: TokenStream) -> TokenStream {
    cli_value::derive_cli_value_inner(item)
}

/// `--name value` dispatch and usage text for option structs.
#[proc_macro_derive(CliOptions, attributes(cli))]
pub fn derive_cli_options(item: TokenStream) -> TokenStream {
    cli_options::derive_cli_options_inner(item)
}

/// Aligned `key = value` multi-line `Display`.
#[proc_macro_derive(KvDisplay, attributes(kv))]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    kv_display::derive_kv_display_inner(item)
}

/// `new(..)` over required fields plus `with_*` builders for `Option` fields.
#[proc_macro_derive(New)]
pub fn derive_new(input: TokenStream) -> TokenStream {
    new::derive_new_inner(input)
}
