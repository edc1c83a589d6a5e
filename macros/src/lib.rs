mod record;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `Record`, `Destination` and `Element` for a struct with named fields.
///
/// Every `pub` field is bound to the column named by the snake_case form of
/// its identifier. Private fields are left alone. `#[rowbind(skip)]` leaves a
/// public field alone too, `#[rowbind(rename = "column")]` binds it to an
/// exact column name instead.
///
/// Binding a single record has no further requirements. Binding into
/// `Vec<Self>` or `Option<Vec<Self>>` additionally needs `Default`, which is
/// used to allocate each element.
#[proc_macro_derive(Record, attributes(rowbind))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    record::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
