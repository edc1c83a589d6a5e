use std::collections::HashMap;

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use rowbind_core::naming::to_snake_case;
use syn::{Data, DeriveInput, Field, Fields, Generics, Ident, LitStr, Type, Visibility, parse_quote};

/// One field the record exposes to binding.
struct BoundField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    column: String,
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<LitStr>,
}

fn parse_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("rowbind")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                attrs.rename = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"column\"`"))
            }
        })?;
    }

    Ok(attrs)
}

fn bound_fields(input: &DeriveInput) -> syn::Result<Vec<BoundField<'_>>> {
    let fields = match &input.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(fields_named) => &fields_named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut bound = Vec::with_capacity(fields.len());
    let mut seen: HashMap<String, &Ident> = HashMap::new();

    for field in fields {
        let attrs = parse_attrs(field)?;

        // private fields are invisible to binding
        if attrs.skip || matches!(field.vis, Visibility::Inherited) {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let column = match &attrs.rename {
            Some(lit) => lit.value(),
            None => to_snake_case(&ident.to_string()),
        };

        if let Some(first) = seen.get(&column) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("field `{ident}` maps to column `{column}`, already used by field `{first}`"),
            ));
        }
        seen.insert(column.clone(), ident);

        bound.push(BoundField {
            ident,
            ty: &field.ty,
            column,
        });
    }

    Ok(bound)
}

/// Generic records need their field types to be scannable. Sequences of any
/// record need `Default` to allocate elements; the bound is higher-ranked so a
/// record without `Default` still compiles and only loses the sequence shapes.
fn bounded_generics(input: &DeriveInput, fields: &[BoundField<'_>]) -> (Generics, Generics) {
    let mut record = input.generics.clone();

    if !record.params.is_empty() {
        let predicates = &mut record.make_where_clause().predicates;
        for field in fields {
            let ty = field.ty;
            predicates.push(parse_quote!(#ty: ::rowbind::traits::from_sql::Scan));
        }
    }

    let mut element = record.clone();
    element
        .make_where_clause()
        .predicates
        .push(parse_quote!(for<'__row> Self: ::std::default::Default));

    (record, element)
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    let fields = bound_fields(input)?;
    let (record_generics, element_generics) = bounded_generics(input, &fields);
    let (impl_generics, ty_generics, where_clause) = record_generics.split_for_impl();
    let (element_impl_generics, _, element_where_clause) = element_generics.split_for_impl();

    let capacity = fields.len();
    let registrations = fields.iter().map(|BoundField { ident, column, .. }| {
        quote! {
            map.column(#column, &mut self.#ident);
        }
    });

    Ok(quote! {
        impl #impl_generics ::rowbind::traits::record::Record for #struct_name #ty_generics #where_clause {
            fn fields(&mut self) -> ::rowbind::traits::record::FieldMap<'_> {
                #[allow(unused_mut)]
                let mut map = ::rowbind::traits::record::FieldMap::with_capacity(#capacity);
                #(#registrations)*
                map
            }
        }

        impl #impl_generics ::rowbind::traits::destination::Destination for #struct_name #ty_generics #where_clause {
            fn target(&mut self) -> ::rowbind::traits::destination::Target<'_> {
                ::rowbind::traits::destination::Target::RecordSingle(self)
            }
        }

        impl #element_impl_generics ::rowbind::traits::destination::Element for #struct_name #ty_generics #element_where_clause {
            fn sequence(seq: &mut ::std::vec::Vec<Self>) -> ::rowbind::traits::destination::Target<'_> {
                ::rowbind::traits::destination::Target::RecordSequence(seq)
            }

            fn optional_sequence(
                seq: &mut ::std::option::Option<::std::vec::Vec<Self>>,
            ) -> ::rowbind::traits::destination::Target<'_> {
                ::rowbind::traits::destination::Target::RecordSequence(seq)
            }
        }
    })
}
