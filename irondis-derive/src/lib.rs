//! # IronDIS Derive
//!
//! Procedural macros for fixed-layout DIS record definitions.
//!
//! `#[derive(WireRecord)]` turns a plain struct of scalar fields into a
//! record: the field table, the big-endian codec and the `PartialEq`/`Eq`/
//! `Hash` impls are all generated from the declared field order.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, parse_macro_input, spanned::Spanned};

/// Derives `WireRecord`, `PartialEq`, `Eq` and `Hash` for a struct.
///
/// Every field must implement `WireScalar`. Fields are encoded in
/// declaration order with no gaps. The struct still derives `Debug`,
/// `Clone` and `Default` itself.
///
/// Struct attributes:
/// - `#[wire(name = "...")]` overrides the record name used in dumps
/// - `#[wire(ignore_padding)]` leaves padding fields out of equality and hashing
/// - `#[wire(crate = "...")]` sets the path to `irondis_core`
///
/// Field attributes:
/// - `#[wire(padding)]` marks reserved bytes
/// - `#[wire(rename = "...")]` overrides the field's wire name, which
///   otherwise is the field name in lowerCamelCase
///
/// # Example
/// ```ignore
/// #[derive(Debug, Clone, Copy, Default, WireRecord)]
/// #[wire(name = "StorageFuelReload")]
/// struct StorageFuelReload {
///     standard_quantity: u32,
///     maximum_quantity: u32,
///     #[wire(padding)]
///     padding: u8,
/// }
/// ```
#[proc_macro_derive(WireRecord, attributes(wire))]
pub fn derive_wire_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct RecordAttrs {
    name: Option<String>,
    ignore_padding: bool,
    krate: Path,
}

struct FieldSpec<'a> {
    ident: &'a Ident,
    ty: &'a syn::Type,
    wire_name: String,
    padding: bool,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "WireRecord cannot be derived for generic structs",
        ));
    }

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "WireRecord requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "WireRecord can only be derived for structs",
            ));
        }
    };

    let attrs = parse_record_attrs(input)?;
    let fields = named
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let ident = &input.ident;
    let krate = &attrs.krate;
    let record_name = attrs.name.unwrap_or_else(|| ident.to_string());

    let scalar = quote!(#krate::types::WireScalar);

    // Offsets are running sums of the preceding field widths.
    let mut offset = quote!(0usize);
    let mut descriptors = Vec::with_capacity(fields.len());
    for field in &fields {
        let ty = field.ty;
        let wire_name = &field.wire_name;
        let padding = field.padding;
        descriptors.push(quote! {
            #krate::types::FieldDescriptor::new(
                #wire_name,
                <#ty as #scalar>::WIRE_TYPE,
                #offset,
                #padding,
            )
        });
        offset = quote!(#offset + <#ty as #scalar>::WIRE_TYPE.size());
    }

    let writes = fields.iter().map(|f| {
        let name = f.ident;
        quote!(#scalar::write_to(self.#name, &mut *writer)?;)
    });
    let reads = fields.iter().map(|f| {
        let name = f.ident;
        let ty = f.ty;
        quote!(self.#name = <#ty as #scalar>::read_from(&mut *reader)?;)
    });
    let values = fields.iter().map(|f| {
        let name = f.ident;
        quote!(#scalar::to_value(self.#name))
    });

    let compared: Vec<_> = fields
        .iter()
        .filter(|f| !(f.padding && attrs.ignore_padding))
        .map(|f| f.ident)
        .collect();
    let comparisons = compared.iter().map(|name| {
        quote!(&& #scalar::wire_bits(self.#name) == #scalar::wire_bits(other.#name))
    });
    let hashes = compared.iter().map(|name| {
        quote!(state.write_u64(#scalar::wire_bits(self.#name));)
    });

    let compares_padding = if attrs.ignore_padding {
        quote!(const COMPARES_PADDING: bool = false;)
    } else {
        TokenStream2::new()
    };

    Ok(quote! {
        #[automatically_derived]
        impl #krate::record::WireRecord for #ident {
            const NAME: &'static str = #record_name;
            const FIELDS: &'static [#krate::types::FieldDescriptor] = &[#(#descriptors),*];
            #compares_padding

            fn write_fields<W: #krate::cursor::WireWriter + ?Sized>(
                &self,
                writer: &mut W,
            ) -> #krate::error::Result<()> {
                #(#writes)*
                ::core::result::Result::Ok(())
            }

            fn read_fields<R: #krate::cursor::WireReader + ?Sized>(
                &mut self,
                reader: &mut R,
            ) -> #krate::error::Result<()> {
                #(#reads)*
                ::core::result::Result::Ok(())
            }

            fn field_values(&self) -> ::std::vec::Vec<#krate::types::FieldValue> {
                ::std::vec![#(#values),*]
            }
        }

        #[automatically_derived]
        impl ::core::cmp::PartialEq for #ident {
            fn eq(&self, other: &Self) -> bool {
                ::core::ptr::eq(self, other) || (true #(#comparisons)*)
            }
        }

        #[automatically_derived]
        impl ::core::cmp::Eq for #ident {}

        #[automatically_derived]
        impl ::core::hash::Hash for #ident {
            #[allow(unused_variables)]
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                #(#hashes)*
            }
        }
    })
}

fn parse_record_attrs(input: &DeriveInput) -> syn::Result<RecordAttrs> {
    let mut attrs = RecordAttrs {
        name: None,
        ignore_padding: false,
        krate: syn::parse_quote!(::irondis_core),
    };

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("wire")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.name = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("ignore_padding") {
                attrs.ignore_padding = true;
                Ok(())
            } else if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.krate = lit.parse()?;
                Ok(())
            } else {
                Err(meta.error("unsupported wire attribute"))
            }
        })?;
    }

    Ok(attrs)
}

fn parse_field(field: &syn::Field) -> syn::Result<FieldSpec<'_>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;

    let mut parsed = FieldSpec {
        ident,
        ty: &field.ty,
        wire_name: to_lower_camel(&ident.to_string()),
        padding: false,
    };

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("wire")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("padding") {
                parsed.padding = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.wire_name = lit.value();
                Ok(())
            } else {
                Err(meta.error("unsupported wire field attribute"))
            }
        })?;
    }

    Ok(parsed)
}

/// `standard_quantity` -> `standardQuantity`
fn to_lower_camel(name: &str) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
