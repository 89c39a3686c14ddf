//! `#[derive(Bare)]`.
//!
//! * Structs get `Ser`, `De` and `SchemaFor`. Fields are written in
//!   declaration order; `#[bare(skip)]` fields are left out and decoded as
//!   `Default::default()`.
//! * Enums whose variants have no fields become BARE enums: `BareEnum`,
//!   `Display`, `Ser`, `De` and `SchemaFor`. The value range comes from
//!   `#[repr(u8|u16|u32|u64)]`, defaulting to `u32`.
//! * Enums whose variants each hold exactly one unnamed field become
//!   unions: `Union`, one `UnionMember` per member type, `Ser`, `De` and
//!   `SchemaFor`. Tags count up from 0 unless set with `#[bare(tag = N)]`.

extern crate proc_macro;

mod attr;
mod de;
mod enum_impl;
mod schema_impl;
mod ser;
mod union_impl;

use proc_macro::TokenStream;
use quote::quote;
use syn::*;

fn struct_impl(ast: &DeriveInput, sd: &DataStruct) -> Result<proc_macro2::TokenStream> {
    let bser = ser::struct_impl::bare_ser(ast, sd)?;
    let bde = de::struct_impl::bare_de(ast, sd)?;
    let bschema = schema_impl::struct_schema(ast, sd)?;

    Ok(quote! {
        #bser
        #bde
        #bschema
    })
}

enum EnumShape {
    Plain,
    Union,
}

fn enum_shape(ast: &DeriveInput, ed: &DataEnum) -> Result<EnumShape> {
    if ed.variants.is_empty() {
        return Err(Error::new_spanned(ast, "cannot derive `Bare` for an enum without variants"));
    }
    if !ast.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &ast.generics,
            "cannot derive `Bare` for a generic enum",
        ));
    }
    let unit = ed.variants.iter().all(|v| matches!(v.fields, Fields::Unit));
    let single = ed.variants.iter().all(|v| match &v.fields {
        Fields::Unnamed(f) => f.unnamed.len() == 1,
        _ => false,
    });
    if unit {
        Ok(EnumShape::Plain)
    } else if single {
        Ok(EnumShape::Union)
    } else {
        Err(Error::new_spanned(
            ast,
            "`Bare` enums need either no fields on any variant (an enum) \
             or exactly one unnamed field on every variant (a union)",
        ))
    }
}

fn impl_bare(ast: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    match &ast.data {
        Data::Struct(sd) => struct_impl(ast, sd),
        Data::Enum(ed) => match enum_shape(ast, ed)? {
            EnumShape::Plain => enum_impl::bare_enum(ast, ed),
            EnumShape::Union => union_impl::bare_union(ast, ed),
        },
        Data::Union(_) => Err(Error::new_spanned(ast, "cannot derive `Bare` for a Rust union")),
    }
}

#[proc_macro_derive(Bare, attributes(bare))]
pub fn bare_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impl_bare(&ast)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// `generics` with `bound` added to every type parameter.
fn bounded(generics: &Generics, bound: TypeParamBound) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(bound.clone());
    }
    generics
}
