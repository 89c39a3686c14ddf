use crate::{attr::field_attrs, bounded};
use quote::quote;
use syn::*;

pub fn bare_de(ast: &DeriveInput, data: &DataStruct) -> Result<proc_macro2::TokenStream> {
    let name = &ast.ident;
    let generics = bounded(&ast.generics, parse_quote!(::bare::De));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Field initializers run in the order written, which is wire order.
    let mut values = Vec::new();
    for field in data.fields.iter() {
        let value = if field_attrs(&field.attrs)?.skip {
            quote! { ::std::default::Default::default() }
        } else {
            quote! { ::bare::De::de(d, cx)? }
        };
        values.push(match &field.ident {
            Some(ident) => quote! { #ident: #value },
            None => value,
        });
    }

    let construct = match &data.fields {
        Fields::Named(_) => quote! { #name { #(#values),* } },
        Fields::Unnamed(_) => quote! { #name(#(#values),*) },
        Fields::Unit => quote! { #name },
    };

    Ok(quote! {
        impl #impl_generics ::bare::De for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn de<__D: ::bare::encoding::Deserializer + ?Sized>(
                d: &mut __D,
                cx: &::bare::Context,
            ) -> ::std::result::Result<Self, ::bare::Error> {
                ::std::result::Result::Ok(#construct)
            }
        }
    })
}
