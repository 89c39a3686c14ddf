use crate::{attr::field_attrs, bounded};
use quote::quote;
use syn::*;

pub fn bare_ser(ast: &DeriveInput, data: &DataStruct) -> Result<proc_macro2::TokenStream> {
    let name = &ast.ident;
    let generics = bounded(&ast.generics, parse_quote!(::bare::Ser));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Named fields are accessed by name, tuple fields by index.
    let mut accessors = Vec::new();
    for (i, field) in data.fields.iter().enumerate() {
        if field_attrs(&field.attrs)?.skip {
            continue;
        }
        let accessor = match &field.ident {
            Some(ident) => quote! { #ident },
            None => {
                let index = Index::from(i);
                quote! { #index }
            }
        };
        accessors.push(accessor);
    }

    Ok(quote! {
        impl #impl_generics ::bare::Ser for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn ser<__S: ::bare::encoding::Serializer + ?Sized>(
                &self,
                s: &mut __S,
                cx: &::bare::Context,
            ) -> ::std::result::Result<(), ::bare::Error> {
                #(::bare::Ser::ser(&self.#accessors, s, cx)?;)*
                ::std::result::Result::Ok(())
            }
        }
    })
}
