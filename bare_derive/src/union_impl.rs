use crate::{attr::variant_attrs, schema_impl::named_schema};
use quote::quote;
use syn::*;

pub fn bare_union(ast: &DeriveInput, data: &DataEnum) -> Result<proc_macro2::TokenStream> {
    let name = &ast.ident;

    let mut variants = Vec::new();
    let mut tys: Vec<&Type> = Vec::new();
    let mut tags: Vec<u8> = Vec::new();
    let mut next: Option<u8> = Some(0);
    for variant in data.variants.iter() {
        let tag = match variant_attrs(&variant.attrs)?.tag {
            Some(tag) => tag,
            None => next.ok_or_else(|| Error::new_spanned(variant, "union tag does not fit in a u8"))?,
        };
        if tags.contains(&tag) {
            return Err(Error::new_spanned(
                variant,
                format!("union tag {} is used twice", tag),
            ));
        }
        next = tag.checked_add(1);
        variants.push(&variant.ident);
        match variant.fields.iter().next() {
            Some(field) => tys.push(&field.ty),
            None => return Err(Error::new_spanned(variant, "union members need one field")),
        }
        tags.push(tag);
    }
    let schema = named_schema(name);

    Ok(quote! {
        impl ::bare::Union for #name {
            fn members() -> ::std::vec::Vec<::bare::Member<Self>> {
                ::std::vec![#(::bare::Member::of::<#tys>(#tags),)*]
            }
        }

        #(
            impl ::bare::UnionMember<#name> for #tys {
                fn into_union(self) -> #name {
                    #name::#variants(self)
                }

                #[allow(unreachable_patterns)]
                fn from_union(u: &#name) -> ::std::option::Option<&Self> {
                    match u {
                        #name::#variants(member) => ::std::option::Option::Some(member),
                        _ => ::std::option::Option::None,
                    }
                }
            }
        )*

        impl ::bare::Ser for #name {
            fn ser<__S: ::bare::encoding::Serializer + ?Sized>(
                &self,
                s: &mut __S,
                cx: &::bare::Context,
            ) -> ::std::result::Result<(), ::bare::Error> {
                ::bare::unions::ser_union(self, s, cx)
            }
        }

        impl ::bare::De for #name {
            fn de<__D: ::bare::encoding::Deserializer + ?Sized>(
                d: &mut __D,
                cx: &::bare::Context,
            ) -> ::std::result::Result<Self, ::bare::Error> {
                ::bare::unions::de_union(d, cx)
            }
        }

        #schema
    })
}
