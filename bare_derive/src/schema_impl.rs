use crate::{
    attr::{field_attrs, unraw},
    bounded,
};
use quote::quote;
use syn::*;

pub fn struct_schema(ast: &DeriveInput, data: &DataStruct) -> Result<proc_macro2::TokenStream> {
    let name = &ast.ident;
    let generics = bounded(&ast.generics, parse_quote!(::bare::schema::SchemaFor));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut fields = Vec::new();
    for (i, field) in data.fields.iter().enumerate() {
        let attrs = field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let field_name = match (attrs.rename, &field.ident) {
            (Some(rename), _) => rename,
            (None, Some(ident)) => unraw(ident),
            (None, None) => format!("f{}", i),
        };
        fields.push((field_name, &field.ty));
    }

    let body = match &data.fields {
        // A newtype is transparent.
        Fields::Unnamed(_) if fields.len() == 1 => {
            let ty = fields[0].1;
            quote! { <#ty as ::bare::schema::SchemaFor>::schema_type() }
        }
        _ => {
            let names = fields.iter().map(|(n, _)| n);
            let tys = fields.iter().map(|(_, t)| t);
            quote! {
                ::bare::schema::Type::Struct(::std::vec![
                    #(::bare::schema::StructField {
                        name: ::std::string::String::from(#names),
                        ty: <#tys as ::bare::schema::SchemaFor>::schema_type(),
                    },)*
                ])
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::bare::schema::SchemaFor for #name #ty_generics #where_clause {
            fn schema_type() -> ::bare::schema::Type {
                #body
            }
        }
    })
}

/// Enums and unions are referred to by name.
pub fn named_schema(name: &Ident) -> proc_macro2::TokenStream {
    let name_str = name.to_string();
    quote! {
        impl ::bare::schema::SchemaFor for #name {
            fn schema_type() -> ::bare::schema::Type {
                ::bare::schema::Type::Named(::std::string::String::from(#name_str))
            }
        }
    }
}
