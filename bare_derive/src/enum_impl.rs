use crate::{attr::repr_width, schema_impl::named_schema};
use proc_macro2::Literal;
use quote::quote;
use syn::*;

/// `CustomerService` to `CUSTOMER_SERVICE`.
fn screaming_snake(ident: &Ident) -> String {
    let chars: Vec<char> = ident.to_string().chars().collect();
    let mut out = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}

fn discriminant(expr: &Expr) -> Result<u64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(i), ..
        }) => i.base10_parse(),
        _ => Err(Error::new_spanned(
            expr,
            "BARE enum discriminants must be integer literals",
        )),
    }
}

pub fn bare_enum(ast: &DeriveInput, data: &DataEnum) -> Result<proc_macro2::TokenStream> {
    let name = &ast.ident;
    let max = match repr_width(&ast.attrs)? {
        Some((_, max)) => max,
        None => u64::from(u32::MAX),
    };

    let mut variants = Vec::new();
    let mut values = Vec::new();
    let mut names = Vec::new();
    let mut next = Some(0u64);
    for variant in data.variants.iter() {
        let value = match &variant.discriminant {
            Some((_, expr)) => discriminant(expr)?,
            None => next.ok_or_else(|| {
                Error::new_spanned(variant, "enum value does not fit in a u64")
            })?,
        };
        if value > max {
            return Err(Error::new_spanned(
                variant,
                format!("enum value {} exceeds the enum's width (max {})", value, max),
            ));
        }
        if values.contains(&value) {
            return Err(Error::new_spanned(
                variant,
                format!("enum value {} is used twice", value),
            ));
        }
        next = value.checked_add(1);
        variants.push(&variant.ident);
        values.push(value);
        names.push(screaming_snake(&variant.ident));
    }
    let lits: Vec<Literal> = values.iter().map(|v| Literal::u64_suffixed(*v)).collect();
    let schema = named_schema(name);

    Ok(quote! {
        impl ::bare::BareEnum for #name {
            fn value(&self) -> u64 {
                match self {
                    #(#name::#variants => #lits,)*
                }
            }

            fn from_value(v: u64) -> ::std::option::Option<Self> {
                match v {
                    #(#lits => ::std::option::Option::Some(#name::#variants),)*
                    _ => ::std::option::Option::None,
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    #(#name::#variants => #names,)*
                }
            }
        }

        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(::bare::BareEnum::name(self))
            }
        }

        impl ::bare::Ser for #name {
            fn ser<__S: ::bare::encoding::Serializer + ?Sized>(
                &self,
                s: &mut __S,
                _: &::bare::Context,
            ) -> ::std::result::Result<(), ::bare::Error> {
                ::bare::enums::ser_enum(self, s)
            }
        }

        impl ::bare::De for #name {
            fn de<__D: ::bare::encoding::Deserializer + ?Sized>(
                d: &mut __D,
                _: &::bare::Context,
            ) -> ::std::result::Result<Self, ::bare::Error> {
                ::bare::enums::de_enum(d)
            }
        }

        #schema
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Span;

    #[test]
    fn names_are_screaming_snake() {
        let cases = [
            ("Accounting", "ACCOUNTING"),
            ("CustomerService", "CUSTOMER_SERVICE"),
            ("HTTPServer", "HTTP_SERVER"),
            ("E8Value", "E8_VALUE"),
        ];
        for (ident, want) in cases.iter() {
            assert_eq!(screaming_snake(&Ident::new(ident, Span::call_site())), *want);
        }
    }
}
