use syn::*;

/// Options from `#[bare(...)]` on a field.
#[derive(Default)]
pub struct FieldAttrs {
    /// `#[bare(skip)]`: neither written nor read.
    pub skip: bool,
    /// `#[bare(rename = "...")]`: the field's name in the generated schema.
    pub rename: Option<String>,
}

/// Options from `#[bare(...)]` on an enum variant.
#[derive(Default)]
pub struct VariantAttrs {
    /// `#[bare(tag = N)]`: the union tag of this member.
    pub tag: Option<u8>,
}

fn bare_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|a| a.path().is_ident("bare"))
}

pub fn field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in bare_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                out.rename = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename`"))
            }
        })?;
    }
    Ok(out)
}

pub fn variant_attrs(attrs: &[Attribute]) -> Result<VariantAttrs> {
    let mut out = VariantAttrs::default();
    for attr in bare_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("tag") {
                let tag: LitInt = meta.value()?.parse()?;
                out.tag = Some(tag.base10_parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `tag`"))
            }
        })?;
    }
    Ok(out)
}

/// The unsigned width from `#[repr(..)]`, if one is given.
pub fn repr_width(attrs: &[Attribute]) -> Result<Option<(Ident, u64)>> {
    let mut out = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            let width = match meta.path.get_ident() {
                Some(id) if id == "u8" => u64::from(u8::MAX),
                Some(id) if id == "u16" => u64::from(u16::MAX),
                Some(id) if id == "u32" => u64::from(u32::MAX),
                Some(id) if id == "u64" => u64::MAX,
                Some(id) if ["i8", "i16", "i32", "i64", "i128", "u128", "isize", "usize"]
                    .iter()
                    .any(|t| id == t) =>
                {
                    return Err(meta.error("BARE enums need a repr of u8, u16, u32 or u64"));
                }
                _ => return Ok(()),
            };
            if let Some(id) = meta.path.get_ident() {
                out = Some((id.clone(), width));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// A field's name as written, without any `r#` prefix.
pub fn unraw(ident: &Ident) -> String {
    let s = ident.to_string();
    match s.strip_prefix("r#") {
        Some(rest) => rest.to_string(),
        None => s,
    }
}
