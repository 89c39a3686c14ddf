//! Renders the AST back into schema text.
//!
//! The output parses back to an equal AST. Enum values and union tags are
//! always written explicitly.

use super::ast::*;
use std::fmt::{self, Display, Formatter, Write};

impl Display for Primitive {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let s = match self {
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::Uint => "uint",
            Primitive::Int => "int",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
            Primitive::String => "string",
            Primitive::Void => "void",
        };
        f.write_str(s)
    }
}

impl Display for EnumKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let s = match self {
            EnumKind::E8 => "e8",
            EnumKind::E16 => "e16",
            EnumKind::E32 => "e32",
            EnumKind::E64 => "e64",
        };
        f.write_str(s)
    }
}

fn indent(f: &mut Formatter, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_char('\t')?;
    }
    Ok(())
}

fn write_type(f: &mut Formatter, ty: &Type, depth: usize) -> fmt::Result {
    match ty {
        Type::Primitive(p) => write!(f, "{}", p),
        Type::Data(None) => f.write_str("data"),
        Type::Data(Some(len)) => write!(f, "data<{}>", len),
        Type::Optional(ty) => {
            f.write_str("optional<")?;
            write_type(f, ty, depth)?;
            f.write_char('>')
        }
        Type::Array { member, len } => {
            match len {
                Some(len) => write!(f, "[{}]", len)?,
                None => f.write_str("[]")?,
            }
            write_type(f, member, depth)
        }
        Type::Map { key, value } => {
            f.write_str("map[")?;
            write_type(f, key, depth)?;
            f.write_char(']')?;
            write_type(f, value, depth)
        }
        Type::Struct(fields) if fields.is_empty() => f.write_str("{}"),
        Type::Struct(fields) => {
            f.write_str("{\n")?;
            for field in fields {
                indent(f, depth + 1)?;
                write!(f, "{}: ", field.name)?;
                write_type(f, &field.ty, depth + 1)?;
                f.write_char('\n')?;
            }
            indent(f, depth)?;
            f.write_char('}')
        }
        Type::Named(name) => f.write_str(name),
        Type::Union(members) => {
            f.write_char('(')?;
            for (i, m) in members.iter().enumerate() {
                if i > 0 {
                    f.write_str(" | ")?;
                }
                write_type(f, &m.ty, depth)?;
                write!(f, " = {}", m.tag)?;
            }
            f.write_char(')')
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result { write_type(f, self, 0) }
}

impl Display for UserDefinedType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result { write!(f, "type {} {}", self.name, self.ty) }
}

impl Display for UserDefinedEnum {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "enum {} {} {{", self.name, self.kind)?;
        for v in &self.values {
            writeln!(f, "\t{} = {}", v.name, v.value)?;
        }
        f.write_char('}')
    }
}

impl Display for Decl {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Decl::Type(t) => t.fmt(f),
            Decl::Enum(e) => e.fmt(f),
        }
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, decl) in self.decls.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            writeln!(f, "{}", decl)?;
        }
        Ok(())
    }
}
