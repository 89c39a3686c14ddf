//! The schema AST handed to code generators.
//!
//! Nodes are plain data: built once by the parser and never mutated. Names
//! are not checked for uniqueness and [`Type::Named`] references are not
//! resolved; both are the generator's job.

use std::slice::Iter;

/// A whole schema document, declarations in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    /// Every declaration, in the order written.
    pub decls: Vec<Decl>,
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decl {
    /// `type Name <type>`
    Type(UserDefinedType),
    /// `enum Name <kind> { ... }`
    Enum(UserDefinedEnum),
}

/// A named type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDefinedType {
    /// The declared name.
    pub name: String,
    /// The type it stands for.
    pub ty: Type,
}

/// A named enum with resolved values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDefinedEnum {
    /// The declared name.
    pub name: String,
    /// The integer width values must fit in.
    pub kind: EnumKind,
    /// The values, in declaration order.
    pub values: Vec<EnumValue>,
}

/// One named value of an enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    /// The value's name.
    pub name: String,
    /// The value, explicit or counted on from the previous one.
    pub value: u64,
}

/// The integer width of an enum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EnumKind {
    E8,
    E16,
    E32,
    E64,
}

impl EnumKind {
    /// The largest value this width holds.
    pub fn max(self) -> u64 {
        match self {
            EnumKind::E8 => u64::from(u8::MAX),
            EnumKind::E16 => u64::from(u16::MAX),
            EnumKind::E32 => u64::from(u32::MAX),
            EnumKind::E64 => u64::MAX,
        }
    }
}

/// A primitive type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    Uint,
    Int,
    F32,
    F64,
    Bool,
    String,
    Void,
}

/// The shape of a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// A primitive.
    Primitive(Primitive),
    /// `data` or `data<N>`. `data<0>` is read as `data`.
    Data(Option<u64>),
    /// `optional<T>`
    Optional(Box<Type>),
    /// `[N]T` or `[]T`. `[0]T` is read as `[]T`.
    Array {
        /// Element type.
        member: Box<Type>,
        /// Fixed length, or `None` for a variable-length array.
        len: Option<u64>,
    },
    /// `map[K]V`
    Map {
        /// Key type.
        key: Box<Type>,
        /// Value type.
        value: Box<Type>,
    },
    /// `{ name: T ... }`
    Struct(Vec<StructField>),
    /// A reference to a user-defined type, unresolved.
    Named(String),
    /// `(A | B = 3 | ...)`
    Union(Vec<UnionMember>),
}

/// A struct field. Declaration order is wire order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
}

/// One arm of a union type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionMember {
    /// The member type.
    pub ty: Type,
    /// Its tag, explicit or counted on from the previous member. Tags are
    /// one byte on the wire.
    pub tag: u8,
}

impl Decl {
    /// The declared name.
    pub fn name(&self) -> &str {
        match self {
            Decl::Type(t) => &t.name,
            Decl::Enum(e) => &e.name,
        }
    }
}

impl Schema {
    /// Iterates over the declarations in document order.
    pub fn iter(&self) -> Iter<Decl> { self.decls.iter() }

    /// The number of declarations.
    pub fn len(&self) -> usize { self.decls.len() }

    /// Whether the document declares nothing.
    pub fn is_empty(&self) -> bool { self.decls.is_empty() }

    /// The `type` declarations, in document order.
    pub fn user_types(&self) -> impl Iterator<Item = &UserDefinedType> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Type(t) => Some(t),
            Decl::Enum(_) => None,
        })
    }

    /// The `enum` declarations, in document order.
    pub fn enums(&self) -> impl Iterator<Item = &UserDefinedEnum> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Enum(e) => Some(e),
            Decl::Type(_) => None,
        })
    }

    /// The `type` declarations whose type is a union, in document order.
    pub fn unions(&self) -> impl Iterator<Item = &UserDefinedType> {
        self.user_types().filter(|t| match t.ty {
            Type::Union(_) => true,
            _ => false,
        })
    }

    /// The first declaration named `name`.
    pub fn get(&self, name: &str) -> Option<&Decl> { self.decls.iter().find(|d| d.name() == name) }
}

impl<'a> IntoIterator for &'a Schema {
    type IntoIter = Iter<'a, Decl>;
    type Item = &'a Decl;

    fn into_iter(self) -> Self::IntoIter { self.decls.iter() }
}
