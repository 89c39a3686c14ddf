//! Schema types for Rust types.

use super::ast::{Primitive, Type};
use crate::{
    varint::{Int, Uint},
    vecmap::VecMap,
};
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};

/// A Rust type whose encoding has a schema type.
///
/// `#[derive(Bare)]` implements this too: structs describe themselves as
/// struct types, while enums and unions are [`Type::Named`] after the Rust
/// type.
pub trait SchemaFor {
    /// The schema type this type encodes as.
    fn schema_type() -> Type;
}

/// The schema type of `T`.
///
/// # Example
///
/// ```
/// use bare::schema::schema_for;
/// use std::collections::HashMap;
///
/// assert_eq!(schema_for::<Option<Vec<u16>>>().to_string(), "optional<[]u16>");
/// assert_eq!(schema_for::<HashMap<String, [u8; 4]>>().to_string(), "map[string][4]u8");
/// ```
pub fn schema_for<T: SchemaFor + ?Sized>() -> Type { T::schema_type() }

macro_rules! prim {
    ($($t:ty => $p:ident),* $(,)?) => {
        $(
            impl SchemaFor for $t {
                fn schema_type() -> Type { Type::Primitive(Primitive::$p) }
            }
        )*
    };
}

prim!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    Uint => Uint,
    Int => Int,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    str => String,
    String => String,
    () => Void,
);

impl SchemaFor for Bytes {
    fn schema_type() -> Type { Type::Data(None) }
}

impl<T: SchemaFor + ?Sized> SchemaFor for &T {
    fn schema_type() -> Type { T::schema_type() }
}

impl<T: SchemaFor + ?Sized> SchemaFor for Box<T> {
    fn schema_type() -> Type { T::schema_type() }
}

impl<T: SchemaFor> SchemaFor for Option<T> {
    fn schema_type() -> Type { Type::Optional(Box::new(T::schema_type())) }
}

fn array<T: SchemaFor>(len: Option<u64>) -> Type {
    Type::Array {
        member: Box::new(T::schema_type()),
        len,
    }
}

impl<T: SchemaFor, const N: usize> SchemaFor for [T; N] {
    fn schema_type() -> Type { array::<T>(if N == 0 { None } else { Some(N as u64) }) }
}

impl<T: SchemaFor> SchemaFor for [T] {
    fn schema_type() -> Type { array::<T>(None) }
}

impl<T: SchemaFor> SchemaFor for Vec<T> {
    fn schema_type() -> Type { array::<T>(None) }
}

fn map<K: SchemaFor, V: SchemaFor>() -> Type {
    Type::Map {
        key: Box::new(K::schema_type()),
        value: Box::new(V::schema_type()),
    }
}

impl<K: SchemaFor, V: SchemaFor, H> SchemaFor for HashMap<K, V, H> {
    fn schema_type() -> Type { map::<K, V>() }
}

impl<K: SchemaFor, V: SchemaFor> SchemaFor for BTreeMap<K, V> {
    fn schema_type() -> Type { map::<K, V>() }
}

impl<K: SchemaFor + Ord, V: SchemaFor> SchemaFor for VecMap<K, V> {
    fn schema_type() -> Type { map::<K, V>() }
}
