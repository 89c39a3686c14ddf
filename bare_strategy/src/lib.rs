use bare::schema::{
    keyword, Decl, EnumKind, EnumValue, Primitive, Schema, StructField, Type, UnionMember,
    UserDefinedEnum, UserDefinedType,
};
use bytes::Bytes;
use proptest::prelude::*;

/// arbitrary Bytes for use with proptest
pub fn arb_bytes() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..64).prop_map(Bytes::from)
}

/// arbitrary type or enum name; never a keyword, since keywords are lowercase
pub fn arb_identifier() -> impl Strategy<Value = String> { "[A-Z][A-Za-z0-9_]{0,8}" }

/// arbitrary struct field name
pub fn arb_field_name() -> impl Strategy<Value = String> {
    "[a-z][A-Za-z0-9_]{0,8}".prop_filter("keywords are not names", |s| keyword(s).is_none())
}

/// arbitrary primitive type
pub fn arb_primitive() -> impl Strategy<Value = Primitive> {
    prop_oneof![
        Just(Primitive::U8),
        Just(Primitive::U16),
        Just(Primitive::U32),
        Just(Primitive::U64),
        Just(Primitive::I8),
        Just(Primitive::I16),
        Just(Primitive::I32),
        Just(Primitive::I64),
        Just(Primitive::Uint),
        Just(Primitive::Int),
        Just(Primitive::F32),
        Just(Primitive::F64),
        Just(Primitive::Bool),
        Just(Primitive::String),
        Just(Primitive::Void),
    ]
}

/// arbitrary enum width
pub fn arb_enum_kind() -> impl Strategy<Value = EnumKind> {
    prop_oneof![
        Just(EnumKind::E8),
        Just(EnumKind::E16),
        Just(EnumKind::E32),
        Just(EnumKind::E64),
    ]
}

/// arbitrary fixed length; zero is not a fixed length
fn arb_len() -> impl Strategy<Value = Option<u64>> { prop::option::of(1..1024u64) }

/// arbitrary type expression, as the parser would produce it
pub fn arb_type() -> impl Strategy<Value = Type> {
    let leaf = prop_oneof![
        arb_primitive().prop_map(Type::Primitive),
        arb_len().prop_map(Type::Data),
        arb_identifier().prop_map(Type::Named),
    ];
    leaf.prop_recursive(
        4,  // max depth
        32, // max nodes
        4,  // max items per collection
        |inner| {
            prop_oneof![
                inner.clone().prop_map(|t| Type::Optional(Box::new(t))),
                (inner.clone(), arb_len()).prop_map(|(t, len)| Type::Array {
                    member: Box::new(t),
                    len,
                }),
                (inner.clone(), inner.clone()).prop_map(|(k, v)| Type::Map {
                    key: Box::new(k),
                    value: Box::new(v),
                }),
                prop::collection::vec((arb_field_name(), inner.clone()), 0..4).prop_map(
                    |fields| Type::Struct(
                        fields
                            .into_iter()
                            .map(|(name, ty)| StructField { name, ty })
                            .collect()
                    )
                ),
                prop::collection::vec((inner, any::<u8>()), 1..4).prop_map(|members| Type::Union(
                    members
                        .into_iter()
                        .map(|(ty, tag)| UnionMember { ty, tag })
                        .collect()
                )),
            ]
        },
    )
}

/// arbitrary enum declaration
pub fn arb_enum() -> impl Strategy<Value = UserDefinedEnum> {
    (
        arb_identifier(),
        arb_enum_kind(),
        prop::collection::vec((arb_identifier(), 0..256u64), 0..6),
    )
        .prop_map(|(name, kind, values)| UserDefinedEnum {
            name,
            kind,
            values: values
                .into_iter()
                .map(|(name, value)| EnumValue {
                    name: name.to_uppercase(),
                    value,
                })
                .collect(),
        })
}

/// arbitrary top-level declaration
pub fn arb_decl() -> impl Strategy<Value = Decl> {
    prop_oneof![
        (arb_identifier(), arb_type()).prop_map(|(name, ty)| Decl::Type(UserDefinedType { name, ty })),
        arb_enum().prop_map(Decl::Enum),
    ]
}

/// arbitrary schema document
pub fn arb_schema() -> impl Strategy<Value = Schema> {
    prop::collection::vec(arb_decl(), 0..6).prop_map(|decls| Schema { decls })
}
