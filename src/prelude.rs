pub use crate::{
    encoding::{
        marshal, marshal_into, unmarshal, unmarshal_from, De, Deserializer, DeserializerExt, Ser,
        Serializer, SerializerExt,
    },
    enums::BareEnum,
    register, register_union,
    schema::SchemaFor,
    unions::{Member, Union, UnionMember},
    Bare, Context, Error, Int, Limits, Uint, VecMap,
};
pub use bytes::Bytes;
