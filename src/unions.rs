//! Tagged unions and the registry that maps their tags to member types.
//!
//! A union is a closed Rust enum with one single-field variant per member
//! type. Each member carries a one-byte tag; on the wire a union is its tag
//! followed by the member's own encoding.
//!
//! Unions must be registered with the [`Context`] that encodes or decodes
//! them, either through [`Context::register`] (members from
//! [`Union::members`]) or [`Context::register_union`] (an explicit list).
//!
//! # Example
//!
//! ```
//! use bare::prelude::*;
//!
//! #[derive(Bare, Debug, PartialEq)]
//! struct Name(String);
//!
//! #[derive(Bare, Debug, PartialEq)]
//! struct Age(Int);
//!
//! #[derive(Bare, Debug, PartialEq)]
//! enum Person {
//!     Name(Name),
//!     Age(Age),
//! }
//!
//! let cx = Context::new();
//! cx.register::<Person>();
//!
//! let enc = cx.marshal(&Person::Age(Age(Int(24)))).unwrap();
//! assert_eq!(enc, vec![0x01, 0x30]);
//!
//! let dec: Person = cx.unmarshal(&enc).unwrap();
//! assert_eq!(dec, Person::Age(Age(Int(24))));
//! ```

use crate::{
    context::Context,
    encoding::{De, Deserializer, Ser, Serializer},
    errors::Error,
};
use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

/// A closed set of member types, one of which is present at a time.
pub trait Union: Sized + 'static {
    /// The members registered by [`Context::register`], in any order.
    fn members() -> Vec<Member<Self>>;

    /// The tag this value reports for itself, if it knows it.
    ///
    /// When this returns `None` the registry finds the tag by asking each
    /// member whether it holds the value.
    fn union_tag(&self) -> Option<u8> { None }
}

/// A type that can be one arm of the union `U`.
pub trait UnionMember<U: Union>: Ser + De + 'static {
    /// Wraps `self` in the union.
    fn into_union(self) -> U;

    /// Borrows the member out of `u`, if `u` holds this member type.
    fn from_union(u: &U) -> Option<&Self>;
}

/// One arm of a union: its tag and how to encode or decode it.
pub struct Member<U> {
    tag: u8,
    type_id: TypeId,
    type_name: &'static str,
    matches: fn(&U) -> bool,
    encode: fn(&U, &mut dyn Serializer, &Context) -> Result<(), Error>,
    decode: fn(&mut dyn Deserializer, &Context) -> Result<U, Error>,
}

impl<U> Clone for Member<U> {
    fn clone(&self) -> Self { *self }
}

impl<U> Copy for Member<U> {}

impl<U> fmt::Debug for Member<U> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Member")
            .field("tag", &self.tag)
            .field("type", &self.type_name)
            .finish()
    }
}

fn holds<U: Union, T: UnionMember<U>>(u: &U) -> bool { T::from_union(u).is_some() }

fn encode_member<U: Union, T: UnionMember<U>>(
    u: &U,
    s: &mut dyn Serializer,
    cx: &Context,
) -> Result<(), Error> {
    match T::from_union(u) {
        Some(t) => t.ser(s, cx),
        None => Err(Error::UnsupportedType(type_name::<T>())),
    }
}

fn decode_member<U: Union, T: UnionMember<U>>(
    d: &mut dyn Deserializer,
    cx: &Context,
) -> Result<U, Error> {
    T::de(d, cx).map(T::into_union)
}

impl<U: Union> Member<U> {
    /// The member type `T` under `tag`.
    pub fn of<T: UnionMember<U>>(tag: u8) -> Self {
        Member {
            tag,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            matches: holds::<U, T>,
            encode: encode_member::<U, T>,
            decode: decode_member::<U, T>,
        }
    }

    /// The member's tag.
    pub fn tag(&self) -> u8 { self.tag }

    /// The member type's name.
    pub fn type_name(&self) -> &'static str { self.type_name }

    /// The member type's identity.
    pub fn type_id(&self) -> TypeId { self.type_id }

    /// Whether `u` holds this member.
    pub fn holds(&self, u: &U) -> bool { (self.matches)(u) }

    /// Writes the member held by `u`, without the tag.
    pub fn encode(&self, u: &U, s: &mut dyn Serializer, cx: &Context) -> Result<(), Error> {
        (self.encode)(u, s, cx)
    }

    /// Reads this member and wraps it in the union.
    pub fn decode(&self, d: &mut dyn Deserializer, cx: &Context) -> Result<U, Error> {
        (self.decode)(d, cx)
    }
}

/// A registered union: its members sorted by tag.
pub(crate) struct Entry<U> {
    members: Vec<Member<U>>,
}

impl<U: Union> Entry<U> {
    fn same_members(&self, other: &[Member<U>]) -> bool {
        self.members.len() == other.len()
            && self
                .members
                .iter()
                .zip(other)
                .all(|(a, b)| a.tag == b.tag && a.type_id == b.type_id)
    }

    pub(crate) fn tag_for(&self, u: &U) -> Result<u8, Error> {
        match u.union_tag() {
            Some(tag) => self.resolve(tag).map(|m| m.tag),
            None => self
                .members
                .iter()
                .find(|m| m.holds(u))
                .map(|m| m.tag)
                .ok_or_else(|| Error::UnsupportedType(type_name::<U>())),
        }
    }

    pub(crate) fn resolve(&self, tag: u8) -> Result<&Member<U>, Error> {
        self.members
            .binary_search_by_key(&tag, |m| m.tag)
            .map(|ix| &self.members[ix])
            .map_err(|_| Error::UnknownUnionTag {
                union: type_name::<U>(),
                tag,
            })
    }
}

/// Union type identity to registered members.
///
/// Entries are shared out as `Arc`s so that no lock is held while a member
/// encodes or decodes.
#[derive(Default)]
pub(crate) struct Registry {
    entries: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Registry {
    /// Registers `U` with `members`. Returns `false` if the identical
    /// registration already existed.
    ///
    /// # Panics
    ///
    /// If `members` is empty, repeats a tag or a member type, or conflicts
    /// with an earlier registration of `U`.
    pub(crate) fn insert<U: Union>(&mut self, mut members: Vec<Member<U>>) -> bool {
        let union = type_name::<U>();
        if members.is_empty() {
            panic!("union {} registered without members", union);
        }
        members.sort_by_key(|m| m.tag);
        for (i, m) in members.iter().enumerate() {
            for prev in &members[..i] {
                if prev.tag == m.tag {
                    panic!(
                        "union {}: tag {} used by both {} and {}",
                        union, m.tag, prev.type_name, m.type_name
                    );
                }
                if prev.type_id == m.type_id {
                    panic!("union {}: member type {} registered twice", union, m.type_name);
                }
            }
        }

        if let Some(existing) = self.get::<U>() {
            if existing.same_members(&members) {
                return false;
            }
            panic!("union {} registered twice with different members", union);
        }

        self.entries
            .insert(TypeId::of::<U>(), Arc::new(Entry { members }));
        true
    }

    pub(crate) fn get<U: Union>(&self) -> Option<Arc<Entry<U>>> {
        let entry = self.entries.get(&TypeId::of::<U>())?.clone();
        entry.downcast::<Entry<U>>().ok()
    }

    pub(crate) fn contains<U: Union>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<U>())
    }
}

/// Writes a union: the tag of the member `u` holds, then that member.
///
/// This is the body of `Ser::ser` for every union type.
pub fn ser_union<U: Union, S: Serializer + ?Sized>(
    u: &U,
    mut s: &mut S,
    cx: &Context,
) -> Result<(), Error> {
    let entry = cx.entry::<U>()?;
    let tag = entry.tag_for(u)?;
    let member = entry.resolve(tag)?;
    s.put_u8(tag)?;
    member.encode(u, &mut s, cx)
}

/// Reads a union: a tag, then the member registered under it.
///
/// This is the body of `De::de` for every union type.
pub fn de_union<U: Union, D: Deserializer + ?Sized>(
    mut d: &mut D,
    cx: &Context,
) -> Result<U, Error> {
    let entry = cx.entry::<U>()?;
    let tag = d.take_u8()?;
    entry.resolve(tag)?.decode(&mut d, cx)
}
