//! The encoding context: union registry plus decoder limits.

use crate::{
    encoding::{De, Deserializer, Ser, Serializer},
    errors::Error,
    limits::Limits,
    unions::{Entry, Member, Registry, Union},
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::{any::type_name, sync::Arc};

static GLOBAL: Lazy<Context> = Lazy::new(Context::new);

/// Everything marshalling needs besides the value: which unions exist and
/// how large a decoded value may get.
///
/// Contexts are independent of each other. The free functions of this crate
/// ([`marshal`](crate::marshal), [`register`](crate::register), ...) use
/// [`Context::global`].
///
/// # Example
///
/// ```
/// use bare::{Context, Error, Limit, Limits};
///
/// let cx = Context::new();
/// cx.set_limits(Limits {
///     max_array_len: 64,
///     ..Limits::default()
/// });
///
/// match cx.unmarshal::<Vec<u8>>(&[100]) {
///     Err(Error::LimitExceeded { limit, value, max }) => {
///         assert_eq!((limit, value, max), (Limit::ArrayLength, 100, 64))
///     }
///     other => panic!("{:?}", other),
/// }
/// ```
pub struct Context {
    unions: RwLock<Registry>,
    limits: RwLock<Limits>,
}

impl Default for Context {
    fn default() -> Self { Context::new() }
}

impl Context {
    /// A context with no unions and the default limits.
    pub fn new() -> Self { Context::with_limits(Limits::default()) }

    /// A context with no unions and the given limits.
    pub fn with_limits(limits: Limits) -> Self {
        Context {
            unions: RwLock::new(Registry::default()),
            limits: RwLock::new(limits),
        }
    }

    /// The process-wide context, created on first use.
    pub fn global() -> &'static Context { &GLOBAL }

    /// The current limits.
    pub fn limits(&self) -> Limits { *self.limits.read() }

    /// Replaces the limits. Decodes already in progress may see either.
    pub fn set_limits(&self, limits: Limits) { *self.limits.write() = limits }

    /// Registers `U` with the members it declares in [`Union::members`].
    ///
    /// # Panics
    ///
    /// See [`Context::register_union`].
    pub fn register<U: Union>(&self) { self.register_union(U::members()) }

    /// Registers `U` with an explicit member list.
    ///
    /// Registering the same members again is a no-op.
    ///
    /// # Panics
    ///
    /// If `members` is empty, repeats a tag or a member type, or `U` was
    /// already registered with different members.
    pub fn register_union<U: Union>(&self, members: Vec<Member<U>>) {
        let count = members.len();
        if self.unions.write().insert(members) {
            log::debug!("registered union {} with {} members", type_name::<U>(), count);
        }
    }

    /// Whether `U` has been registered.
    pub fn is_registered<U: Union>(&self) -> bool { self.unions.read().contains::<U>() }

    pub(crate) fn entry<U: Union>(&self) -> Result<Arc<Entry<U>>, Error> {
        self.unions
            .read()
            .get::<U>()
            .ok_or_else(|| Error::UnregisteredUnion(type_name::<U>()))
    }

    /// The tag `value` is written with.
    pub fn tag_for<U: Union>(&self, value: &U) -> Result<u8, Error> {
        self.entry::<U>()?.tag_for(value)
    }

    /// The member registered under `tag`.
    pub fn resolve<U: Union>(&self, tag: u8) -> Result<Member<U>, Error> {
        self.entry::<U>()?.resolve(tag).map(|m| *m)
    }

    /// Encodes `v` into a fresh buffer.
    pub fn marshal<T: Ser + ?Sized>(&self, v: &T) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        v.ser(&mut out, self)?;
        Ok(out)
    }

    /// Encodes `v` into `s`. On error, `s` may hold a partial value.
    pub fn marshal_into<T: Ser + ?Sized, S: Serializer + ?Sized>(
        &self,
        v: &T,
        s: &mut S,
    ) -> Result<(), Error> {
        v.ser(s, self)
    }

    /// Decodes a `T` from the front of `input`. Trailing bytes are ignored.
    pub fn unmarshal<T: De>(&self, mut input: &[u8]) -> Result<T, Error> {
        T::de(&mut input, self)
    }

    /// Decodes a `T` from `d`, leaving whatever follows it.
    pub fn unmarshal_from<T: De, D: Deserializer + ?Sized>(&self, d: &mut D) -> Result<T, Error> {
        T::de(d, self)
    }
}
