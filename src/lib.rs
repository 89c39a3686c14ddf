//! # BARE
//!
//! An encoder and decoder for BARE, a compact schema-driven binary format,
//! plus a parser for its schema language.
//!
//! # Usage
//!
//! The traits [`Ser`] and [`De`] say how a type is written and read. They
//! are implemented for the primitive and standard collection types and can
//! usually be derived:
//!
//! ```
//! use bare::prelude::*;
//!
//! #[derive(Bare, Debug, PartialEq)]
//! struct Customer {
//!     name: String,
//!     email: String,
//!     orders: Vec<Order>,
//!     #[bare(skip)]
//!     cached_total: u64,
//! }
//!
//! #[derive(Bare, Debug, PartialEq)]
//! struct Order {
//!     order_id: i64,
//!     quantity: i32,
//! }
//!
//! let customer = Customer {
//!     name: "James Smith".to_string(),
//!     email: "jsmith@example.org".to_string(),
//!     orders: vec![Order { order_id: 4242424242, quantity: 5 }],
//!     cached_total: 0,
//! };
//!
//! let encoded = marshal(&customer).unwrap();
//! let decoded: Customer = unmarshal(&encoded).unwrap();
//!
//! assert_eq!(decoded, customer);
//! ```
//!
//! Field-less enums become BARE enums, and enums whose variants each hold a
//! single value become unions; see [`enums`] and [`unions`].
//!
//! # Contexts
//!
//! Unions are resolved through a registry and decoding is bounded by
//! [`Limits`]; both live in a [`Context`]. The free functions ([`marshal`],
//! [`unmarshal`], [`register`], ...) use the process-wide
//! [`Context::global`]. Create a [`Context`] of your own to keep
//! registrations and limits apart from the rest of the process.
//!
//! # Encoding
//!
//! All multi-byte fixed-width values are little-endian. Lengths and counts
//! are `uint`s.
//!
//! * `uint`: LEB128. Seven bits per byte, least significant group first,
//!   high bit set on every byte but the last. At most ten bytes, and never
//!   with a trailing zero group.
//! * `int`: zigzag mapped (`0, -1, 1, -2, ...` to `0, 1, 2, 3, ...`) then
//!   written as a `uint`.
//! * `bool`: one byte, `0x00` or `0x01`.
//! * `string`, `data`: length then bytes. Strings must be UTF-8.
//! * `data<N>`, `[N]T`: exactly `N` bytes or elements, no length.
//! * `optional<T>`: `0x00`, or `0x01` followed by `T`.
//! * `[]T`, `map[K]V`: count then elements or key/value pairs. Maps may not
//!   repeat a key.
//! * structs: fields in declaration order.
//! * enums: the value as a `uint`.
//! * unions: a one-byte tag then the member.
//!
//! Decoding stops after the value; trailing input is not an error.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

extern crate self as bare;

/// `#[derive(Bare)]`.
pub use bare_derive::Bare;

pub mod context;
pub mod encoding;
pub mod enums;
pub mod errors;
pub mod limits;
pub mod prelude;
pub mod schema;
pub mod unions;
pub mod util;
pub mod varint;
pub mod vecmap;

pub use context::Context;
pub use encoding::{marshal, marshal_into, unmarshal, unmarshal_from, De, Ser};
pub use enums::BareEnum;
pub use errors::{Error, Limit, SchemaError};
pub use limits::Limits;
pub use unions::{Member, Union, UnionMember};
pub use varint::{Int, Uint};
pub use vecmap::VecMap;

/// Registers `U` with the global context. See [`Context::register`].
pub fn register<U: Union>() { Context::global().register::<U>() }

/// Registers `U` with an explicit member list on the global context. See
/// [`Context::register_union`].
pub fn register_union<U: Union>(members: Vec<Member<U>>) {
    Context::global().register_union(members)
}
