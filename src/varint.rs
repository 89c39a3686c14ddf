//! The variable-length `uint` and `int` types.
//!
//! Rust's fixed-width integers encode as BARE's fixed-width types (`u32` is
//! always four bytes). Wrap a value in [`Uint`] or [`Int`] to get the
//! variable-length encodings instead.

use crate::from_fn;
use std::fmt;

/// A BARE `uint`: an unsigned LEB128 varint.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Uint(pub u64);

/// A BARE `int`: a zigzag-mapped LEB128 varint.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Int(pub i64);

from_fn!(Uint, u8, |u: u8| Uint(u64::from(u)));
from_fn!(Uint, u16, |u: u16| Uint(u64::from(u)));
from_fn!(Uint, u32, |u: u32| Uint(u64::from(u)));
from_fn!(Uint, u64, Uint);
from_fn!(u64, Uint, |u: Uint| u.0);

from_fn!(Int, i8, |i: i8| Int(i64::from(i)));
from_fn!(Int, i16, |i: i16| Int(i64::from(i)));
from_fn!(Int, i32, |i: i32| Int(i64::from(i)));
from_fn!(Int, i64, Int);
from_fn!(i64, Int, |i: Int| i.0);

impl fmt::Display for Uint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.0.fmt(f) }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.0.fmt(f) }
}
