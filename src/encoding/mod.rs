//! # BARE binary encoder and decoder
//!
//! Values are written through a [`Serializer`] and read through a
//! [`Deserializer`]. The [`Ser`] and [`De`] traits describe how each type
//! maps onto the wire:
//!
//! | Rust type                      | BARE type       | Encoding                             |
//! |--------------------------------|-----------------|--------------------------------------|
//! | `u8` .. `u64`, `i8` .. `i64`   | `u8` .. `i64`   | fixed width, little-endian           |
//! | `f32`, `f64`                   | `f32`, `f64`    | IEEE-754 bits, little-endian         |
//! | [`Uint`], [`Int`]              | `uint`, `int`   | LEB128, zigzag for `int`             |
//! | `bool`                         | `bool`          | `0x00` or `0x01`                     |
//! | `String`, `str`                | `string`        | `uint` length, then UTF-8            |
//! | [`Bytes`](bytes::Bytes)        | `data`          | `uint` length, then bytes            |
//! | `()`                           | `void`          | nothing                              |
//! | `Option<T>`                    | `optional<T>`   | `0x00`, or `0x01` then `T`           |
//! | `[T; N]`                       | `[N]T`          | `N` elements, no count               |
//! | `Vec<T>`, `[T]`                | `[]T`           | `uint` count, then elements          |
//! | `HashMap`, `BTreeMap`, `VecMap`| `map[K]V`       | `uint` count, then key/value pairs   |
//!
//! Structs, enums and unions get their impls from `#[derive(Bare)]`.
//!
//! # Example
//!
//! ```
//! use bare::prelude::*;
//!
//! #[derive(Bare, PartialEq, Debug)]
//! struct Coordinates {
//!     x: Uint,
//!     y: Uint,
//!     z: Uint,
//! }
//!
//! let c = Coordinates {
//!     x: Uint(1),
//!     y: Uint(2),
//!     z: Uint(3),
//! };
//!
//! let enc = marshal(&c).unwrap();
//! assert_eq!(enc, vec![0x01, 0x02, 0x03]);
//!
//! let dec: Coordinates = unmarshal(&enc).unwrap();
//! assert_eq!(dec, c);
//! ```

use crate::{
    context::Context,
    errors::{Error, Limit},
    util::*,
    varint::{Int, Uint},
    vecmap::VecMap,
};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;

/// Encodes `v` with the global context.
///
/// # Arguments
///
/// * `v: &T` - The value to be encoded.
///
/// # Example
///
/// ```
/// use bare::marshal;
///
/// assert_eq!(marshal(&0xdead_beef_u32).unwrap(), vec![0xef, 0xbe, 0xad, 0xde]);
/// ```
pub fn marshal<T: Ser + ?Sized>(v: &T) -> Result<Vec<u8>, Error> { Context::global().marshal(v) }

/// Encodes `v` into `s` with the global context.
///
/// # Arguments
///
/// * `v: &T` - The value to be encoded.
/// * `s: &mut S` - Where the encoder output will be written. On error, it may
///   hold part of the value.
pub fn marshal_into<T: Ser + ?Sized, S: Serializer + ?Sized>(v: &T, s: &mut S) -> Result<(), Error> {
    Context::global().marshal_into(v, s)
}

/// Decodes a `T` from the front of `input` with the global context.
///
/// Bytes after the value are ignored.
///
/// # Example
///
/// ```
/// use bare::{unmarshal, Error};
///
/// assert_eq!(unmarshal::<i8>(&[0xd6]).unwrap(), -42);
/// assert!(matches!(unmarshal::<bool>(&[0x02]), Err(Error::InvalidBoolValue(2))));
/// ```
pub fn unmarshal<T: De>(input: &[u8]) -> Result<T, Error> { Context::global().unmarshal(input) }

/// Decodes a `T` from `d` with the global context.
pub fn unmarshal_from<T: De, D: Deserializer + ?Sized>(d: &mut D) -> Result<T, Error> {
    Context::global().unmarshal_from(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limits;
    use bytes::Bytes;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn fixed_width() {
        assert_eq!(marshal(&0xdead_beef_u32).unwrap(), vec![0xef, 0xbe, 0xad, 0xde]);
        assert_eq!(marshal(&-42i8).unwrap(), vec![0xd6]);
        assert_eq!(marshal(&1337.42f32).unwrap(), vec![0x71, 0x2d, 0xa7, 0x44]);
        assert_eq!(unmarshal::<f32>(&[0x71, 0x2d, 0xa7, 0x44]).unwrap(), 1337.42);
        assert_eq!(marshal(&()).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn varints() {
        assert_eq!(marshal(&Uint(0x7f)).unwrap(), vec![0x7f]);
        assert_eq!(marshal(&Uint(0x1337)).unwrap(), vec![0xb7, 0x26]);
        assert_eq!(marshal(&Int(42)).unwrap(), vec![0x54]);
        assert_eq!(marshal(&Int(-1337)).unwrap(), vec![0xf1, 0x14]);
        assert_eq!(unmarshal::<Int>(&[0xf1, 0x14]).unwrap(), Int(-1337));
    }

    #[test]
    fn strings() {
        let s = "こんにちは、世界！";
        let enc = marshal(s).unwrap();
        assert_eq!(enc[0], 0x1b);
        assert_eq!(enc.len(), 1 + 0x1b);
        assert_eq!(unmarshal::<String>(&enc).unwrap(), s);
    }

    #[test]
    fn bools() {
        assert_eq!(unmarshal::<bool>(&[0x01]).unwrap(), true);
        assert!(matches!(unmarshal::<bool>(&[0x02]), Err(Error::InvalidBoolValue(2))));
    }

    #[test]
    fn optionals() {
        assert_eq!(marshal(&None::<u32>).unwrap(), vec![0x00]);
        assert_eq!(marshal(&Some(0xdead_beef_u32)).unwrap(), vec![0x01, 0xef, 0xbe, 0xad, 0xde]);
        assert_eq!(unmarshal::<Option<u32>>(&[0x00]).unwrap(), None);
        assert!(matches!(
            unmarshal::<Option<u32>>(&[0x02]),
            Err(Error::InvalidOptionalValue(2))
        ));
    }

    #[test]
    fn arrays() {
        assert_eq!(marshal(&[0x11u8, 0x22, 0x33, 0x44]).unwrap(), vec![0x11, 0x22, 0x33, 0x44]);
        assert_eq!(marshal(&vec![0x11u8, 0x22]).unwrap(), vec![0x02, 0x11, 0x22]);
        assert_eq!(unmarshal::<[u8; 2]>(&[0x11, 0x22]).unwrap(), [0x11, 0x22]);
        assert_eq!(unmarshal::<Vec<u16>>(&[0x01, 0x34, 0x12]).unwrap(), vec![0x1234]);
    }

    #[test]
    fn data_and_slices_agree() {
        let data = Bytes::from_static(b"\x01\x02\x03");
        assert_eq!(marshal(&data).unwrap(), marshal(&vec![1u8, 2, 3]).unwrap());
    }

    #[test]
    fn maps() {
        let mut m = BTreeMap::new();
        m.insert(1u8, 0x11u8);
        m.insert(2, 0x22);
        m.insert(3, 0x33);
        let enc = marshal(&m).unwrap();
        assert_eq!(enc, vec![0x03, 0x01, 0x11, 0x02, 0x22, 0x03, 0x33]);
        assert_eq!(unmarshal::<BTreeMap<u8, u8>>(&enc).unwrap(), m);
        let hm: HashMap<u8, u8> = unmarshal(&enc).unwrap();
        assert_eq!(hm.get(&2), Some(&0x22));
        let vm: VecMap<u8, u8> = unmarshal(&enc).unwrap();
        assert_eq!(marshal(&vm).unwrap(), enc);
    }

    #[test]
    fn duplicate_keys() {
        let enc = [0x02, 0x01, 0x11, 0x01, 0x22];
        for res in vec![
            unmarshal::<BTreeMap<u8, u8>>(&enc).map(|_| ()),
            unmarshal::<HashMap<u8, u8>>(&enc).map(|_| ()),
            unmarshal::<VecMap<u8, u8>>(&enc).map(|_| ()),
        ] {
            match res {
                Err(Error::DuplicateMapKey(k)) => assert_eq!(k, "1"),
                other => panic!("expected a duplicate key, got {:?}", other),
            }
        }
    }

    #[test]
    fn limits() {
        let cx = Context::with_limits(Limits {
            max_array_len: 64,
            max_map_len: 2,
            max_data_len: 4,
            max_depth: 8,
        });
        match cx.unmarshal::<Vec<u8>>(&[100]) {
            Err(Error::LimitExceeded { limit, value, max }) => {
                assert_eq!((limit, value, max), (Limit::ArrayLength, 100, 64))
            }
            other => panic!("expected a limit error, got {:?}", other),
        }
        let err = cx.unmarshal::<BTreeMap<u8, u8>>(&[3]).unwrap_err();
        assert!(err.is_limit());
        let err = cx.unmarshal::<String>(&[5, b'h', b'e', b'l', b'l', b'o']).unwrap_err();
        assert!(err.is_limit());
        assert_eq!(cx.unmarshal::<String>(&[4, b'h', b'e', b'l', b'l']).unwrap(), "hell");
    }

    #[test]
    fn truncated() {
        assert!(matches!(unmarshal::<u32>(&[0x01, 0x02]), Err(Error::UnexpectedEndOfInput)));
        assert!(matches!(unmarshal::<String>(&[0x03, b'a']), Err(Error::UnexpectedEndOfInput)));
    }

    /// A hand-written hook replaces the default encoding.
    #[derive(Debug, PartialEq)]
    struct Shifted(u8);

    impl Ser for Shifted {
        fn ser<S: Serializer + ?Sized>(&self, s: &mut S, _: &Context) -> Result<(), Error> {
            s.put_u16(u16::from(self.0) << 8)
        }
    }

    impl De for Shifted {
        fn de<D: Deserializer + ?Sized>(d: &mut D, _: &Context) -> Result<Self, Error> {
            let raw = d.read_u16()?;
            if raw & 0xff != 0 {
                return Err(Error::Invalid(format!("low byte set in {:#06x}", raw)));
            }
            Ok(Shifted((raw >> 8) as u8))
        }
    }

    #[test]
    fn custom_hook() {
        assert_eq!(marshal(&Shifted(0x42)).unwrap(), vec![0x00, 0x42]);
        assert_eq!(unmarshal::<Shifted>(&[0x00, 0x42]).unwrap(), Shifted(0x42));
        assert!(matches!(unmarshal::<Shifted>(&[0x01, 0x42]), Err(Error::Invalid(_))));
    }
}
