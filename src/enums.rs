//! BARE enums: named unsigned values, written as a `uint`.

use crate::{
    encoding::{Deserializer, DeserializerExt, Serializer, SerializerExt},
    errors::Error,
};
use std::any::type_name;

/// A field-less enum with an explicit value per variant.
///
/// `#[derive(Bare)]` implements this together with `Ser`, `De` and
/// `Display` for enums without fields.
///
/// # Example
///
/// ```
/// use bare::prelude::*;
///
/// #[derive(Bare, Copy, Clone, Debug, PartialEq)]
/// #[repr(u8)]
/// enum Department {
///     Accounting,
///     Administration,
///     CustomerService,
///     Development = 99,
/// }
///
/// assert_eq!(Department::CustomerService.value(), 2);
/// assert_eq!(Department::from_value(99), Some(Department::Development));
/// assert_eq!(Department::name_of(3), None);
/// assert_eq!(Department::Development.to_string(), "DEVELOPMENT");
/// ```
pub trait BareEnum: Sized + 'static {
    /// The variant's value.
    fn value(&self) -> u64;

    /// The variant with value `v`, if there is one.
    fn from_value(v: u64) -> Option<Self>;

    /// The variant's name as written in a schema.
    fn name(&self) -> &'static str;

    /// The name of the variant with value `v`, if there is one.
    fn name_of(v: u64) -> Option<&'static str> { Self::from_value(v).map(|e| e.name()) }
}

/// Writes an enum value.
pub fn ser_enum<E: BareEnum, S: Serializer + ?Sized>(e: &E, s: &mut S) -> Result<(), Error> {
    s.put_uint(e.value())
}

/// Reads an enum value, rejecting values no variant has.
pub fn de_enum<E: BareEnum, D: Deserializer + ?Sized>(d: &mut D) -> Result<E, Error> {
    let value = d.read_uint()?;
    E::from_value(value).ok_or_else(|| Error::UnknownEnumValue {
        name: type_name::<E>(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum Flag {
        Off,
        On,
    }

    impl BareEnum for Flag {
        fn value(&self) -> u64 { *self as u64 }

        fn from_value(v: u64) -> Option<Self> {
            match v {
                0 => Some(Flag::Off),
                1 => Some(Flag::On),
                _ => None,
            }
        }

        fn name(&self) -> &'static str {
            match self {
                Flag::Off => "OFF",
                Flag::On => "ON",
            }
        }
    }

    #[test]
    fn unknown_values_are_errors() {
        let mut input: &[u8] = &[0x01, 0x07];
        assert_eq!(de_enum::<Flag, _>(&mut input).unwrap(), Flag::On);
        match de_enum::<Flag, _>(&mut input) {
            Err(Error::UnknownEnumValue { value, .. }) => assert_eq!(value, 7),
            other => panic!("expected an unknown value, got {:?}", other),
        }
        assert_eq!(Flag::name_of(1), Some("ON"));
        assert_eq!(Flag::name_of(7), None);
    }

    #[test]
    fn written_as_uint() {
        let mut out: Vec<u8> = Vec::new();
        ser_enum(&Flag::On, &mut out).unwrap();
        assert_eq!(out, vec![0x01]);
    }
}
