use super::*;
use bytes::{Buf, Bytes};
use std::{
    cell::Cell,
    collections::{btree_map, hash_map, BTreeMap, HashMap},
    convert::TryFrom,
    fmt::Debug,
    hash::{BuildHasher, Hash},
    io,
};

/// A byte source that BARE values are read from.
///
/// Running out of input in the middle of a value is
/// [`Error::UnexpectedEndOfInput`]. The trait is object safe.
pub trait Deserializer {
    /// Takes one byte from the input.
    fn take_u8(&mut self) -> Result<u8, Error>;

    /// Fills `buf` from the input.
    fn take_exact(&mut self, buf: &mut [u8]) -> Result<(), Error>;

    /// Takes the next `len` bytes from the input.
    ///
    /// `len` has already been checked against the data limit by the caller.
    fn take_bytes(&mut self, len: usize) -> Result<Bytes, Error> {
        // Grows with the input, so a lying length runs out of input first.
        let mut out = Vec::with_capacity(prealloc(len));
        let mut chunk = [0u8; PREALLOC_MAX];
        let mut left = len;
        while left > 0 {
            let n = left.min(PREALLOC_MAX);
            self.take_exact(&mut chunk[..n])?;
            out.extend_from_slice(&chunk[..n]);
            left -= n;
        }
        Ok(Bytes::from(out))
    }
}

/// Most elements or bytes reserved ahead of reading them.
const PREALLOC_MAX: usize = 4096;

#[inline]
fn prealloc(len: usize) -> usize { len.min(PREALLOC_MAX) }

thread_local! {
    static DEPTH: Cell<u64> = Cell::new(0);
}

/// One level of nesting on this thread, released on drop.
struct Nested;

impl Nested {
    fn enter(cx: &Context) -> Result<Nested, Error> {
        let max = cx.limits().max_depth;
        DEPTH.with(|depth| {
            let value = depth.get().saturating_add(1);
            if value > max {
                return Err(Error::LimitExceeded {
                    limit: Limit::Depth,
                    value,
                    max,
                });
            }
            depth.set(value);
            Ok(Nested)
        })
    }
}

impl Drop for Nested {
    fn drop(&mut self) { DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1))) }
}

macro_rules! buf_deserializer {
    ($t:ty) => {
        impl Deserializer for $t {
            #[inline]
            fn take_u8(&mut self) -> Result<u8, Error> {
                ensure_remaining(self.remaining(), 1)?;
                Ok(self.get_u8())
            }

            fn take_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
                ensure_remaining(self.remaining(), buf.len())?;
                self.copy_to_slice(buf);
                Ok(())
            }

            fn take_bytes(&mut self, len: usize) -> Result<Bytes, Error> {
                ensure_remaining(self.remaining(), len)?;
                Ok(self.copy_to_bytes(len))
            }
        }
    };
}

#[inline]
fn ensure_remaining(remaining: usize, n: usize) -> Result<(), Error> {
    if remaining < n {
        Err(Error::UnexpectedEndOfInput)
    } else {
        Ok(())
    }
}

buf_deserializer!(&[u8]);
// Slices the shared buffer instead of copying on `take_bytes`.
buf_deserializer!(Bytes);

impl<D: Deserializer + ?Sized> Deserializer for &mut D {
    fn take_u8(&mut self) -> Result<u8, Error> { (**self).take_u8() }

    fn take_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> { (**self).take_exact(buf) }

    fn take_bytes(&mut self, len: usize) -> Result<Bytes, Error> { (**self).take_bytes(len) }
}

/// A [`Deserializer`] over any [`io::Read`].
///
/// Reads exactly what each value needs and nothing more, so the remaining
/// input is left in the reader.
///
/// # Example
///
/// ```
/// use bare::{encoding::Reader, unmarshal_from, Int};
///
/// let input: &[u8] = &[0x54, 0xf1, 0x14];
/// let mut r = Reader::new(input);
///
/// assert_eq!(unmarshal_from::<Int, _>(&mut r).unwrap(), Int(42));
/// assert_eq!(unmarshal_from::<Int, _>(&mut r).unwrap(), Int(-1337));
/// ```
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
}

impl<R: io::Read> Reader<R> {
    /// Wraps `inner`.
    pub fn new(inner: R) -> Self { Reader { inner } }

    /// Unwraps the underlying reader.
    pub fn into_inner(self) -> R { self.inner }

    /// Borrows the underlying reader.
    pub fn get_ref(&self) -> &R { &self.inner }
}

impl<R: io::Read> Deserializer for Reader<R> {
    fn take_u8(&mut self) -> Result<u8, Error> {
        let mut b = [0u8; 1];
        self.take_exact(&mut b)?;
        Ok(b[0])
    }

    fn take_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        self.inner.read_exact(buf).map_err(Error::from_read)
    }
}

macro_rules! read_le {
    ($($name:ident: $t:ty),* $(,)?) => {
        $(
            #[doc = concat!("Read a little-endian [`", stringify!($t), "`] from the input.")]
            #[inline]
            fn $name(&mut self) -> Result<$t, Error> {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                self.take_exact(&mut buf)?;
                Ok(<$t>::from_le_bytes(buf))
            }
        )*
    };
}

/// Convenience methods for [`Deserializer`], one per BARE primitive.
pub trait DeserializerExt: Deserializer {
    read_le!(
        read_u16: u16,
        read_u32: u32,
        read_u64: u64,
        read_i16: i16,
        read_i32: i32,
        read_i64: i64,
    );

    /// Read a [`u8`] from the input.
    #[inline]
    fn read_u8(&mut self) -> Result<u8, Error> { self.take_u8() }

    /// Read an [`i8`] from the input.
    #[inline]
    fn read_i8(&mut self) -> Result<i8, Error> { Ok(self.take_u8()? as i8) }

    /// Read an [`f32`] from its IEEE-754 bits.
    #[inline]
    fn read_f32(&mut self) -> Result<f32, Error> { Ok(f32::from_bits(self.read_u32()?)) }

    /// Read an [`f64`] from its IEEE-754 bits.
    #[inline]
    fn read_f64(&mut self) -> Result<f64, Error> { Ok(f64::from_bits(self.read_u64()?)) }

    /// Read a [`bool`]. Any byte other than `0x00` or `0x01` is an error.
    fn read_bool(&mut self) -> Result<bool, Error> {
        match self.take_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(Error::InvalidBoolValue(b)),
        }
    }

    /// Read a `uint`.
    ///
    /// The varint must be minimally encoded and fit in 64 bits, otherwise
    /// this fails with [`Error::InvalidVarint`].
    fn read_uint(&mut self) -> Result<u64, Error> {
        let mut u = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let b = self.take_u8()?;
            if i == MAX_VARINT_LEN - 1 && b > 1 {
                return Err(Error::InvalidVarint);
            }
            u |= u64::from(b & 0x7f) << (7 * i);
            if b & 0x80 == 0 {
                if b == 0 && i > 0 {
                    return Err(Error::InvalidVarint);
                }
                return Ok(u);
            }
        }
        Err(Error::InvalidVarint)
    }

    /// Read an `int`.
    #[inline]
    fn read_int(&mut self) -> Result<i64, Error> { Ok(unzigzag(self.read_uint()?)) }

    /// Read a length prefix and check it against a limit.
    ///
    /// # Arguments
    ///
    /// * `limit: Limit` - Which limit `max` is, for the error.
    /// * `max: u64` - The largest length accepted.
    fn read_len(&mut self, limit: Limit, max: u64) -> Result<usize, Error> {
        let len = self.read_uint()?;
        if len > max {
            return Err(Error::LimitExceeded {
                limit,
                value: len,
                max,
            });
        }
        usize::try_from(len).map_err(|_| Error::LimitExceeded {
            limit,
            value: len,
            max: usize::MAX as u64,
        })
    }

    /// Read a variable-length `data` block of at most `max` bytes.
    fn read_data(&mut self, max: u64) -> Result<Bytes, Error> {
        let len = self.read_len(Limit::DataLength, max)?;
        self.take_bytes(len)
    }

    /// Read a `string` of at most `max` bytes, validating it as UTF-8.
    fn read_string(&mut self, max: u64) -> Result<String, Error> {
        let data = self.read_data(max)?;
        match std::str::from_utf8(&data) {
            Ok(s) => Ok(s.to_owned()),
            Err(_) => Err(Error::InvalidString),
        }
    }

    /// Fill `buf` with a `data<N>` block, where `N` is `buf.len()`.
    #[inline]
    fn read_fixed(&mut self, buf: &mut [u8]) -> Result<(), Error> { self.take_exact(buf) }
}

impl<D: Deserializer + ?Sized> DeserializerExt for D {}

/// A value that can be read from the BARE encoding.
///
/// Implement this by hand to replace the decoding of a type entirely, or
/// derive it with `#[derive(Bare)]`.
pub trait De: Sized {
    /// Reads a value from `d`.
    ///
    /// # Arguments
    ///
    /// * `d` - The input.
    /// * `cx` - The context that resolves union tags and supplies the limits.
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error>;
}

macro_rules! de_prim {
    ($($t:ty => $read:ident),* $(,)?) => {
        $(
            impl De for $t {
                #[inline]
                fn de<D: Deserializer + ?Sized>(d: &mut D, _: &Context) -> Result<Self, Error> {
                    d.$read()
                }
            }
        )*
    };
}

de_prim!(
    u8 => read_u8,
    u16 => read_u16,
    u32 => read_u32,
    u64 => read_u64,
    i8 => read_i8,
    i16 => read_i16,
    i32 => read_i32,
    i64 => read_i64,
    f32 => read_f32,
    f64 => read_f64,
    bool => read_bool,
);

impl De for Uint {
    fn de<D: Deserializer + ?Sized>(d: &mut D, _: &Context) -> Result<Self, Error> {
        d.read_uint().map(Uint)
    }
}

impl De for Int {
    fn de<D: Deserializer + ?Sized>(d: &mut D, _: &Context) -> Result<Self, Error> {
        d.read_int().map(Int)
    }
}

impl De for () {
    fn de<D: Deserializer + ?Sized>(_: &mut D, _: &Context) -> Result<Self, Error> { Ok(()) }
}

impl De for String {
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error> {
        d.read_string(cx.limits().max_data_len)
    }
}

impl De for Bytes {
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error> {
        d.read_data(cx.limits().max_data_len)
    }
}

impl<T: De> De for Box<T> {
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error> {
        let _nested = Nested::enter(cx)?;
        T::de(d, cx).map(Box::new)
    }
}

impl<T: De> De for Option<T> {
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error> {
        match d.take_u8()? {
            0 => Ok(None),
            1 => T::de(d, cx).map(Some),
            b => Err(Error::InvalidOptionalValue(b)),
        }
    }
}

impl<T: De, const N: usize> De for [T; N] {
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::de(d, cx)?);
        }
        <[T; N]>::try_from(items).map_err(|v| {
            Error::Invalid(format!("expected {} array elements, read {}", N, v.len()))
        })
    }
}

/// Variable-length arrays are bounded by `max_array_len`, including
/// `Vec<u8>`. Use [`Bytes`] for `data`, which is bounded by `max_data_len`.
impl<T: De> De for Vec<T> {
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error> {
        let len = d.read_len(Limit::ArrayLength, cx.limits().max_array_len)?;
        let _nested = Nested::enter(cx)?;
        let mut items = Vec::with_capacity(prealloc(len));
        for _ in 0..len {
            items.push(T::de(d, cx)?);
        }
        Ok(items)
    }
}

fn duplicate_key<K: Debug>(k: &K) -> Error { Error::DuplicateMapKey(format!("{:?}", k)) }

fn read_map_len<D: Deserializer + ?Sized>(
    d: &mut D,
    cx: &Context,
) -> Result<(usize, Nested), Error> {
    let len = d.read_len(Limit::MapSize, cx.limits().max_map_len)?;
    Ok((len, Nested::enter(cx)?))
}

impl<K, V, H> De for HashMap<K, V, H>
where
    K: De + Eq + Hash + Debug,
    V: De,
    H: BuildHasher + Default,
{
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error> {
        let (len, _nested) = read_map_len(d, cx)?;
        let mut m = HashMap::with_capacity_and_hasher(prealloc(len), H::default());
        for _ in 0..len {
            let k = K::de(d, cx)?;
            let v = V::de(d, cx)?;
            match m.entry(k) {
                hash_map::Entry::Occupied(e) => return Err(duplicate_key(e.key())),
                hash_map::Entry::Vacant(e) => {
                    e.insert(v);
                }
            }
        }
        Ok(m)
    }
}

impl<K: De + Ord + Debug, V: De> De for BTreeMap<K, V> {
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error> {
        let (len, _nested) = read_map_len(d, cx)?;
        let mut m = BTreeMap::new();
        for _ in 0..len {
            let k = K::de(d, cx)?;
            let v = V::de(d, cx)?;
            match m.entry(k) {
                btree_map::Entry::Occupied(e) => return Err(duplicate_key(e.key())),
                btree_map::Entry::Vacant(e) => {
                    e.insert(v);
                }
            }
        }
        Ok(m)
    }
}

impl<K: De + Ord + Debug, V: De> De for VecMap<K, V> {
    fn de<D: Deserializer + ?Sized>(d: &mut D, cx: &Context) -> Result<Self, Error> {
        let (len, _nested) = read_map_len(d, cx)?;
        let mut m = VecMap::with_capacity(prealloc(len));
        for _ in 0..len {
            let k = K::de(d, cx)?;
            let v = V::de(d, cx)?;
            if m.contains_key(&k) {
                return Err(duplicate_key(&k));
            }
            m.insert(k, v);
        }
        Ok(m)
    }
}
