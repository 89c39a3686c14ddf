use super::*;
use bytes::{BufMut, Bytes, BytesMut};
use smallvec::SmallVec;
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
    io,
};

/// A byte sink that BARE values are written into.
///
/// Only the two primitive operations are required; everything else is
/// provided by [`SerializerExt`]. The trait is object safe, so
/// `&mut dyn Serializer` works wherever a concrete sink does.
pub trait Serializer {
    /// Add a byte to the output.
    fn put_u8(&mut self, u: u8) -> Result<(), Error>;
    /// Add a slice to the output.
    fn put_slice(&mut self, slice: &[u8]) -> Result<(), Error>;
}

impl Serializer for Vec<u8> {
    fn put_u8(&mut self, u: u8) -> Result<(), Error> {
        self.push(u);
        Ok(())
    }

    fn put_slice(&mut self, slice: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(slice);
        Ok(())
    }
}

impl Serializer for BytesMut {
    fn put_u8(&mut self, u: u8) -> Result<(), Error> {
        BufMut::put_u8(self, u);
        Ok(())
    }

    fn put_slice(&mut self, slice: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(slice);
        Ok(())
    }
}

impl<S: Serializer + ?Sized> Serializer for &mut S {
    fn put_u8(&mut self, u: u8) -> Result<(), Error> { (**self).put_u8(u) }

    fn put_slice(&mut self, slice: &[u8]) -> Result<(), Error> { (**self).put_slice(slice) }
}

/// A [`Serializer`] over any [`io::Write`].
///
/// Nothing is buffered here; wrap the writer in an [`io::BufWriter`] if it
/// is expensive to call.
///
/// # Example
///
/// ```
/// use bare::{encoding::Writer, marshal_into, Uint};
///
/// let mut w = Writer::new(Vec::new());
/// marshal_into(&Uint(0x1337), &mut w).unwrap();
///
/// assert_eq!(w.into_inner(), vec![0xb7, 0x26]);
/// ```
#[derive(Debug)]
pub struct Writer<W> {
    inner: W,
}

impl<W: io::Write> Writer<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self { Writer { inner } }

    /// Unwraps the underlying writer.
    pub fn into_inner(self) -> W { self.inner }

    /// Borrows the underlying writer.
    pub fn get_ref(&self) -> &W { &self.inner }
}

impl<W: io::Write> Serializer for Writer<W> {
    fn put_u8(&mut self, u: u8) -> Result<(), Error> { self.put_slice(&[u]) }

    fn put_slice(&mut self, slice: &[u8]) -> Result<(), Error> {
        self.inner.write_all(slice).map_err(Error::Io)
    }
}

macro_rules! put_le {
    ($($name:ident: $t:ty),* $(,)?) => {
        $(
            #[doc = concat!("Add a little-endian [`", stringify!($t), "`] to the output.")]
            #[inline]
            fn $name(&mut self, v: $t) -> Result<(), Error> { self.put_slice(&v.to_le_bytes()) }
        )*
    };
}

/// Convenience methods for [`Serializer`], one per BARE primitive.
pub trait SerializerExt: Serializer {
    put_le!(
        put_u16: u16,
        put_u32: u32,
        put_u64: u64,
        put_i16: i16,
        put_i32: i32,
        put_i64: i64,
    );

    /// Add an [`i8`] to the output.
    #[inline]
    fn put_i8(&mut self, i: i8) -> Result<(), Error> { self.put_u8(i as u8) }

    /// Add an [`f32`] to the output as its IEEE-754 bits.
    #[inline]
    fn put_f32(&mut self, f: f32) -> Result<(), Error> { self.put_u32(f.to_bits()) }

    /// Add an [`f64`] to the output as its IEEE-754 bits.
    #[inline]
    fn put_f64(&mut self, f: f64) -> Result<(), Error> { self.put_u64(f.to_bits()) }

    /// Add a [`bool`] to the output as `0x00` or `0x01`.
    #[inline]
    fn put_bool(&mut self, b: bool) -> Result<(), Error> { self.put_u8(b as u8) }

    /// Add a `uint` to the output.
    ///
    /// # Arguments
    ///
    /// * `u: u64` - The value to be added, written as an unsigned LEB128
    ///   varint of one to ten bytes.
    fn put_uint(&mut self, mut u: u64) -> Result<(), Error> {
        let mut buf = SmallVec::<[u8; MAX_VARINT_LEN]>::new();
        while u >= 0x80 {
            buf.push((u as u8) | 0x80);
            u >>= 7;
        }
        buf.push(u as u8);
        self.put_slice(&buf)
    }

    /// Add an `int` to the output.
    ///
    /// # Arguments
    ///
    /// * `i: i64` - The value to be added, zigzag mapped and then written as
    ///   a `uint`.
    #[inline]
    fn put_int(&mut self, i: i64) -> Result<(), Error> { self.put_uint(zigzag(i)) }

    /// Add a length prefix to the output.
    #[inline]
    fn put_len(&mut self, len: usize) -> Result<(), Error> { self.put_uint(len as u64) }

    /// Add a variable-length `data` block to the output.
    ///
    /// # Arguments
    ///
    /// * `b: &[u8]` - The bytes to be added, preceded by their length.
    fn put_data(&mut self, b: &[u8]) -> Result<(), Error> {
        self.put_len(b.len())?;
        self.put_slice(b)
    }

    /// Add a `string` to the output, preceded by its length in bytes.
    #[inline]
    fn put_str(&mut self, s: &str) -> Result<(), Error> { self.put_data(s.as_bytes()) }

    /// Add a `data<N>` block to the output. No length is written.
    #[inline]
    fn put_fixed(&mut self, b: &[u8]) -> Result<(), Error> { self.put_slice(b) }
}

impl<S: Serializer + ?Sized> SerializerExt for S {}

/// A value that can be written in the BARE encoding.
///
/// Implement this by hand to replace the encoding of a type entirely, or
/// derive it with `#[derive(Bare)]`.
pub trait Ser {
    /// Writes `self` into `s`.
    ///
    /// # Arguments
    ///
    /// * `s` - The output.
    /// * `cx` - The context that resolves union tags.
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error>;
}

macro_rules! ser_prim {
    ($($t:ty => $put:ident),* $(,)?) => {
        $(
            impl Ser for $t {
                #[inline]
                fn ser<S: Serializer + ?Sized>(&self, s: &mut S, _: &Context) -> Result<(), Error> {
                    s.$put(*self)
                }
            }
        )*
    };
}

ser_prim!(
    u8 => put_u8,
    u16 => put_u16,
    u32 => put_u32,
    u64 => put_u64,
    i8 => put_i8,
    i16 => put_i16,
    i32 => put_i32,
    i64 => put_i64,
    f32 => put_f32,
    f64 => put_f64,
    bool => put_bool,
);

impl Ser for Uint {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, _: &Context) -> Result<(), Error> {
        s.put_uint(self.0)
    }
}

impl Ser for Int {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, _: &Context) -> Result<(), Error> {
        s.put_int(self.0)
    }
}

impl Ser for () {
    fn ser<S: Serializer + ?Sized>(&self, _: &mut S, _: &Context) -> Result<(), Error> { Ok(()) }
}

impl Ser for str {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, _: &Context) -> Result<(), Error> {
        s.put_str(self)
    }
}

impl Ser for String {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, _: &Context) -> Result<(), Error> {
        s.put_str(self)
    }
}

impl Ser for Bytes {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, _: &Context) -> Result<(), Error> {
        s.put_data(self)
    }
}

impl<T: Ser + ?Sized> Ser for &T {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error> {
        (**self).ser(s, cx)
    }
}

impl<T: Ser + ?Sized> Ser for Box<T> {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error> {
        (**self).ser(s, cx)
    }
}

impl<T: Ser> Ser for Option<T> {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error> {
        match self {
            None => s.put_u8(0),
            Some(t) => {
                s.put_u8(1)?;
                t.ser(s, cx)
            }
        }
    }
}

impl<T: Ser, const N: usize> Ser for [T; N] {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error> {
        for t in self.iter() {
            t.ser(s, cx)?;
        }
        Ok(())
    }
}

impl<T: Ser> Ser for [T] {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error> {
        s.put_len(self.len())?;
        for t in self {
            t.ser(s, cx)?;
        }
        Ok(())
    }
}

impl<T: Ser> Ser for Vec<T> {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error> {
        self.as_slice().ser(s, cx)
    }
}

fn ser_entries<'a, K, V, I, S>(len: usize, entries: I, s: &mut S, cx: &Context) -> Result<(), Error>
where
    K: Ser + 'a,
    V: Ser + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
    S: Serializer + ?Sized,
{
    s.put_len(len)?;
    for (k, v) in entries {
        k.ser(s, cx)?;
        v.ser(s, cx)?;
    }
    Ok(())
}

impl<K: Ser, V: Ser, H: BuildHasher> Ser for HashMap<K, V, H> {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error> {
        ser_entries(self.len(), self.iter(), s, cx)
    }
}

impl<K: Ser, V: Ser> Ser for BTreeMap<K, V> {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error> {
        ser_entries(self.len(), self.iter(), s, cx)
    }
}

impl<K: Ser + Ord, V: Ser> Ser for VecMap<K, V> {
    fn ser<S: Serializer + ?Sized>(&self, s: &mut S, cx: &Context) -> Result<(), Error> {
        ser_entries(self.len(), self.iter(), s, cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint_bytes(u: u64) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        SerializerExt::put_uint(&mut out, u).unwrap();
        out
    }

    #[test]
    fn uint_boundaries() {
        assert_eq!(uint_bytes(0), vec![0x00]);
        assert_eq!(uint_bytes(0x7f), vec![0x7f]);
        assert_eq!(uint_bytes(0x80), vec![0x80, 0x01]);
        assert_eq!(uint_bytes(0x1337), vec![0xb7, 0x26]);
        assert_eq!(uint_bytes(u64::MAX).len(), MAX_VARINT_LEN);
        assert_eq!(*uint_bytes(u64::MAX).last().unwrap(), 0x01);
    }

    #[test]
    fn bytes_mut_matches_vec() {
        let mut v: Vec<u8> = Vec::new();
        let mut b = BytesMut::new();
        for s in [&mut v as &mut dyn Serializer, &mut b as &mut dyn Serializer].iter_mut() {
            s.put_u32(0xdead_beef).unwrap();
            s.put_str("hi").unwrap();
            s.put_int(-1337).unwrap();
        }
        assert_eq!(&v[..], &b[..]);
        assert_eq!(v, vec![0xef, 0xbe, 0xad, 0xde, 0x02, b'h', b'i', 0xf1, 0x14]);
    }

    struct Broken;

    impl io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken pipe"))
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    #[test]
    fn writer_failure_is_io() {
        let mut w = Writer::new(Broken);
        match w.put_u64(1) {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::Other),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }
}
