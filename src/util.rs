/// Longest possible LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Maps a signed integer onto the unsigned integers so that values of small
/// magnitude stay small: `0, -1, 1, -2, 2, ...` become `0, 1, 2, 3, 4, ...`.
///
/// # Example
///
/// ```
/// use bare::util::{unzigzag, zigzag};
///
/// assert_eq!(zigzag(-1), 1);
/// assert_eq!(zigzag(42), 84);
/// assert_eq!(unzigzag(zigzag(-1337)), -1337);
/// ```
#[inline]
pub fn zigzag(i: i64) -> u64 { ((i << 1) ^ (i >> 63)) as u64 }

/// Inverse of [`zigzag`].
#[inline]
pub fn unzigzag(u: u64) -> i64 { ((u >> 1) as i64) ^ -((u & 1) as i64) }

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}
