//! Resource limits applied while decoding untrusted input.
//!
//! Every length prefix is checked against these limits before anything is
//! allocated for it, so a hostile or corrupt message cannot make the decoder
//! reserve more memory than configured.

/// Default maximum length of a single `data` or `string` block: 32 MiB.
pub const DEFAULT_MAX_DATA_LEN: u64 = 1024 * 1024 * 32;
/// Default maximum element count of a variable-length array.
pub const DEFAULT_MAX_ARRAY_LEN: u64 = 1024 * 4;
/// Default maximum entry count of a map.
pub const DEFAULT_MAX_MAP_LEN: u64 = 1024;
/// Default maximum nesting depth of boxes, arrays and maps.
pub const DEFAULT_MAX_DEPTH: u64 = 256;

/// Decoder limits. All four are independent.
///
/// `max_depth` bounds recursion through `Box`, `Vec` and the map types, which
/// is how every recursive Rust type is built. Each level uses stack, so an
/// unlimited depth lets hostile input overflow the decoding thread's stack.
///
/// # Example
///
/// ```
/// use bare::{Context, Limits};
///
/// let cx = Context::with_limits(Limits {
///     max_array_len: 64,
///     ..Limits::default()
/// });
///
/// assert_eq!(cx.limits().max_array_len, 64);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Limits {
    /// Maximum length in bytes of a `data` or `string` value.
    pub max_data_len: u64,
    /// Maximum element count of a variable-length array.
    pub max_array_len: u64,
    /// Maximum entry count of a map.
    pub max_map_len: u64,
    /// Maximum number of nested boxes, arrays and maps.
    pub max_depth: u64,
}

impl Limits {
    /// Limits that accept anything a 64-bit length prefix can express.
    ///
    /// Only use this for trusted input.
    pub fn unlimited() -> Limits {
        Limits {
            max_data_len: u64::MAX,
            max_array_len: u64::MAX,
            max_map_len: u64::MAX,
            max_depth: u64::MAX,
        }
    }
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            max_data_len: DEFAULT_MAX_DATA_LEN,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_map_len: DEFAULT_MAX_MAP_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
