use crate::schema::{Position, Token};
use failure::Fail;
use std::{fmt, io};

/// The resource limit a decoder ran into.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Limit {
    /// Length of a single `data` or `string` block, in bytes.
    DataLength,
    /// Element count of a variable-length array.
    ArrayLength,
    /// Entry count of a map.
    MapSize,
    /// Nesting depth of boxes, arrays and maps.
    Depth,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Limit::DataLength => write!(f, "data length"),
            Limit::ArrayLength => write!(f, "array length"),
            Limit::MapSize => write!(f, "map size"),
            Limit::Depth => write!(f, "nesting depth"),
        }
    }
}

/// An error encountered while encoding or decoding a BARE message.
///
/// Any error returned from a decode leaves no value behind; callers should
/// discard whatever output a failed encode has already produced.
#[derive(Debug, Fail)]
pub enum Error {
    /// The input ended in the middle of a value.
    #[fail(display = "unexpected end of input")]
    UnexpectedEndOfInput,
    /// A `bool` was neither `0x00` nor `0x01`.
    #[fail(display = "invalid bool value: {:#04x}", _0)]
    InvalidBoolValue(u8),
    /// A varint was overlong, overflowed 64 bits, or was not minimally encoded.
    #[fail(display = "invalid varint")]
    InvalidVarint,
    /// An optional's presence byte was neither `0x00` nor `0x01`.
    #[fail(display = "invalid optional value: {:#04x}", _0)]
    InvalidOptionalValue(u8),
    /// A `string` was not well-formed UTF-8.
    #[fail(display = "string is not valid UTF-8")]
    InvalidString,
    /// A union tag with no registered member.
    #[fail(display = "invalid union tag {} for type {}", tag, union)]
    UnknownUnionTag {
        /// The union's type name.
        union: &'static str,
        /// The tag read from or reported by the value.
        tag: u8,
    },
    /// A union was used before being registered with the context.
    #[fail(display = "union type {} is not registered", _0)]
    UnregisteredUnion(&'static str),
    /// An enum value outside the declared set.
    #[fail(display = "invalid {} value: {}", name, value)]
    UnknownEnumValue {
        /// The enum's type name.
        name: &'static str,
        /// The value read from the input.
        value: u64,
    },
    /// A map contained the same key twice.
    #[fail(display = "duplicate map key: {}", _0)]
    DuplicateMapKey(String),
    /// A length prefix or the nesting depth exceeded the configured limit.
    #[fail(display = "{} {} exceeds configured limit of {}", limit, value, max)]
    LimitExceeded {
        /// Which limit was hit.
        limit: Limit,
        /// The length or depth found in the input.
        value: u64,
        /// The configured maximum.
        max: u64,
    },
    /// A value whose shape the codec cannot handle.
    #[fail(display = "unsupported type: {}", _0)]
    UnsupportedType(&'static str),
    /// Rejected by a hand-written encoder or decoder.
    #[fail(display = "invalid value: {}", _0)]
    Invalid(String),
    /// The underlying reader or writer failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}

impl Error {
    /// Whether this error is a resource limit rather than malformed input.
    pub fn is_limit(&self) -> bool {
        match self {
            Error::LimitExceeded { .. } => true,
            _ => false,
        }
    }

    pub(crate) fn from_read(e: io::Error) -> Error {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEndOfInput,
            _ => Error::Io(e),
        }
    }
}

/// An error encountered while reading a schema document.
///
/// Schema errors are always fatal to the parse; no recovery is attempted.
#[derive(Debug, Fail)]
pub enum SchemaError {
    /// A character that cannot start any token.
    #[fail(display = "{}: unknown token '{}'", position, found)]
    UnknownToken {
        /// The offending character.
        found: char,
        /// Where it was found.
        position: Position,
    },
    /// A token that does not fit the grammar at this point.
    #[fail(display = "{}: unexpected token '{}'; expected {}", position, found, expected)]
    UnexpectedToken {
        /// The token that was read.
        found: Token,
        /// What the grammar required instead.
        expected: &'static str,
        /// Where the token starts.
        position: Position,
    },
    /// The document ended inside a declaration.
    #[fail(display = "unexpected end of input; expected {}", expected)]
    UnexpectedEof {
        /// What the grammar required.
        expected: &'static str,
    },
    /// An integer literal that does not fit in 64 bits.
    #[fail(display = "{}: invalid integer '{}'", position, text)]
    InvalidInteger {
        /// The literal as written.
        text: String,
        /// Where the literal starts.
        position: Position,
    },
    /// An enum value that does not fit the enum's declared width.
    #[fail(display = "{}: value {} of {} does not fit in {}", position, value, name, kind)]
    EnumValueOutOfRange {
        /// The enum value's name.
        name: String,
        /// The resolved value.
        value: u64,
        /// The declared width.
        kind: crate::schema::EnumKind,
        /// Where the value's name starts.
        position: Position,
    },
    /// A union tag that does not fit in the one-byte tag of the encoding.
    #[fail(display = "{}: union tag {} does not fit in a u8", position, tag)]
    UnionTagOutOfRange {
        /// The resolved tag.
        tag: u64,
        /// Where the member starts.
        position: Position,
    },
    /// Reading the document failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}
