//! The schema language: lexer, parser and AST.
//!
//! A schema document is a list of `type` and `enum` declarations:
//!
//! ```text
//! type PublicKey data<128>
//! type Time string # ISO 8601
//!
//! enum Department e8 {
//!     ACCOUNTING
//!     ADMINISTRATION
//!     CUSTOMER_SERVICE
//!     DEVELOPMENT = 99
//! }
//!
//! type Customer {
//!     name: string
//!     email: string
//!     orders: []{
//!         orderId: i64
//!         quantity: i32
//!     }
//!     metadata: map[string]data
//! }
//!
//! type Person (Customer | Employee)
//! ```
//!
//! [`parse`] turns such a document into a [`Schema`], and the AST's
//! `Display` impls turn it back into text.
//!
//! # Example
//!
//! ```
//! use bare::schema::{parse, Primitive, Type};
//!
//! let schema = parse("type MyOptional optional<u32>").unwrap();
//! let ty = &schema.user_types().next().unwrap().ty;
//!
//! assert_eq!(*ty, Type::Optional(Box::new(Type::Primitive(Primitive::U32))));
//! assert_eq!(ty.to_string(), "optional<u32>");
//! ```

pub use crate::errors::SchemaError;
use std::{fmt, io};

mod ast;
pub use ast::*;
pub mod lex;
pub use lex::{keyword, Lexer, Token};
mod parser;
pub use parser::Parser;
mod describe;
pub use describe::{schema_for, SchemaFor};
mod unparse;

/// A line and column in a schema document, both counted from 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number.
    pub line: usize,
    /// Column number, in characters.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}:{}", self.line, self.column) }
}

/// Parses a schema document.
pub fn parse(src: &str) -> Result<Schema, SchemaError> { Parser::new(src).parse_schema() }

/// Reads a schema document from `r` and parses it.
pub fn parse_reader<R: io::Read>(mut r: R) -> Result<Schema, SchemaError> {
    let mut src = String::new();
    r.read_to_string(&mut src).map_err(SchemaError::Io)?;
    parse(&src)
}
