//! Recursive-descent parser from tokens to [`Schema`].

use super::{ast::*, lex::Lexer, Position, Token};
use crate::errors::SchemaError;
use std::convert::TryFrom;

/// Parses one schema document.
///
/// Every call to a `parse_*` method consumes exactly the tokens of the
/// construct it names. The first error ends the parse.
pub struct Parser<'a> {
    lex: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// A parser over `src`.
    pub fn new(src: &'a str) -> Self { Parser { lex: Lexer::new(src) } }

    /// Parses declarations until the end of input.
    pub fn parse_schema(mut self) -> Result<Schema, SchemaError> {
        let mut decls = Vec::new();
        while let Some(decl) = self.parse_decl()? {
            log::trace!("parsed declaration {}", decl.name());
            decls.push(decl);
        }
        Ok(Schema { decls })
    }

    /// Parses one top-level declaration, or returns `None` at the end of
    /// input.
    pub fn parse_decl(&mut self) -> Result<Option<Decl>, SchemaError> {
        let (tok, position) = match self.lex.next_token()? {
            Some(next) => next,
            None => return Ok(None),
        };
        let decl = match tok {
            Token::Type => Decl::Type(self.parse_user_type()?),
            Token::Enum => Decl::Enum(self.parse_user_enum()?),
            found => return Err(unexpected(found, "'type' or 'enum'", position)),
        };
        Ok(Some(decl))
    }

    fn parse_user_type(&mut self) -> Result<UserDefinedType, SchemaError> {
        let name = self.name("type name")?;
        let ty = self.parse_type()?;
        Ok(UserDefinedType { name, ty })
    }

    fn parse_user_enum(&mut self) -> Result<UserDefinedEnum, SchemaError> {
        let name = self.name("enum name")?;
        let kind = match self.next("enum kind")? {
            (Token::E8, _) => EnumKind::E8,
            (Token::E16, _) => EnumKind::E16,
            (Token::E32, _) => EnumKind::E32,
            (Token::E64, _) => EnumKind::E64,
            (found, position) => return Err(unexpected(found, "e8, e16, e32 or e64", position)),
        };
        self.expect(Token::LBrace, "'{'")?;

        let mut values = Vec::new();
        // `None` once the counter has passed u64::MAX.
        let mut next = Some(0u64);
        loop {
            let (name, position) = match self.next("enum value name or '}'")? {
                (Token::RBrace, _) => break,
                (Token::Name(name), position) => (name, position),
                (found, position) => {
                    return Err(unexpected(found, "enum value name or '}'", position))
                }
            };

            let explicit = if self.eat(&Token::Equal)? {
                Some(self.integer()?)
            } else {
                None
            };
            let value = match explicit.or(next) {
                Some(v) if v <= kind.max() => v,
                v => {
                    return Err(SchemaError::EnumValueOutOfRange {
                        name,
                        value: v.unwrap_or(u64::MAX),
                        kind,
                        position,
                    })
                }
            };
            next = value.checked_add(1);
            values.push(EnumValue { name, value });

            self.eat(&Token::Comma)?;
        }

        Ok(UserDefinedEnum { name, kind, values })
    }

    /// Parses a type expression.
    pub fn parse_type(&mut self) -> Result<Type, SchemaError> {
        let (tok, position) = self.next("type")?;
        let prim = |p| Ok(Type::Primitive(p));
        match tok {
            Token::U8 => prim(Primitive::U8),
            Token::U16 => prim(Primitive::U16),
            Token::U32 => prim(Primitive::U32),
            Token::U64 => prim(Primitive::U64),
            Token::I8 => prim(Primitive::I8),
            Token::I16 => prim(Primitive::I16),
            Token::I32 => prim(Primitive::I32),
            Token::I64 => prim(Primitive::I64),
            Token::Uint => prim(Primitive::Uint),
            Token::Int => prim(Primitive::Int),
            Token::F32 => prim(Primitive::F32),
            Token::F64 => prim(Primitive::F64),
            Token::Bool => prim(Primitive::Bool),
            Token::String => prim(Primitive::String),
            Token::Void => prim(Primitive::Void),
            Token::Optional => self.parse_optional(),
            Token::Data => self.parse_data(),
            Token::Map => self.parse_map(),
            Token::LBracket => self.parse_array(),
            Token::LBrace => self.parse_struct(),
            Token::LParen => self.parse_union(),
            Token::Name(name) => Ok(Type::Named(name)),
            found => Err(unexpected(found, "type", position)),
        }
    }

    fn parse_optional(&mut self) -> Result<Type, SchemaError> {
        self.expect(Token::LAngle, "'<'")?;
        let ty = self.parse_type()?;
        self.expect(Token::RAngle, "'>'")?;
        Ok(Type::Optional(Box::new(ty)))
    }

    fn parse_data(&mut self) -> Result<Type, SchemaError> {
        if !self.eat(&Token::LAngle)? {
            return Ok(Type::Data(None));
        }
        let len = self.integer()?;
        self.expect(Token::RAngle, "'>'")?;
        Ok(Type::Data(non_zero(len)))
    }

    fn parse_map(&mut self) -> Result<Type, SchemaError> {
        self.expect(Token::LBracket, "'['")?;
        let key = self.parse_type()?;
        self.expect(Token::RBracket, "']'")?;
        let value = self.parse_type()?;
        Ok(Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    fn parse_array(&mut self) -> Result<Type, SchemaError> {
        let len = match self.next("integer or ']'")? {
            (Token::RBracket, _) => None,
            (Token::Integer(text), position) => {
                let len = parse_integer(text, position)?;
                self.expect(Token::RBracket, "']'")?;
                non_zero(len)
            }
            (found, position) => return Err(unexpected(found, "integer or ']'", position)),
        };
        let member = self.parse_type()?;
        Ok(Type::Array {
            member: Box::new(member),
            len,
        })
    }

    fn parse_struct(&mut self) -> Result<Type, SchemaError> {
        let mut fields = Vec::new();
        loop {
            let name = match self.next("field name or '}'")? {
                (Token::RBrace, _) => break,
                (Token::Name(name), _) => name,
                (found, position) => return Err(unexpected(found, "field name or '}'", position)),
            };
            self.expect(Token::Colon, "':'")?;
            let ty = self.parse_type()?;
            fields.push(StructField { name, ty });
            self.eat(&Token::Comma)?;
        }
        Ok(Type::Struct(fields))
    }

    fn parse_union(&mut self) -> Result<Type, SchemaError> {
        let mut members = Vec::new();
        let mut next = 0u64;
        loop {
            let (first, position) = self.next("type")?;
            self.lex.push_back(first, position);
            let ty = self.parse_type()?;
            let tag = if self.eat(&Token::Equal)? {
                self.integer()?
            } else {
                next
            };
            let tag = u8::try_from(tag)
                .map_err(|_| SchemaError::UnionTagOutOfRange { tag, position })?;
            next = u64::from(tag) + 1;
            members.push(UnionMember { ty, tag });

            match self.next("'|' or ')'")? {
                (Token::Pipe, _) => continue,
                (Token::RParen, _) => break,
                (found, position) => return Err(unexpected(found, "'|' or ')'", position)),
            }
        }
        Ok(Type::Union(members))
    }

    fn next(&mut self, expected: &'static str) -> Result<(Token, Position), SchemaError> {
        self.lex
            .next_token()?
            .ok_or(SchemaError::UnexpectedEof { expected })
    }

    fn expect(&mut self, want: Token, expected: &'static str) -> Result<(), SchemaError> {
        match self.next(expected)? {
            (tok, _) if tok == want => Ok(()),
            (found, position) => Err(unexpected(found, expected, position)),
        }
    }

    /// Consumes the next token if it is `want`. The end of input is not an
    /// error here.
    fn eat(&mut self, want: &Token) -> Result<bool, SchemaError> {
        match self.lex.next_token()? {
            Some((tok, _)) if tok == *want => Ok(true),
            Some((tok, position)) => {
                self.lex.push_back(tok, position);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    fn name(&mut self, expected: &'static str) -> Result<String, SchemaError> {
        match self.next(expected)? {
            (Token::Name(name), _) => Ok(name),
            (found, position) => Err(unexpected(found, expected, position)),
        }
    }

    fn integer(&mut self) -> Result<u64, SchemaError> {
        match self.next("integer")? {
            (Token::Integer(text), position) => parse_integer(text, position),
            (found, position) => Err(unexpected(found, "integer", position)),
        }
    }
}

fn unexpected(found: Token, expected: &'static str, position: Position) -> SchemaError {
    SchemaError::UnexpectedToken {
        found,
        expected,
        position,
    }
}

fn parse_integer(text: String, position: Position) -> Result<u64, SchemaError> {
    match text.parse() {
        Ok(n) => Ok(n),
        Err(_) => Err(SchemaError::InvalidInteger { text, position }),
    }
}

/// A fixed length of zero means "variable length".
fn non_zero(len: u64) -> Option<u64> {
    if len == 0 {
        None
    } else {
        Some(len)
    }
}
