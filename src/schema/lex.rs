//! Tokenizer for schema documents.

use super::Position;
use crate::errors::SchemaError;
use std::{fmt, iter::Peekable, str::Chars};

/// A lexical token. Only names and integer literals carry text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Type,
    Enum,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    Uint,
    Int,
    F32,
    F64,
    Bool,
    String,
    Data,
    Void,
    Map,
    Optional,
    E8,
    E16,
    E32,
    E64,
    /// An identifier that is not a keyword.
    Name(String),
    /// A run of decimal digits, not yet range checked.
    Integer(String),
    LAngle,
    RAngle,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Pipe,
    Equal,
    Colon,
}

const KEYWORDS: &[(&str, Token)] = &[
    ("type", Token::Type),
    ("enum", Token::Enum),
    ("u8", Token::U8),
    ("u16", Token::U16),
    ("u32", Token::U32),
    ("u64", Token::U64),
    ("i8", Token::I8),
    ("i16", Token::I16),
    ("i32", Token::I32),
    ("i64", Token::I64),
    ("uint", Token::Uint),
    ("int", Token::Int),
    ("f32", Token::F32),
    ("f64", Token::F64),
    ("bool", Token::Bool),
    ("string", Token::String),
    ("data", Token::Data),
    ("void", Token::Void),
    ("map", Token::Map),
    ("optional", Token::Optional),
    ("e8", Token::E8),
    ("e16", Token::E16),
    ("e32", Token::E32),
    ("e64", Token::E64),
];

/// The keyword spelled `word`, if it is one.
///
/// # Example
///
/// ```
/// use bare::schema::{keyword, Token};
///
/// assert_eq!(keyword("optional"), Some(Token::Optional));
/// assert_eq!(keyword("Optional"), None);
/// ```
pub fn keyword(word: &str) -> Option<Token> {
    KEYWORDS
        .iter()
        .find(|(kw, _)| *kw == word)
        .map(|(_, tok)| tok.clone())
}

fn punctuation(c: char) -> Option<Token> {
    let tok = match c {
        '<' => Token::LAngle,
        '>' => Token::RAngle,
        '{' => Token::LBrace,
        '}' => Token::RBrace,
        '[' => Token::LBracket,
        ']' => Token::RBracket,
        '(' => Token::LParen,
        ')' => Token::RParen,
        ',' => Token::Comma,
        '|' => Token::Pipe,
        '=' => Token::Equal,
        ':' => Token::Colon,
        _ => return None,
    };
    Some(tok)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some((kw, _)) = KEYWORDS.iter().find(|(_, tok)| tok == self) {
            return f.write_str(kw);
        }
        let s = match self {
            Token::Name(s) | Token::Integer(s) => s.as_str(),
            Token::LAngle => "<",
            Token::RAngle => ">",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Comma => ",",
            Token::Pipe => "|",
            Token::Equal => "=",
            Token::Colon => ":",
            _ => unreachable!("keywords are in the table"),
        };
        f.write_str(s)
    }
}

/// Splits a schema document into tokens.
///
/// Whitespace and `#` comments are skipped. One token can be pushed back.
///
/// # Example
///
/// ```
/// use bare::schema::{Lexer, Token};
///
/// let mut lex = Lexer::new("type Foo # comment\n u8");
/// let (tok, pos) = lex.next_token().unwrap().unwrap();
/// assert_eq!(tok, Token::Type);
/// assert_eq!((pos.line, pos.column), (1, 1));
///
/// let (tok, _) = lex.next_token().unwrap().unwrap();
/// lex.push_back(tok.clone(), pos);
/// assert_eq!(lex.next_token().unwrap().unwrap().0, Token::Name("Foo".into()));
/// assert_eq!(lex.next_token().unwrap().unwrap().0, Token::U8);
/// assert!(lex.next_token().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    pos: Position,
    pushed: Option<(Token, Position)>,
}

impl<'a> Lexer<'a> {
    /// A lexer at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Lexer {
            chars: src.chars().peekable(),
            pos: Position { line: 1, column: 1 },
            pushed: None,
        }
    }

    /// Returns a token to the lexer, to be read again by the next call to
    /// [`Lexer::next_token`].
    ///
    /// Only one token can be pushed back at a time.
    pub fn push_back(&mut self, tok: Token, pos: Position) {
        debug_assert!(self.pushed.is_none(), "only one token of push-back");
        self.pushed = Some((tok, pos));
    }

    /// The next token and where it starts, or `None` at the end of input.
    pub fn next_token(&mut self) -> Result<Option<(Token, Position)>, SchemaError> {
        if let Some(pushed) = self.pushed.take() {
            return Ok(Some(pushed));
        }

        while let Some(&c) = self.chars.peek() {
            let start = self.pos;
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else if c.is_alphabetic() {
                let word = self.eat_while(|c| c.is_alphanumeric() || c == '_');
                let tok = keyword(&word).unwrap_or(Token::Name(word));
                return Ok(Some((tok, start)));
            } else if c.is_ascii_digit() {
                let digits = self.eat_while(|c| c.is_ascii_digit());
                return Ok(Some((Token::Integer(digits), start)));
            } else {
                self.bump();
                return match punctuation(c) {
                    Some(tok) => Ok(Some((tok, start))),
                    None => Err(SchemaError::UnknownToken {
                        found: c,
                        position: start,
                    }),
                };
            }
        }
        Ok(None)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    fn eat_while<F: Fn(char) -> bool>(&mut self, pred: F) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<(Token, Position), SchemaError>;

    fn next(&mut self) -> Option<Self::Item> { self.next_token().transpose() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        Lexer::new(src)
            .map(|res| res.map(|(tok, _)| tok))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn words_and_punctuation() {
        assert_eq!(
            tokens("type Foo_1 map[string]uint"),
            vec![
                Token::Type,
                Token::Name("Foo_1".into()),
                Token::Map,
                Token::LBracket,
                Token::String,
                Token::RBracket,
                Token::Uint,
            ]
        );
        assert_eq!(
            tokens("{a:[16]u8,}(x|y=2)<>"),
            vec![
                Token::LBrace,
                Token::Name("a".into()),
                Token::Colon,
                Token::LBracket,
                Token::Integer("16".into()),
                Token::RBracket,
                Token::U8,
                Token::Comma,
                Token::RBrace,
                Token::LParen,
                Token::Name("x".into()),
                Token::Pipe,
                Token::Name("y".into()),
                Token::Equal,
                Token::Integer("2".into()),
                Token::RParen,
                Token::LAngle,
                Token::RAngle,
            ]
        );
    }

    #[test]
    fn comments_and_positions() {
        let mut lex = Lexer::new("# header\n\n  enum  # trailing\nE8");
        let (tok, pos) = lex.next_token().unwrap().unwrap();
        assert_eq!(tok, Token::Enum);
        assert_eq!(pos, Position { line: 3, column: 3 });
        let (tok, pos) = lex.next_token().unwrap().unwrap();
        assert_eq!(tok, Token::Name("E8".into()));
        assert_eq!(pos, Position { line: 4, column: 1 });
        assert!(lex.next_token().unwrap().is_none());
        assert!(lex.next_token().unwrap().is_none());
    }

    #[test]
    fn unknown_character() {
        let mut lex = Lexer::new("type\n  @");
        lex.next_token().unwrap();
        match lex.next_token() {
            Err(SchemaError::UnknownToken { found, position }) => {
                assert_eq!(found, '@');
                assert_eq!(position, Position { line: 2, column: 3 });
            }
            other => panic!("expected an unknown token, got {:?}", other),
        }
    }

    #[test]
    fn tokens_display_as_written() {
        for src in ["optional", "e64", "Person", "128", "|"].iter() {
            assert_eq!(tokens(src)[0].to_string(), *src);
        }
    }
}
