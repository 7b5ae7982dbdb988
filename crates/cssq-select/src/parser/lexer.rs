//! Selector tokenizer
//!
//! Produces tokens tagged with the byte offset they start at, so the parser
//! can report exactly where a selector went wrong.

use crate::model::AttrOperator;
use crate::{Result, SelectError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Name that may begin an identifier
    Ident(String),
    /// Name starting with a digit, only valid as an attribute value or id
    Name(String),
    /// Quoted string, quotes removed
    Str(String),
    Star,
    Hash,
    Dot,
    LBracket,
    RBracket,
    Colon,
    DoubleColon,
    Comma,
    Whitespace,
    Greater,
    Plus,
    Tilde,
    Pipe,
    Op(AttrOperator),
    Delim(char),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub pos: usize,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    /// Escaped character after a backslash
    fn escape(&mut self, backslash: usize) -> Result<char> {
        self.chars
            .next()
            .map(|(_, c)| c)
            .ok_or_else(|| SelectError::syntax(self.input, backslash, "dangling escape"))
    }

    fn name(&mut self, start: usize, first: char) -> Result<Token> {
        let mut value = String::new();
        let mut ident = !first.is_ascii_digit();
        match first {
            '\\' => {
                value.push(self.escape(start)?);
                ident = true;
            }
            c => value.push(c),
        }
        while let Some(&(pos, c)) = self.chars.peek() {
            if is_name_char(c) {
                value.push(c);
                self.chars.next();
            } else if c == '\\' {
                self.chars.next();
                value.push(self.escape(pos)?);
            } else {
                break;
            }
        }
        Ok(if ident { Token::Ident(value) } else { Token::Name(value) })
    }

    fn string(&mut self, start: usize, quote: char) -> Result<Token> {
        let mut value = String::new();
        while let Some((pos, c)) = self.chars.next() {
            match c {
                c if c == quote => return Ok(Token::Str(value)),
                '\\' => value.push(self.escape(pos)?),
                c => value.push(c),
            }
        }
        Err(SelectError::syntax(self.input, start, "unterminated string"))
    }

    fn next_token(&mut self) -> Result<Option<Spanned>> {
        let Some((pos, c)) = self.chars.next() else {
            return Ok(None);
        };
        let token = match c {
            c if c.is_whitespace() => {
                while self.peek_char().is_some_and(char::is_whitespace) {
                    self.chars.next();
                }
                Token::Whitespace
            }
            '"' | '\'' => self.string(pos, c)?,
            '\\' => self.name(pos, c)?,
            c if is_name_char(c) => self.name(pos, c)?,
            '*' if self.eat('=') => Token::Op(AttrOperator::Substring),
            '*' => Token::Star,
            '~' if self.eat('=') => Token::Op(AttrOperator::Includes),
            '~' => Token::Tilde,
            '|' if self.eat('=') => Token::Op(AttrOperator::DashMatch),
            '|' => Token::Pipe,
            '^' if self.eat('=') => Token::Op(AttrOperator::Prefix),
            '$' if self.eat('=') => Token::Op(AttrOperator::Suffix),
            '=' => Token::Op(AttrOperator::Exact),
            ':' if self.eat(':') => Token::DoubleColon,
            ':' => Token::Colon,
            '#' => Token::Hash,
            '.' => Token::Dot,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            '>' => Token::Greater,
            '+' => Token::Plus,
            other => Token::Delim(other),
        };
        Ok(Some(Spanned { token, pos }))
    }
}

/// Split selector text into positioned tokens
pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let mut lexer = Lexer {
        input,
        chars: input.char_indices().peekable(),
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
