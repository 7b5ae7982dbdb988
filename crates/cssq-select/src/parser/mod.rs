//! Selector parser
//!
//! Grammar, per comma-separated member:
//!
//! ```text
//! selector    := compound (combinator compound)*
//! combinator  := WS | '>' | '+' | '~'
//! compound    := (IDENT | '*')? ('#' IDENT | '.' IDENT | attribute | pseudo)*
//! attribute   := '[' IDENT (op value)? ']'
//! op          := '=' | '~=' | '|=' | '*=' | '^=' | '$='
//! pseudo      := ':' IDENT | '::' IDENT
//! ```

mod builder;
mod lexer;

pub use builder::SelectorBuilder;

use lexer::{Spanned, Token};

use crate::model::{AttributeTest, Combinator, SelectorList};
use crate::{Result, SelectError};

/// Compile selector text into a selector list
pub fn parse(input: &str) -> Result<SelectorList> {
    let tokens = lexer::tokenize(input)?;
    let mut builder = SelectorBuilder::new();
    Parser {
        input,
        tokens,
        pos: 0,
    }
    .run(&mut builder)?;

    let list = builder.finish();
    tracing::trace!("Compiled `{}` into {} selector(s)", input, list.len());
    Ok(list)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|t| &t.token)
    }

    /// Byte offset of the current token, or end of input
    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.input.len(), |t| t.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|t| t.token.clone());
        self.pos += 1;
        token
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.peek() == Some(&Token::Whitespace) {
            self.pos += 1;
            skipped = true;
        }
        skipped
    }

    fn error(&self, message: impl Into<String>) -> SelectError {
        SelectError::syntax(self.input, self.offset(), message)
    }

    fn namespace_error(&self) -> SelectError {
        SelectError::namespace(format!("`{}` at offset {}", self.input, self.offset()))
    }

    fn run(&mut self, builder: &mut SelectorBuilder) -> Result<()> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(self.error("empty selector"));
        }

        loop {
            self.compound(builder)?;
            let spaced = self.skip_whitespace();

            let combinator = match self.peek() {
                None => return Ok(()),
                Some(Token::Comma) => {
                    self.pos += 1;
                    builder.next_selector();
                    self.skip_whitespace();
                    continue;
                }
                Some(Token::Greater) => Combinator::Child,
                Some(Token::Plus) => Combinator::AdjacentSibling,
                Some(Token::Tilde) => Combinator::GeneralSibling,
                Some(_) if spaced => {
                    builder.combinator(Combinator::Descendant);
                    continue;
                }
                Some(_) => return Err(self.error("unexpected character")),
            };

            self.pos += 1;
            self.skip_whitespace();
            builder.combinator(combinator);
        }
    }

    /// One compound step; at least one part is required
    fn compound(&mut self, builder: &mut SelectorBuilder) -> Result<()> {
        let mut parts = 0;

        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                builder.element(&name);
                parts += 1;
            }
            Some(Token::Star) => {
                self.pos += 1;
                builder.element("*");
                parts += 1;
            }
            _ => {}
        }
        if self.peek() == Some(&Token::Pipe) {
            return Err(self.namespace_error());
        }

        loop {
            match self.peek() {
                Some(Token::Hash) => {
                    self.pos += 1;
                    let id = match self.bump() {
                        Some(Token::Ident(id) | Token::Name(id)) => id,
                        _ => return Err(self.error_before("expected id after '#'")),
                    };
                    builder.id(&id);
                }
                Some(Token::Dot) => {
                    self.pos += 1;
                    let class = self.ident("expected class name after '.'")?;
                    builder.class(&class);
                }
                Some(Token::LBracket) => {
                    let test = self.attribute()?;
                    builder.attribute(test);
                }
                Some(Token::Colon) => {
                    self.pos += 1;
                    let name = self.ident("expected pseudo-class name")?;
                    builder.pseudo_class(&name);
                }
                Some(Token::DoubleColon) => {
                    self.pos += 1;
                    let name = self.ident("expected pseudo-element name")?;
                    builder.pseudo_element(&name);
                }
                Some(Token::Ident(_) | Token::Star) if parts > 0 => {
                    return Err(self.error("type selector must come first in a compound"));
                }
                _ => break,
            }
            parts += 1;
        }

        if parts == 0 {
            return Err(self.error("expected selector"));
        }
        Ok(())
    }

    /// Error located at the token just consumed
    fn error_before(&self, message: &str) -> SelectError {
        let pos = self
            .tokens
            .get(self.pos - 1)
            .map_or(self.input.len(), |t| t.pos);
        SelectError::syntax(self.input, pos, message)
    }

    fn ident(&mut self, message: &str) -> Result<String> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error(message)),
        }
    }

    /// `[name]` or `[name op value]`
    fn attribute(&mut self) -> Result<AttributeTest> {
        self.pos += 1;
        self.skip_whitespace();

        match (self.peek(), self.peek_at(1)) {
            (Some(Token::Pipe), _) | (Some(Token::Star), Some(Token::Pipe)) => {
                return Err(self.namespace_error());
            }
            _ => {}
        }
        let name = self.ident("expected attribute name")?;
        if self.peek() == Some(&Token::Pipe) {
            return Err(self.namespace_error());
        }
        self.skip_whitespace();

        let test = match self.peek() {
            Some(Token::RBracket) => AttributeTest::exists(name),
            Some(&Token::Op(op)) => {
                self.pos += 1;
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(Token::Ident(v) | Token::Name(v) | Token::Str(v)) => v.clone(),
                    _ => return Err(self.error("expected attribute value")),
                };
                self.pos += 1;
                self.skip_whitespace();
                AttributeTest::new(name, op, value)
            }
            None => return Err(self.error("unterminated attribute selector")),
            Some(_) => return Err(self.error("expected attribute operator or ']'")),
        };

        if self.peek() != Some(&Token::RBracket) {
            return Err(self.error("expected ']'"));
        }
        self.pos += 1;
        Ok(test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttrOperator, SimpleSelector};

    fn steps(input: &str) -> Vec<SimpleSelector> {
        let list = parse(input).unwrap();
        assert_eq!(list.len(), 1);
        list.selectors()[0].steps().to_vec()
    }

    #[test]
    fn test_type_and_class() {
        let s = steps("cd.a");
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].element.as_deref(), Some("cd"));
        assert!(s[0].classes.contains("a"));
    }

    #[test]
    fn test_compound_without_element() {
        let s = steps("#main.x.y[lang]:first-child::before");
        assert_eq!(s[0].element, None);
        assert_eq!(s[0].id.as_deref(), Some("main"));
        assert_eq!(s[0].classes.len(), 2);
        assert_eq!(s[0].attributes, vec![AttributeTest::exists("lang")]);
        assert_eq!(s[0].pseudo_classes, vec!["first-child".to_string()]);
        assert_eq!(s[0].pseudo_elements, vec!["before".to_string()]);
    }

    #[test]
    fn test_combinators() {
        let s = steps("a b > c + d ~ e");
        let kinds: Vec<Combinator> = s.iter().map(|s| s.combinator).collect();
        assert_eq!(
            kinds,
            vec![
                Combinator::None,
                Combinator::Descendant,
                Combinator::Child,
                Combinator::AdjacentSibling,
                Combinator::GeneralSibling,
            ]
        );
    }

    #[test]
    fn test_combinator_without_spaces() {
        let s = steps("a>b+c~d");
        assert_eq!(s.len(), 4);
        assert_eq!(s[1].combinator, Combinator::Child);
    }

    #[test]
    fn test_attribute_operators() {
        let s = steps(r#"[a=x][b~="y z"][c|=en][d*='w'][e^=1][f$=_]"#);
        let ops: Vec<AttrOperator> = s[0].attributes.iter().map(|a| a.operator).collect();
        assert_eq!(
            ops,
            vec![
                AttrOperator::Exact,
                AttrOperator::Includes,
                AttrOperator::DashMatch,
                AttrOperator::Substring,
                AttrOperator::Prefix,
                AttrOperator::Suffix,
            ]
        );
        assert_eq!(s[0].attributes[1].value.as_deref(), Some("y z"));
        assert_eq!(s[0].attributes[4].value.as_deref(), Some("1"));
    }

    #[test]
    fn test_attribute_inner_whitespace() {
        let s = steps("[ lang = en ]");
        assert_eq!(s[0].attributes[0], AttributeTest::new("lang", AttrOperator::Exact, "en"));
    }

    #[test]
    fn test_selector_list() {
        let list = parse(" title ,cd ").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.selectors()[0].rightmost().element.as_deref(), Some("title"));
        assert_eq!(list.selectors()[1].rightmost().element.as_deref(), Some("cd"));
    }

    #[test]
    fn test_universal() {
        let s = steps("* > *");
        assert!(s[0].is_universal());
        assert!(s[1].is_universal());
    }

    #[test]
    fn test_syntax_errors() {
        for (input, position) in [
            ("", 0),
            ("   ", 3),
            ("[", 1),
            ("a >", 3),
            ("a,", 2),
            (",a", 0),
            ("a > > b", 4),
            ("a.", 2),
            ("a[b=]", 4),
            ("a[b c]", 4),
            ("a!", 1),
            ("a*", 1),
            (":not(a)", 4),
        ] {
            let err = parse(input).unwrap_err();
            assert!(matches!(err, SelectError::Syntax { .. }), "{input:?}: {err}");
            assert_eq!(err.position(), Some(position), "{input:?}: {err}");
        }
    }

    #[test]
    fn test_namespaces_unsupported() {
        for input in ["svg|rect", "*|a", "|a", "[xlink|href]", "[|href]", "[*|href]"] {
            assert!(
                matches!(parse(input), Err(SelectError::Unsupported { feature: "namespace", .. })),
                "{input}"
            );
        }
        // `|=` is an operator, not a namespace
        assert!(parse("[lang|=en]").is_ok());
    }

    #[test]
    fn test_deterministic() {
        let input = "collection > cd.a.b[lang|=en] title, *:first-child";
        assert_eq!(parse(input).unwrap(), parse(input).unwrap());
    }

    #[test]
    fn test_display_reparses() {
        for input in ["cd.a title", "a > b + c ~ d", r#"[x="a \"q\" b"]"#, "*", "#\\31 x"] {
            let list = parse(input).unwrap();
            assert_eq!(parse(&list.to_string()).unwrap(), list, "{input}");
        }
    }
}
