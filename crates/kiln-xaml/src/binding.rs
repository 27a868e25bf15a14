//! `{Binding ...}` markup extensions.
//!
//! ```text
//! {Binding Name}
//! {Binding Path=Name, Mode=TwoWay}
//! {Binding Name, Converter={StaticResource upper}, Mode=OneWay}
//! ```
//!
//! Clauses may appear in any order, at most once each.

use kiln_model::{Binding, BindingMode};

use crate::context::ResourceTable;
use crate::error::HydrateError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Eq,
    Comma,
    LBrace,
    RBrace,
    Eof,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

struct Lexer<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Lexer<'s> {
    fn new(src: &'s str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn next_token(&mut self) -> Result<Token, String> {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };
        match ch {
            '=' => { self.advance(); Ok(Token::Eq) }
            ',' => { self.advance(); Ok(Token::Comma) }
            '{' => { self.advance(); Ok(Token::LBrace) }
            '}' => { self.advance(); Ok(Token::RBrace) }
            c if c.is_alphanumeric() || c == '_' => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                    self.advance();
                }
                Ok(Token::Ident(self.src[start..self.pos].to_string()))
            }
            other => Err(format!("unexpected character {other:?}")),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, String> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let eof = tok == Token::Eof;
            tokens.push(tok);
            if eof {
                return Ok(tokens);
            }
        }
    }
}

// ── BindingExpr ───────────────────────────────────────────────────────────

/// A parsed binding expression, before its converter key is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingExpr {
    pub path: String,
    /// Resource key from `Converter={StaticResource key}`.
    pub converter: Option<String>,
    pub mode: Option<BindingMode>,
}

impl BindingExpr {
    pub fn parse(text: &str) -> Result<Self, HydrateError> {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| HydrateError::syntax(text, "expected `{Binding ...}`"))?;
        let tokens = Lexer::new(inner)
            .tokenize()
            .map_err(|msg| HydrateError::syntax(text, msg))?;
        Parser { tokens, pos: 0 }
            .parse()
            .map_err(|msg| HydrateError::syntax(text, msg))
    }

    /// Turn the expression into a [`Binding`], resolving the converter key
    /// against the resources declared so far. An unknown key drops the
    /// converter; the binding itself is kept.
    pub fn into_binding(self, resources: &ResourceTable) -> Binding {
        let mut binding = Binding::new(self.path);
        if let Some(mode) = self.mode {
            binding = binding.mode(mode);
        }
        if let Some(key) = self.converter {
            match resources.get(&key) {
                Some(converter) => binding = binding.converter(converter.clone()),
                None => log::debug!("converter resource `{key}` not declared; binding without it"),
            }
        }
        binding
    }
}

/// Parse `text` and resolve its converter in one step.
pub fn parse_binding(text: &str, resources: &ResourceTable) -> Result<Binding, HydrateError> {
    Ok(BindingExpr::parse(text)?.into_binding(resources))
}

// ── Parser ────────────────────────────────────────────────────────────────

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn peek_ahead(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, String> {
        match self.advance() {
            Token::Ident(s) => Ok(s),
            other => Err(format!("expected {what}, got {other:?}")),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), String> {
        match self.advance() {
            tok if tok == expected => Ok(()),
            other => Err(format!("expected {expected:?}, got {other:?}")),
        }
    }

    fn parse(mut self) -> Result<BindingExpr, String> {
        match self.advance() {
            Token::Ident(kw) if kw == "Binding" => {}
            other => return Err(format!("expected `Binding`, got {other:?}")),
        }

        if matches!(self.peek(), Token::Ident(s) if s == "Path") && *self.peek_ahead(1) == Token::Eq {
            self.advance();
            self.advance();
        }
        let path = match self.advance() {
            Token::Ident(path) => path,
            Token::Eof => return Err("missing binding path".into()),
            other => return Err(format!("expected binding path, got {other:?}")),
        };

        let mut expr = BindingExpr { path, converter: None, mode: None };
        loop {
            match self.advance() {
                Token::Eof => return Ok(expr),
                Token::Comma => {}
                other => return Err(format!("expected `,`, got {other:?}")),
            }
            let clause = self.expect_ident("clause name")?;
            self.expect(Token::Eq)?;
            match clause.as_str() {
                "Converter" if expr.converter.is_none() => {
                    self.expect(Token::LBrace)?;
                    match self.advance() {
                        Token::Ident(kw) if kw == "StaticResource" => {}
                        other => return Err(format!("expected `StaticResource`, got {other:?}")),
                    }
                    expr.converter = Some(self.expect_ident("resource key")?);
                    self.expect(Token::RBrace)?;
                }
                "Mode" if expr.mode.is_none() => {
                    let mode = self.expect_ident("binding mode")?;
                    expr.mode = Some(mode.parse()?);
                }
                "Converter" | "Mode" => return Err(format!("`{clause}` given twice")),
                other => return Err(format!("unknown clause `{other}`")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_model::forms::RESOURCE_DICTIONARY;
    use rstest::rstest;

    fn parse(s: &str) -> BindingExpr {
        BindingExpr::parse(s).unwrap()
    }

    #[test]
    fn bare_path() {
        assert_eq!(
            parse("{Binding Name}"),
            BindingExpr { path: "Name".into(), converter: None, mode: None }
        );
    }

    #[test]
    fn explicit_path_and_surrounding_whitespace() {
        assert_eq!(parse("  { Binding  Path = First_Name }  ").path, "First_Name");
    }

    #[test]
    fn converter_and_mode_coexist() {
        let e = parse("{Binding Name, Converter={StaticResource upper}, Mode=TwoWay}");
        assert_eq!(e.converter.as_deref(), Some("upper"));
        assert_eq!(e.mode, Some(BindingMode::TwoWay));

        let e = parse("{Binding Name, Mode=OneWay, Converter={StaticResource upper}}");
        assert_eq!(e.converter.as_deref(), Some("upper"));
        assert_eq!(e.mode, Some(BindingMode::OneWay));
    }

    #[rstest]
    #[case::not_braced("Binding Name")]
    #[case::wrong_keyword("{Bind Name}")]
    #[case::missing_path("{Binding}")]
    #[case::unknown_mode("{Binding Name, Mode=Sideways}")]
    #[case::unknown_clause("{Binding Name, Source=x}")]
    #[case::repeated_clause("{Binding Name, Mode=OneWay, Mode=TwoWay}")]
    #[case::bad_converter("{Binding Name, Converter={DynamicResource x}}")]
    #[case::unclosed_converter("{Binding Name, Converter={StaticResource x}")]
    #[case::stray_character("{Binding Na.me}")]
    #[case::trailing_comma("{Binding Name,}")]
    fn malformed(#[case] input: &str) {
        assert!(matches!(BindingExpr::parse(input), Err(HydrateError::Syntax { .. })), "{input}");
    }

    #[test]
    fn unknown_converter_is_dropped() {
        let binding = parse_binding("{Binding Name, Converter={StaticResource upper}}", &ResourceTable::default()).unwrap();
        assert_eq!(binding.path, "Name");
        assert!(binding.converter.is_none());
    }

    #[test]
    fn known_converter_is_attached() {
        let mut resources = ResourceTable::default();
        let obj = RESOURCE_DICTIONARY.construct().unwrap();
        resources.insert("upper", obj.clone());
        let binding = parse_binding("{Binding Name, Converter={StaticResource upper}}", &resources).unwrap();
        assert_eq!(binding.converter, Some(obj));
    }
}
