//! Recursive descent parser for rule scripts and theme property files.
//!
//! Parses script text into a [`Script`] (statement list) or a
//! [`Properties`] declaration block. Uses the logos-based tokenizer from
//! [`crate::theme::script::tokenizer`].

use logos::Logos;

use crate::select::{Matcher, Segment};
use crate::theme::script::model::*;
use crate::theme::script::tokenizer::Token;

/// Errors from rule-script parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid regex literal: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[error("unlexable input at byte {offset}: {text:?}")]
    Unlexable { offset: usize, text: String },
}

/// A positioned token (index in the stream, for error reporting).
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    pos: usize,
}

/// Tokenize input using logos, keeping stream positions. Input the
/// lexer cannot tokenize is a script error, not something to skip over.
fn tokenize_positioned(input: &str) -> Result<Vec<PToken>, ParseError> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    let mut idx = 0;

    for (result, span) in lexer.spanned() {
        match result {
            Ok(token) => {
                tokens.push(PToken { text: input[span].to_string(), token, pos: idx });
                idx += 1;
            }
            Err(()) => {
                return Err(ParseError::Unlexable {
                    offset: span.start,
                    text: input[span].to_string(),
                });
            }
        }
    }

    Ok(tokens)
}

/// Parse a `theme.rules` script into a [`Script`].
pub fn parse_script(input: &str) -> Result<Script, ParseError> {
    let mut parser = Parser { tokens: tokenize_positioned(input)?, cursor: 0 };

    let mut statements = Vec::new();
    while !parser.is_eof() {
        statements.push(parser.parse_statement()?);
    }

    Ok(Script { statements })
}

/// Parse a `theme.props` declaration block into [`Properties`].
pub fn parse_properties(input: &str) -> Result<Properties, ParseError> {
    let mut parser = Parser { tokens: tokenize_positioned(input)?, cursor: 0 };

    let mut props = Properties::default();
    while !parser.is_eof() {
        parser.parse_declaration(&mut props)?;
    }

    Ok(props)
}

/// Strip the surrounding quotes from a `Str` token's text.
fn unquote(text: &str) -> String {
    text[1..text.len() - 1].to_string()
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn peek2(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor + 1)
    }

    fn advance(&mut self) -> Option<&PToken> {
        if self.cursor < self.tokens.len() {
            let tok = &self.tokens[self.cursor];
            self.cursor += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {:?}", expected))),
        }
    }

    /// Consume the next token if it matches, returning whether it did.
    fn eat(&mut self, token: &Token) -> bool {
        if self.peek().is_some_and(|t| &t.token == token) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        match self.peek() {
            Some(tok) => {
                ParseError::UnexpectedToken { position: tok.pos, message: message.into() }
            }
            None => ParseError::UnexpectedEof(message.into()),
        }
    }

    // ── Statements ───────────────────────────────────────────────────

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek().map(|t| t.token.clone()) {
            Some(Token::Include) => {
                self.advance();
                let name = unquote(&self.expect(&Token::Str)?.text);
                self.expect(&Token::Semicolon)?;
                Ok(Statement::Include(name))
            }
            Some(Token::Exit) => {
                self.advance();
                let message = if self.peek().is_some_and(|t| t.token == Token::Str) {
                    Some(unquote(&self.advance().map(|t| t.text.clone()).unwrap_or_default()))
                } else {
                    None
                };
                self.expect(&Token::Semicolon)?;
                Ok(Statement::Exit(message))
            }
            Some(Token::Match) => {
                self.advance();
                let mut patterns = vec![self.parse_pattern()?];
                while self.eat(&Token::Comma) {
                    patterns.push(self.parse_pattern()?);
                }
                self.expect(&Token::BraceOpen)?;
                let mut commands = Vec::new();
                while !self.peek().is_some_and(|t| t.token == Token::BraceClose) {
                    if self.is_eof() {
                        return Err(ParseError::UnexpectedEof("expected '}'".into()));
                    }
                    commands.push(self.parse_command()?);
                }
                self.expect(&Token::BraceClose)?;
                Ok(Statement::Match { patterns, commands })
            }
            _ => Err(self.error_here("expected 'include', 'exit' or 'match'")),
        }
    }

    // ── Patterns ─────────────────────────────────────────────────────

    fn parse_pattern(&mut self) -> Result<Vec<Segment>, ParseError> {
        let mut segments = vec![self.parse_segment()?];
        while self.eat(&Token::Slash) {
            segments.push(self.parse_segment()?);
        }
        Ok(segments)
    }

    fn parse_segment(&mut self) -> Result<Segment, ParseError> {
        let tok = match self.advance() {
            Some(tok) => tok.clone(),
            None => return Err(ParseError::UnexpectedEof("expected a pattern segment".into())),
        };
        match tok.token {
            Token::Deck => Ok(Segment::Reset),
            Token::Star => Ok(Segment::Any),
            Token::DoubleStar => Ok(Segment::Descendants),
            Token::Ident => Ok(Segment::Is(Matcher::type_tag(&tok.text))),
            Token::Str => Ok(Segment::Is(Matcher::exact(&unquote(&tok.text)))),
            Token::RegexLit => {
                // Strip the r"..." wrapping before compiling.
                let pattern = &tok.text[2..tok.text.len() - 1];
                Ok(Segment::Is(Matcher::regex(pattern)?))
            }
            _ => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected a pattern segment, got {:?} '{}'", tok.token, tok.text),
            }),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    fn parse_command(&mut self) -> Result<Command, ParseError> {
        // `key: value;` is a prop-set for any key, including the command
        // words; only a bare command word starts a command.
        let is_prop_set = self.peek().is_some_and(|t| t.token == Token::Ident)
            && self.peek2().is_some_and(|t| t.token == Token::Colon);
        if is_prop_set {
            let key = self.expect(&Token::Ident)?.text;
            self.expect(&Token::Colon)?;
            let value = self.parse_value()?;
            self.expect(&Token::Semicolon)?;
            return Ok(Command::SetProp { key, value });
        }

        let tok = self.expect(&Token::Ident)?;
        match tok.text.as_str() {
            "indent" => {
                let amount = self.parse_value()?;
                let name = self.parse_named_clause()?;
                self.expect(&Token::Semicolon)?;
                Ok(Command::Indent { amount, name })
            }
            "frame" => {
                let color = self.parse_optional_color()?;
                let line_width = if self
                    .peek()
                    .is_some_and(|t| matches!(t.token, Token::Number | Token::Pixels))
                {
                    Some(self.parse_value()?)
                } else {
                    None
                };
                let name = self.parse_named_clause()?;
                self.expect(&Token::Semicolon)?;
                Ok(Command::Frame { color, line_width, name })
            }
            "mark" => {
                let glyph = match self.peek().map(|t| t.token.clone()) {
                    Some(Token::Str | Token::ParamRef) => self.parse_value()?,
                    _ => return Err(self.error_here("expected a glyph string after 'mark'")),
                };
                let color = self.parse_optional_color()?;
                let name = self.parse_named_clause()?;
                self.expect(&Token::Semicolon)?;
                Ok(Command::Mark { glyph, color, name })
            }
            "number" => {
                let start = if self.eat(&Token::From) {
                    let tok = self.expect(&Token::Number)?;
                    tok.text.parse::<u32>().map_err(|_| ParseError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("numbering start '{}' is not a positive integer", tok.text),
                    })?
                } else {
                    1
                };
                let color = self.parse_optional_color()?;
                let name = self.parse_named_clause()?;
                self.expect(&Token::Semicolon)?;
                Ok(Command::Number { start, color, name })
            }
            other => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("unknown command '{other}'"),
            }),
        }
    }

    /// `["color"]` — a string or parameter reference, if present.
    fn parse_optional_color(&mut self) -> Result<Option<Value>, ParseError> {
        if self.peek().is_some_and(|t| matches!(t.token, Token::Str | Token::ParamRef)) {
            Ok(Some(self.parse_value()?))
        } else {
            Ok(None)
        }
    }

    /// `[named "..."]` — an optional hook-name clause.
    fn parse_named_clause(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat(&Token::Named) {
            Ok(Some(unquote(&self.expect(&Token::Str)?.text)))
        } else {
            Ok(None)
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let tok = match self.advance() {
            Some(tok) => tok.clone(),
            None => return Err(ParseError::UnexpectedEof("expected a value".into())),
        };
        match tok.token {
            Token::Number => self.parse_int(&tok).map(Value::Number),
            Token::Pixels => {
                let digits = PToken { text: tok.text[..tok.text.len() - 2].to_string(), ..tok };
                self.parse_int(&digits).map(Value::Pixels)
            }
            Token::Str => Ok(Value::Str(unquote(&tok.text))),
            Token::Ident => Ok(Value::Ident(tok.text)),
            Token::ParamRef => Ok(Value::ParamRef(tok.text[1..].to_string())),
            _ => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected a value, got {:?} '{}'", tok.token, tok.text),
            }),
        }
    }

    fn parse_int(&self, tok: &PToken) -> Result<i32, ParseError> {
        tok.text.parse::<i32>().map_err(|_| ParseError::UnexpectedToken {
            position: tok.pos,
            message: format!("number '{}' is out of range", tok.text),
        })
    }

    // ── Property-file declarations ───────────────────────────────────

    fn parse_declaration(&mut self, props: &mut Properties) -> Result<(), ParseError> {
        match self.peek().map(|t| t.token.clone()) {
            Some(Token::Description) => {
                self.advance();
                props.description = Some(unquote(&self.expect(&Token::Str)?.text));
                self.expect(&Token::Semicolon)?;
            }
            Some(Token::Abstract) => {
                self.advance();
                props.is_abstract = true;
                self.expect(&Token::Semicolon)?;
            }
            Some(Token::Depends) => {
                self.advance();
                props.dependencies.push(unquote(&self.expect(&Token::Str)?.text));
                while self.eat(&Token::Comma) {
                    props.dependencies.push(unquote(&self.expect(&Token::Str)?.text));
                }
                self.expect(&Token::Semicolon)?;
            }
            Some(Token::Param) => {
                self.advance();
                let name = self.expect(&Token::Ident)?.text;
                self.expect(&Token::Equals)?;
                let value = match self.advance().cloned() {
                    Some(tok) if tok.token == Token::Str => ParamValue::Str(unquote(&tok.text)),
                    Some(tok) if tok.token == Token::Number => {
                        ParamValue::Number(self.parse_int(&tok)?)
                    }
                    Some(tok) => {
                        return Err(ParseError::UnexpectedToken {
                            position: tok.pos,
                            message: format!(
                                "expected a string or number parameter value, got '{}'",
                                tok.text
                            ),
                        })
                    }
                    None => return Err(ParseError::UnexpectedEof("expected a parameter value".into())),
                };
                self.expect(&Token::Semicolon)?;
                props.parameters.insert(name, value);
            }
            _ => {
                return Err(
                    self.error_here("expected 'description', 'abstract', 'depends' or 'param'")
                )
            }
        }
        Ok(())
    }
}
