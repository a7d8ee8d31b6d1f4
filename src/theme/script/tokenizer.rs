//! logos-based tokenizer for the rule-script DSL.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `**` beats two `*`, `12px` beats `12` + `px`)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - keyword spellings (`include`, `deck`, ...) win over [`Token::Ident`]
//!   at equal length, while `included` still lexes as one identifier
//! - `r"Title|Body"` matches [`Token::RegexLit`], not `Ident` + `Str`
//! - `12px` matches [`Token::Pixels`], not `Number` + `Ident`
//!
//! Whitespace and `#`-to-end-of-line comments are skipped.

use logos::Logos;

/// Rule-script token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // ── Keywords (defined before Ident) ──────────────────────────────

    /// `include` statement keyword.
    #[token("include")]
    Include,

    /// `exit` statement keyword.
    #[token("exit")]
    Exit,

    /// `match` statement keyword.
    #[token("match")]
    Match,

    /// `named` clause keyword (hook naming).
    #[token("named")]
    Named,

    /// `from` clause keyword (numbering start).
    #[token("from")]
    From,

    /// `deck` segment keyword: reset to the full slide sequence.
    #[token("deck")]
    Deck,

    /// `description` declaration keyword (property files).
    #[token("description")]
    Description,

    /// `abstract` declaration keyword (property files).
    #[token("abstract")]
    Abstract,

    /// `depends` declaration keyword (property files).
    #[token("depends")]
    Depends,

    /// `param` declaration keyword (property files).
    #[token("param")]
    Param,

    // ── Compound tokens ──────────────────────────────────────────────

    /// Regex literal: `r"Title|Subtitle"`.
    #[regex(r#"r"[^"]*""#)]
    RegexLit,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    Str,

    /// Parameter reference: `$foreground`, `$title-size`.
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_-]*")]
    ParamRef,

    /// Raw pixel length: `12px`, `-4px`.
    #[regex(r"-?[0-9]+px")]
    Pixels,

    /// Integer in logical units, possibly negative.
    #[regex(r"-?[0-9]+")]
    Number,

    /// Identifier: type tags, property names, color names, etc.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `**`: descendant-closure segment.
    #[token("**")]
    DoubleStar,

    // ── Single-character punctuation ─────────────────────────────────

    /// `*`
    #[token("*")]
    Star,

    /// `/`
    #[token("/")]
    Slash,

    /// `,`
    #[token(",")]
    Comma,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// `=`
    #[token("=")]
    Equals,

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,
}

/// Tokenize a rule-script string into `(Token, &str)` pairs.
///
/// Lenient inspection helper: logos error tokens are skipped. The
/// parser lexes its own stream and rejects unlexable input instead.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}
