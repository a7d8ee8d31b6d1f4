//! Data model for parsed rule scripts and theme property files.

use std::collections::BTreeMap;

use crate::select::Segment;

/// A parsed `theme.rules` script: an ordered statement list.
#[derive(Debug, Default)]
pub struct Script {
    pub statements: Vec<Statement>,
}

/// One top-level statement.
#[derive(Debug)]
pub enum Statement {
    /// `include "name";` — evaluate another theme in place.
    Include(String),
    /// `exit ["message"];` — stop evaluating this script.
    Exit(Option<String>),
    /// `match pattern ("," pattern)* "{" command* "}"`.
    ///
    /// Each pattern is evaluated independently against the same command
    /// body, in declaration order.
    Match { patterns: Vec<Vec<Segment>>, commands: Vec<Command> },
}

/// One command inside a `match` body.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `key: value;` — set a geometry field or prop-bag entry.
    SetProp { key: String, value: Value },
    /// `indent value [named "..."];`
    Indent { amount: Value, name: Option<String> },
    /// `frame ["color"] [width] [named "..."];`
    Frame { color: Option<Value>, line_width: Option<Value>, name: Option<String> },
    /// `mark "glyph" ["color"] [named "..."];`
    Mark { glyph: Value, color: Option<Value>, name: Option<String> },
    /// `number [from N] ["color"] [named "..."];`
    Number { start: u32, color: Option<Value>, name: Option<String> },
}

/// A literal or parameter reference on the right side of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Bare integer: a length in logical units.
    Number(i32),
    /// `Npx`: a raw screen-pixel length, exempt from normalization.
    Pixels(i32),
    /// Double-quoted string.
    Str(String),
    /// Bare word (color names and the like).
    Ident(String),
    /// `$name`: resolved through overrides and the theme stack.
    ParamRef(String),
}

/// A parsed `theme.props` file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Properties {
    pub description: Option<String>,
    pub is_abstract: bool,
    pub dependencies: Vec<String>,
    pub parameters: BTreeMap<String, ParamValue>,
}

/// A declared parameter value. Parameters are string- or number-typed;
/// richer values stay in the rule script itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Number(i32),
}

impl ParamValue {
    /// The value rendered as prop-bag text.
    pub fn as_text(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Number(n) => n.to_string(),
        }
    }
}
