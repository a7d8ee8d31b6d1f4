//! The rule-script DSL: logos tokenizer, parsed model, and
//! recursive-descent parser.

pub mod model;
pub mod parser;
pub mod tokenizer;

pub use model::{Command, ParamValue, Properties, Script, Statement, Value};
pub use parser::{parse_properties, parse_script, ParseError};
pub use tokenizer::{tokenize, Token};
