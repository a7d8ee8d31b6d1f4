//! Theme packages: discovery, the rule-script DSL, and the applier that
//! styles documents through the selector engine.

pub mod applier;
pub mod catalog;
pub mod entry;
pub mod script;

use std::path::PathBuf;

pub use applier::{Applier, ScriptFlow};
pub use catalog::Catalog;
pub use entry::{ThemeEntry, PROPS_FILE, RULES_FILE};
pub use script::{parse_properties, parse_script, ParamValue, ParseError};

/// Errors from theme resolution, parsing, and application.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("theme '{name}' not found (searched {searched:?})")]
    ThemeNotFound { name: String, searched: Vec<PathBuf> },
    #[error("file '{path}' not found (searched themes {searched:?})")]
    FileNotFound { path: PathBuf, searched: Vec<String> },
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("theme '{theme}': {message}")]
    Script { theme: String, message: String },
}
