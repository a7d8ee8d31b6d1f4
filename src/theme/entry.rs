//! A theme package: one directory holding a rule script and optional
//! property declarations.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::script::{parse_properties, ParamValue};
use crate::theme::ThemeError;

/// Rule-script file every theme directory must carry to be discoverable.
pub const RULES_FILE: &str = "theme.rules";

/// Optional property-declaration file.
pub const PROPS_FILE: &str = "theme.props";

/// An immutable description of one theme package.
///
/// The name is the directory's base name; everything else comes from the
/// optional `theme.props` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeEntry {
    name: String,
    description: Option<String>,
    is_abstract: bool,
    dependencies: Vec<String>,
    parameters: BTreeMap<String, ParamValue>,
    base_dir: PathBuf,
}

impl ThemeEntry {
    /// Load the entry for a theme directory.
    ///
    /// Fails if the directory carries no rule script, if the property
    /// file cannot be read, or if it does not parse.
    pub fn load(dir: &Path) -> Result<Self, ThemeError> {
        let rules = dir.join(RULES_FILE);
        if !rules.is_file() {
            return Err(ThemeError::ThemeNotFound {
                name: dir_name(dir),
                searched: vec![dir.to_path_buf()],
            });
        }

        let props_path = dir.join(PROPS_FILE);
        let props = if props_path.is_file() {
            let source = fs::read_to_string(&props_path)
                .map_err(|source| ThemeError::Io { path: props_path, source })?;
            parse_properties(&source)?
        } else {
            Default::default()
        };

        Ok(Self {
            name: dir_name(dir),
            description: props.description,
            is_abstract: props.is_abstract,
            dependencies: props.dependencies,
            parameters: props.parameters,
            base_dir: dir.to_path_buf(),
        })
    }

    /// The theme name (directory base name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description, if declared.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the theme is declared abstract (a building block meant
    /// to be included, not applied directly).
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Themes this entry declares it builds on, applied before its own
    /// statements.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Declared parameters.
    pub fn parameters(&self) -> &BTreeMap<String, ParamValue> {
        &self.parameters
    }

    /// The theme directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the theme's rule script.
    pub fn rules_path(&self) -> PathBuf {
        self.base_dir.join(RULES_FILE)
    }
}

impl PartialOrd for ThemeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ThemeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

fn dir_name(dir: &Path) -> String {
    dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn theme_dir(root: &Path, name: &str, rules: &str, props: Option<&str>) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(RULES_FILE), rules).unwrap();
        if let Some(props) = props {
            fs::write(dir.join(PROPS_FILE), props).unwrap();
        }
        dir
    }

    #[test]
    fn loads_minimal_theme() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = theme_dir(tmp.path(), "plain", "", None);

        let entry = ThemeEntry::load(&dir).unwrap();
        assert_eq!(entry.name(), "plain");
        assert_eq!(entry.description(), None);
        assert!(!entry.is_abstract());
        assert!(entry.dependencies().is_empty());
        assert!(entry.parameters().is_empty());
        assert_eq!(entry.rules_path(), dir.join(RULES_FILE));
    }

    #[test]
    fn loads_declared_properties() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = theme_dir(
            tmp.path(),
            "red",
            "match Title { foreground: red; }",
            Some(
                "description \"Red accents\";\n\
                 abstract;\n\
                 depends \"base\";\n\
                 param accent = \"red\";\n",
            ),
        );

        let entry = ThemeEntry::load(&dir).unwrap();
        assert_eq!(entry.description(), Some("Red accents"));
        assert!(entry.is_abstract());
        assert_eq!(entry.dependencies(), ["base"]);
        assert_eq!(entry.parameters()["accent"], ParamValue::Str("red".into()));
    }

    #[test]
    fn missing_rules_file_is_not_a_theme() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("empty");
        fs::create_dir_all(&dir).unwrap();

        assert!(matches!(
            ThemeEntry::load(&dir),
            Err(ThemeError::ThemeNotFound { name, .. }) if name == "empty"
        ));
    }

    #[test]
    fn broken_props_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = theme_dir(tmp.path(), "broken", "", Some("param oops"));
        assert!(matches!(ThemeEntry::load(&dir), Err(ThemeError::Parse(_))));
    }

    #[test]
    fn entries_order_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        let a = ThemeEntry::load(&theme_dir(tmp.path(), "alpha", "", None)).unwrap();
        let b = ThemeEntry::load(&theme_dir(tmp.path(), "beta", "", None)).unwrap();
        assert!(a < b);
    }
}
