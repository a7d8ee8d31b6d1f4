//! Theme discovery: scans search roots for theme directories and
//! resolves names and auxiliary files.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::theme::entry::{ThemeEntry, RULES_FILE};
use crate::theme::ThemeError;

/// The set of places themes and their auxiliary files live.
///
/// Search roots hold theme directories (one subdirectory per theme);
/// the file search path holds shared assets resolvable by
/// [`Catalog::find_file`] independently of any theme.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    search_roots: Vec<PathBuf>,
    file_search_path: Vec<PathBuf>,
}

impl Catalog {
    /// Create a catalog over the given theme search roots.
    pub fn new(search_roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self { search_roots: search_roots.into_iter().collect(), file_search_path: Vec::new() }
    }

    /// Append a theme search root. Earlier roots win on name clashes.
    pub fn add_root(&mut self, root: impl Into<PathBuf>) {
        self.search_roots.push(root.into());
    }

    /// Append a directory to the auxiliary file search path.
    pub fn add_file_path(&mut self, dir: impl Into<PathBuf>) {
        self.file_search_path.push(dir.into());
    }

    /// The configured theme search roots.
    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    /// Every discoverable theme, sorted by name.
    ///
    /// A directory counts as a theme when it carries a rule script.
    /// Unreadable roots are skipped; a directory whose property file is
    /// broken is logged and skipped rather than failing the whole scan.
    pub fn themes(&self) -> Vec<ThemeEntry> {
        let mut entries: Vec<ThemeEntry> = Vec::new();

        for root in &self.search_roots {
            let Ok(dir) = fs::read_dir(root) else { continue };
            for child in dir.flatten() {
                let path = child.path();
                if !path.is_dir() || !path.join(RULES_FILE).is_file() {
                    continue;
                }
                match ThemeEntry::load(&path) {
                    Ok(entry) => {
                        // Earlier roots win on duplicate names.
                        if !entries.iter().any(|e| e.name() == entry.name()) {
                            entries.push(entry);
                        }
                    }
                    Err(err) => warn!("skipping theme at {}: {err}", path.display()),
                }
            }
        }

        entries.sort();
        entries
    }

    /// Resolve a theme by name: the first matching directory across the
    /// search roots, in root order.
    pub fn find_theme(&self, name: &str) -> Result<ThemeEntry, ThemeError> {
        for root in &self.search_roots {
            let dir = root.join(name);
            if dir.join(RULES_FILE).is_file() {
                return ThemeEntry::load(&dir);
            }
        }
        Err(ThemeError::ThemeNotFound {
            name: name.to_string(),
            searched: self.search_roots.clone(),
        })
    }

    /// Resolve an auxiliary file by relative path.
    ///
    /// The file search path is consulted first, then the live theme
    /// stack nearest-pushed-first, so the theme whose statements are
    /// currently running finds its own assets before anyone else's.
    pub fn find_file(&self, relative: &Path, stack: &[ThemeEntry]) -> Result<PathBuf, ThemeError> {
        for dir in &self.file_search_path {
            let candidate = dir.join(relative);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        for entry in stack.iter().rev() {
            let candidate = entry.base_dir().join(relative);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        Err(ThemeError::FileNotFound {
            path: relative.to_path_buf(),
            searched: stack.iter().rev().map(|e| e.name().to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::entry::PROPS_FILE;

    fn theme_dir(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(RULES_FILE), "").unwrap();
        dir
    }

    #[test]
    fn themes_are_sorted_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        theme_dir(tmp.path(), "zeta");
        theme_dir(tmp.path(), "alpha");
        theme_dir(tmp.path(), "mid");

        let catalog = Catalog::new([tmp.path().to_path_buf()]);
        let names: Vec<_> = catalog.themes().iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn directories_without_rules_are_not_themes() {
        let tmp = tempfile::tempdir().unwrap();
        theme_dir(tmp.path(), "real");
        fs::create_dir_all(tmp.path().join("not-a-theme")).unwrap();
        fs::write(tmp.path().join("stray.txt"), "x").unwrap();

        let catalog = Catalog::new([tmp.path().to_path_buf()]);
        assert_eq!(catalog.themes().len(), 1);
    }

    #[test]
    fn earlier_root_wins_on_duplicate_names() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let dir = theme_dir(first.path(), "shared");
        fs::write(dir.join(PROPS_FILE), "description \"from first\";").unwrap();
        theme_dir(second.path(), "shared");

        let catalog = Catalog::new([first.path().to_path_buf(), second.path().to_path_buf()]);
        let themes = catalog.themes();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].description(), Some("from first"));

        let found = catalog.find_theme("shared").unwrap();
        assert_eq!(found.description(), Some("from first"));
    }

    #[test]
    fn find_theme_reports_searched_roots() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = Catalog::new([tmp.path().to_path_buf()]);

        let err = catalog.find_theme("missing").unwrap_err();
        assert!(matches!(
            err,
            ThemeError::ThemeNotFound { ref name, ref searched }
                if name == "missing" && searched.len() == 1
        ));
    }

    #[test]
    fn find_file_prefers_file_search_path() {
        let tmp = tempfile::tempdir().unwrap();
        let assets = tmp.path().join("assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("logo.txt"), "shared").unwrap();

        let theme = theme_dir(tmp.path(), "base");
        fs::write(theme.join("logo.txt"), "theme-local").unwrap();
        let entry = ThemeEntry::load(&theme).unwrap();

        let mut catalog = Catalog::new([tmp.path().to_path_buf()]);
        catalog.add_file_path(&assets);

        let found = catalog.find_file(Path::new("logo.txt"), &[entry]).unwrap();
        assert_eq!(found, assets.join("logo.txt"));
    }

    #[test]
    fn find_file_searches_stack_nearest_pushed_first() {
        let tmp = tempfile::tempdir().unwrap();
        let base = theme_dir(tmp.path(), "base");
        let red = theme_dir(tmp.path(), "red");
        fs::write(base.join("bg.txt"), "base").unwrap();
        fs::write(red.join("bg.txt"), "red").unwrap();

        let catalog = Catalog::new([tmp.path().to_path_buf()]);
        let stack =
            vec![ThemeEntry::load(&base).unwrap(), ThemeEntry::load(&red).unwrap()];

        // "red" was pushed last, so its copy shadows the base one.
        let found = catalog.find_file(Path::new("bg.txt"), &stack).unwrap();
        assert_eq!(found, red.join("bg.txt"));
    }

    #[test]
    fn find_file_reports_entries_tried() {
        let tmp = tempfile::tempdir().unwrap();
        let base = theme_dir(tmp.path(), "base");
        let catalog = Catalog::new([tmp.path().to_path_buf()]);
        let stack = vec![ThemeEntry::load(&base).unwrap()];

        let err = catalog.find_file(Path::new("missing.txt"), &stack).unwrap_err();
        assert!(matches!(
            err,
            ThemeError::FileNotFound { ref searched, .. } if searched == &["base".to_string()]
        ));
    }
}
