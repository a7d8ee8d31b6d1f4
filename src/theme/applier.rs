//! The theme applier: resolves, evaluates, and cascades rule scripts
//! over a document.
//!
//! One applier is a styling session: it owns the match engine (and so
//! the memo cache), the live theme stack, parameter overrides, and the
//! dirty counter callers consult to decide on a re-render. `apply` is
//! the best-effort boundary: resolution and evaluation errors are
//! logged and absorbed so a broken theme can never take down the host.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::doc::Document;
use crate::geometry::{LogicalCanvas, Spacing};
use crate::hook::builders::{self, FrameStyle};
use crate::select::{ElementContainer, MatchEngine, Segment};
use crate::theme::script::{parse_script, Command, ParamValue, Script, Statement, Value};
use crate::theme::{Catalog, ThemeEntry, ThemeError};

/// How a script evaluation ended. Early termination is a result, not
/// an error: `exit` is control flow, and an included theme's exit never
/// aborts the includer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptFlow {
    /// The script ran to the end.
    Continue,
    /// The script hit an `exit` statement, optionally with a message.
    Halted(Option<String>),
}

/// Which screen axis a logical length converts along.
#[derive(Copy, Clone)]
enum Axis {
    Horizontal,
    Vertical,
}

/// A theme-application session over one catalog and output size.
pub struct Applier<'c> {
    catalog: &'c Catalog,
    stack: Vec<ThemeEntry>,
    engine: MatchEngine,
    params: BTreeMap<String, ParamValue>,
    logical: LogicalCanvas,
    dirty: u64,
}

impl<'c> Applier<'c> {
    /// Create an applier over a catalog, converting logical lengths for
    /// the given output size.
    pub fn new(catalog: &'c Catalog, logical: LogicalCanvas) -> Self {
        Self {
            catalog,
            stack: Vec::new(),
            engine: MatchEngine::new(),
            params: BTreeMap::new(),
            logical,
            dirty: 0,
        }
    }

    /// Set a caller-side parameter override. Overrides win over every
    /// theme-declared parameter.
    pub fn set_param(&mut self, name: impl Into<String>, value: ParamValue) {
        self.params.insert(name.into(), value);
    }

    /// Number of match-pattern evaluations so far. Callers compare this
    /// before and after [`Applier::apply`] to decide whether anything
    /// could have changed.
    pub fn dirty_count(&self) -> u64 {
        self.dirty
    }

    /// Drop all memoized match results. Required before styling a
    /// different document with the same applier.
    pub fn reset_matches(&mut self) {
        self.engine.reset();
    }

    /// Programmatic selection through the session's match engine.
    ///
    /// Counts as a match evaluation for the dirty counter, like a
    /// script-side `match`.
    pub fn select(&mut self, doc: &Document, segments: &[Segment]) -> ElementContainer {
        self.dirty += 1;
        self.engine.match_path(doc, segments)
    }

    /// Resolve an auxiliary file against the file search path and the
    /// current theme stack.
    pub fn find_file(&self, relative: &Path) -> Result<PathBuf, ThemeError> {
        self.catalog.find_file(relative, &self.stack)
    }

    /// Apply a theme by name, best-effort.
    ///
    /// Any resolution, parse, or evaluation error is logged as a
    /// warning and absorbed; styling applied before the failure stays
    /// in place. Returns whether the dirty counter moved.
    pub fn apply(&mut self, doc: &mut Document, name: &str) -> bool {
        let before = self.dirty;
        match self.try_apply(doc, name) {
            Ok(ScriptFlow::Halted(Some(message))) => {
                info!("theme '{name}' exited early: {message}");
            }
            Ok(_) => {}
            Err(err) => warn!("applying theme '{name}' failed: {err}"),
        }
        self.dirty != before
    }

    /// Fallible form of [`Applier::apply`].
    pub fn try_apply(&mut self, doc: &mut Document, name: &str) -> Result<ScriptFlow, ThemeError> {
        let entry = self.catalog.find_theme(name)?;
        self.eval_entry(doc, entry)
    }

    /// Push an entry, run its declared dependencies and its own script,
    /// pop on every exit path.
    fn eval_entry(&mut self, doc: &mut Document, entry: ThemeEntry) -> Result<ScriptFlow, ThemeError> {
        let rules_path = entry.rules_path();
        let source = fs::read_to_string(&rules_path)
            .map_err(|source| ThemeError::Io { path: rules_path, source })?;
        let script = parse_script(&source)?;
        let dependencies = entry.dependencies().to_vec();

        debug!("pushing theme '{}'", entry.name());
        self.stack.push(entry);
        let result = self.eval_pushed(doc, &dependencies, &script);
        self.stack.pop();
        result
    }

    fn eval_pushed(
        &mut self,
        doc: &mut Document,
        dependencies: &[String],
        script: &Script,
    ) -> Result<ScriptFlow, ThemeError> {
        for dependency in dependencies {
            self.include_theme(doc, dependency)?;
        }
        self.eval_script(doc, script)
    }

    /// Evaluate another theme in place. A `Halted` outcome is absorbed
    /// at this boundary (the includer keeps going); errors propagate.
    fn include_theme(&mut self, doc: &mut Document, name: &str) -> Result<(), ThemeError> {
        let entry = self.catalog.find_theme(name)?;
        match self.eval_entry(doc, entry)? {
            ScriptFlow::Continue => {}
            ScriptFlow::Halted(message) => {
                if let Some(message) = message {
                    info!("included theme '{name}' exited: {message}");
                }
            }
        }
        Ok(())
    }

    fn eval_script(&mut self, doc: &mut Document, script: &Script) -> Result<ScriptFlow, ThemeError> {
        for statement in &script.statements {
            match statement {
                Statement::Include(name) => self.include_theme(doc, name)?,
                Statement::Exit(message) => return Ok(ScriptFlow::Halted(message.clone())),
                Statement::Match { patterns, commands } => {
                    for pattern in patterns {
                        let set = self.engine.match_path(doc, pattern);
                        self.dirty += 1;
                        self.run_commands(doc, &set, commands)?;
                    }
                }
            }
        }
        Ok(ScriptFlow::Continue)
    }

    // ── Command execution ────────────────────────────────────────────

    fn run_commands(
        &mut self,
        doc: &mut Document,
        set: &ElementContainer,
        commands: &[Command],
    ) -> Result<(), ThemeError> {
        for command in commands {
            match command {
                Command::SetProp { key, value } => self.apply_prop(doc, set, key, value)?,
                Command::Indent { amount, name } => {
                    let amount = self.resolve_length(amount, Axis::Horizontal)?;
                    set.each(doc, |doc, id| {
                        builders::indent(doc, id, amount, name.as_deref());
                    });
                }
                Command::Frame { color, line_width, name } => {
                    let color = self.resolve_color(color.as_ref())?;
                    let line_width = match line_width {
                        Some(value) => self.resolve_length(value, Axis::Horizontal)?,
                        None => 1,
                    };
                    let style = FrameStyle { color, line_width, padding: 0 };
                    set.each(doc, |doc, id| {
                        builders::frame(doc, id, style.clone(), name.as_deref());
                    });
                }
                Command::Mark { glyph, color, name } => {
                    let glyph = self.resolve_text(glyph)?;
                    let color = self.resolve_color(color.as_ref())?;
                    set.each(doc, |doc, id| {
                        builders::mark(doc, id, &glyph, &color, name.as_deref());
                    });
                }
                Command::Number { start, color, name } => {
                    let color = self.resolve_color(color.as_ref())?;
                    // Labels are fixed now, at application time, so the
                    // two-phase draw protocol can re-run hooks freely.
                    let mut next = *start;
                    set.each(doc, |doc, id| {
                        builders::numbering(doc, id, format!("{next}."), &color, name.as_deref());
                        next += 1;
                    });
                }
            }
        }
        Ok(())
    }

    fn apply_prop(
        &mut self,
        doc: &mut Document,
        set: &ElementContainer,
        key: &str,
        value: &Value,
    ) -> Result<(), ThemeError> {
        match key {
            "width" => {
                let v = self.resolve_length(value, Axis::Horizontal)?;
                set.each(doc, |doc, id| {
                    if let Some(data) = doc.get_mut(id) {
                        data.size.width = v;
                    }
                });
            }
            "height" => {
                let v = self.resolve_length(value, Axis::Vertical)?;
                set.each(doc, |doc, id| {
                    if let Some(data) = doc.get_mut(id) {
                        data.size.height = v;
                    }
                });
            }
            "margin" | "padding" => {
                let h = self.resolve_length(value, Axis::Horizontal)?;
                let v = self.resolve_length(value, Axis::Vertical)?;
                let spacing = Spacing::new(v, h, v, h);
                let is_margin = key == "margin";
                set.each(doc, |doc, id| {
                    if let Some(data) = doc.get_mut(id) {
                        if is_margin {
                            data.margin = spacing;
                        } else {
                            data.padding = spacing;
                        }
                    }
                });
            }
            "margin-left" | "margin-right" | "margin-top" | "margin-bottom" | "padding-left"
            | "padding-right" | "padding-top" | "padding-bottom" => {
                let axis = if key.ends_with("left") || key.ends_with("right") {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                };
                let v = self.resolve_length(value, axis)?;
                let key = key.to_string();
                set.each(doc, |doc, id| {
                    let Some(data) = doc.get_mut(id) else { return };
                    let spacing = if key.starts_with("margin") {
                        &mut data.margin
                    } else {
                        &mut data.padding
                    };
                    match key.rsplit('-').next() {
                        Some("left") => spacing.left = v,
                        Some("right") => spacing.right = v,
                        Some("top") => spacing.top = v,
                        _ => spacing.bottom = v,
                    }
                });
            }
            _ => {
                let text = self.resolve_text(value)?;
                let key = key.to_string();
                set.each(doc, |doc, id| {
                    if let Some(data) = doc.get_mut(id) {
                        data.set_prop(&key, &text);
                    }
                });
            }
        }
        Ok(())
    }

    // ── Value resolution ─────────────────────────────────────────────

    /// Caller overrides first, then stack entries outermost-first: the
    /// including theme's declaration shadows an included one's, so a
    /// derived theme can retune the parameters its base consumes.
    fn lookup_param(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .get(name)
            .or_else(|| self.stack.iter().find_map(|entry| entry.parameters().get(name)))
    }

    fn current_theme(&self) -> String {
        self.stack.last().map(|entry| entry.name().to_string()).unwrap_or_default()
    }

    fn script_error(&self, message: impl Into<String>) -> ThemeError {
        ThemeError::Script { theme: self.current_theme(), message: message.into() }
    }

    /// Resolve a value to prop-bag text.
    fn resolve_text(&self, value: &Value) -> Result<String, ThemeError> {
        match value {
            Value::Str(s) | Value::Ident(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Pixels(p) => Ok(format!("{p}px")),
            Value::ParamRef(name) => self
                .lookup_param(name)
                .map(ParamValue::as_text)
                .ok_or_else(|| self.script_error(format!("unknown parameter '${name}'"))),
        }
    }

    fn resolve_color(&self, value: Option<&Value>) -> Result<String, ThemeError> {
        match value {
            Some(value) => self.resolve_text(value),
            None => Ok("black".to_string()),
        }
    }

    /// Resolve a value to a screen-pixel length. Bare numbers are
    /// logical units converted along `axis`; `px` values pass through.
    fn resolve_length(&self, value: &Value, axis: Axis) -> Result<i32, ThemeError> {
        match value {
            Value::Number(n) => Ok(self.to_screen(*n, axis)),
            Value::Pixels(p) => Ok(*p),
            Value::ParamRef(name) => match self.lookup_param(name) {
                Some(ParamValue::Number(n)) => Ok(self.to_screen(*n, axis)),
                Some(ParamValue::Str(_)) => {
                    Err(self.script_error(format!("parameter '${name}' is not a length")))
                }
                None => Err(self.script_error(format!("unknown parameter '${name}'"))),
            },
            Value::Str(s) | Value::Ident(s) => {
                Err(self.script_error(format!("expected a length, got '{s}'")))
            }
        }
    }

    fn to_screen(&self, logical: i32, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.logical.screen_w(logical),
            Axis::Vertical => self.logical.screen_h(logical),
        }
    }
}
