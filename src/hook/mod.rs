//! Named, ordered draw-time hooks with a simulate-then-commit protocol.
//!
//! Every element carries two hook lists: pre-draw hooks adjust geometry
//! (each receives a [`Region`] and returns a possibly-adjusted one,
//! chained into the next hook), post-draw hooks perform drawing side
//! effects. The render driver runs both lists twice per draw attempt:
//! once with [`Phase::Simulation`] (geometry only, no visible output)
//! and once with [`Phase::Commit`]. Hooks receive the phase and must
//! honor it; pre hooks must compute identical results in both phases
//! from the same inputs.
//!
//! Registering a hook under an already-used name replaces the previous
//! hook in place rather than appending a second one. Unnamed hooks
//! always append.

pub mod builders;

use std::fmt;

use crate::doc::ElementId;
use crate::geometry::Region;
use crate::render::DrawContext;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Which half of the two-phase draw protocol a hook is running in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Geometry-only pass: visible side effects must be suppressed.
    Simulation,
    /// Final pass: drawing side effects are allowed.
    Commit,
}

impl Phase {
    /// Whether this is the simulation pass.
    #[inline]
    pub const fn is_simulation(self) -> bool {
        matches!(self, Phase::Simulation)
    }
}

// ---------------------------------------------------------------------------
// Hook types
// ---------------------------------------------------------------------------

/// A pre-draw hook: receives the current geometry and returns an
/// adjusted one. Runs in both phases.
pub type PreHookFn = dyn FnMut(&mut DrawContext<'_>, ElementId, Region, Phase) -> Region;

/// A post-draw hook: receives the final geometry and may draw during
/// [`Phase::Commit`]. Must no-op during simulation.
pub type PostHookFn = dyn FnMut(&mut DrawContext<'_>, ElementId, Region, Phase);

/// A single named pre-draw hook.
pub struct PreHook {
    pub name: Option<String>,
    pub f: Box<PreHookFn>,
}

/// A single named post-draw hook.
pub struct PostHook {
    pub name: Option<String>,
    pub f: Box<PostHookFn>,
}

impl PreHook {
    /// Create a pre-draw hook with an optional name.
    pub fn new(
        name: Option<&str>,
        f: impl FnMut(&mut DrawContext<'_>, ElementId, Region, Phase) -> Region + 'static,
    ) -> Self {
        Self { name: name.map(str::to_owned), f: Box::new(f) }
    }
}

impl PostHook {
    /// Create a post-draw hook with an optional name.
    pub fn new(
        name: Option<&str>,
        f: impl FnMut(&mut DrawContext<'_>, ElementId, Region, Phase) + 'static,
    ) -> Self {
        Self { name: name.map(str::to_owned), f: Box::new(f) }
    }
}

impl fmt::Debug for PreHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreHook").field("name", &self.name).finish_non_exhaustive()
    }
}

impl fmt::Debug for PostHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostHook").field("name", &self.name).finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// HookSet
// ---------------------------------------------------------------------------

/// The ordered pre/post hook lists carried by one element.
#[derive(Debug, Default)]
pub struct HookSet {
    pub(crate) pre: Vec<PreHook>,
    pub(crate) post: Vec<PostHook>,
}

impl HookSet {
    /// Create an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a pre-draw hook.
    ///
    /// If the hook carries a name already present in the pre list, the
    /// existing hook is removed first (idempotent replace, keeping the
    /// new hook's position at the end of the list).
    pub fn add_pre(&mut self, hook: PreHook) {
        if let Some(name) = hook.name.as_deref() {
            self.pre.retain(|h| h.name.as_deref() != Some(name));
        }
        self.pre.push(hook);
    }

    /// Install a post-draw hook, replacing any existing hook of the
    /// same name.
    pub fn add_post(&mut self, hook: PostHook) {
        if let Some(name) = hook.name.as_deref() {
            self.post.retain(|h| h.name.as_deref() != Some(name));
        }
        self.post.push(hook);
    }

    /// Remove pre and post hooks registered under `name`.
    pub fn remove(&mut self, name: &str) {
        self.pre.retain(|h| h.name.as_deref() != Some(name));
        self.post.retain(|h| h.name.as_deref() != Some(name));
    }

    /// Number of installed pre-draw hooks.
    pub fn pre_len(&self) -> usize {
        self.pre.len()
    }

    /// Number of installed post-draw hooks.
    pub fn post_len(&self) -> usize {
        self.post.len()
    }

    /// Whether no hooks are installed.
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }

    /// Names of the installed pre-draw hooks, in registration order.
    pub fn pre_names(&self) -> Vec<Option<&str>> {
        self.pre.iter().map(|h| h.name.as_deref()).collect()
    }
}
