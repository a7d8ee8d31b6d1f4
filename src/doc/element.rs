//! Element types: ElementId, ElementData.

use std::collections::BTreeMap;
use std::fmt;

use slotmap::new_key_type;

use crate::geometry::{Offset, Size, Spacing};
use crate::hook::HookSet;

new_key_type! {
    /// Unique identifier for a document element. Copy, lightweight (u64).
    pub struct ElementId;
}

/// Data associated with a single document element.
///
/// Elements are owned by the document model; the theme engine only reads
/// and writes geometry fields, the property bag, and the hook lists.
pub struct ElementData {
    /// Element type tag (e.g. "Slide", "Title", "Text", "Image").
    pub element_type: String,
    /// Optional author-assigned handle, matched by exact-value selectors.
    pub name: Option<String>,
    /// Optional textual content.
    pub text: Option<String>,
    /// Top-left position in screen pixels.
    pub position: Offset,
    /// Extent in screen pixels.
    pub size: Size,
    /// Outer spacing, applied by the draw pass before any hooks run.
    pub margin: Spacing,
    /// Inner spacing.
    pub padding: Spacing,
    /// Free-form style properties set by rule scripts (e.g. "foreground").
    pub props: BTreeMap<String, String>,
    /// Ordered named pre/post draw hooks.
    pub(crate) hooks: HookSet,
}

impl ElementData {
    /// Create a new element with the given type tag and empty everything else.
    pub fn new(element_type: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            name: None,
            text: None,
            position: Offset::default(),
            size: Size::ZERO,
            margin: Spacing::ZERO,
            padding: Spacing::ZERO,
            props: BTreeMap::new(),
            hooks: HookSet::new(),
        }
    }

    /// Set the author-assigned name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the textual content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the size (builder).
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the position (builder).
    pub fn with_position(mut self, position: Offset) -> Self {
        self.position = position;
        self
    }

    /// Look up a style property.
    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    /// Set a style property, replacing any previous value.
    pub fn set_prop(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.props.insert(key.into(), value.into());
    }

    /// Immutable access to the element's hook lists.
    pub fn hooks(&self) -> &HookSet {
        &self.hooks
    }

    /// Mutable access to the element's hook lists.
    pub fn hooks_mut(&mut self) -> &mut HookSet {
        &mut self.hooks
    }
}

impl fmt::Debug for ElementData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementData")
            .field("element_type", &self.element_type)
            .field("name", &self.name)
            .field("text", &self.text)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("margin", &self.margin)
            .field("padding", &self.padding)
            .field("props", &self.props)
            .field("hooks", &self.hooks)
            .finish()
    }
}
