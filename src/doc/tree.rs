//! Document tree: a slotmap arena rooted at a deck node whose children
//! are the slides.

use slotmap::{SecondaryMap, SlotMap};

use super::element::{ElementData, ElementId};
use crate::hook::HookSet;

/// Empty slice constant for returning when an element has no children.
const EMPTY_CHILDREN: &[ElementId] = &[];

/// A presentation document: one deck root, slides beneath it, arbitrary
/// element nesting beneath the slides.
///
/// All elements live in a single `SlotMap`. Parent/child relationships
/// are stored in secondary maps so lookup is O(1). The theme engine
/// never structurally mutates the tree; it only styles elements.
pub struct Document {
    nodes: SlotMap<ElementId, ElementData>,
    children: SecondaryMap<ElementId, Vec<ElementId>>,
    parent: SecondaryMap<ElementId, ElementId>,
    root: ElementId,
}

impl Document {
    /// Create an empty document with a fresh deck root.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut children = SecondaryMap::new();
        let root = nodes.insert(ElementData::new("Deck"));
        children.insert(root, Vec::new());
        Self { nodes, children, parent: SecondaryMap::new(), root }
    }

    /// The deck root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Insert a slide (a direct child of the deck root).
    pub fn insert_slide(&mut self, data: ElementData) -> ElementId {
        self.insert_child(self.root, data)
    }

    /// Insert an element as a child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist.
    pub fn insert_child(&mut self, parent: ElementId, data: ElementData) -> ElementId {
        debug_assert!(self.nodes.contains_key(parent), "parent element does not exist");
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have a children vec")
            .push(id);
        id
    }

    /// The full top-level sequence: the deck root's children.
    pub fn slides(&self) -> &[ElementId] {
        self.children(self.root)
    }

    /// Get the parent of an element, if it has one (the root does not).
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent.get(id).copied()
    }

    /// Get the children of an element. Returns an empty slice if the
    /// element has no children or does not exist.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(EMPTY_CHILDREN)
    }

    /// Immutable access to an element's data.
    pub fn get(&self, id: ElementId) -> Option<&ElementData> {
        self.nodes.get(id)
    }

    /// Mutable access to an element's data.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id)
    }

    /// Whether the document contains an element with the given id.
    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of elements, including the deck root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds only the deck root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Move an element's hook set out so hooks can run while the caller
    /// holds `&mut Document`. Pair with [`Document::put_hooks`].
    pub fn take_hooks(&mut self, id: ElementId) -> HookSet {
        self.nodes
            .get_mut(id)
            .map(|data| std::mem::take(&mut data.hooks))
            .unwrap_or_default()
    }

    /// Return a hook set previously moved out with [`Document::take_hooks`].
    ///
    /// Hooks installed while the set was out are kept; the returned set's
    /// hooks are appended after them via the usual replace-by-name rules.
    pub fn put_hooks(&mut self, id: ElementId, hooks: HookSet) {
        if let Some(data) = self.nodes.get_mut(id) {
            if data.hooks.is_empty() {
                data.hooks = hooks;
            } else {
                for hook in hooks.pre {
                    data.hooks.add_pre(hook);
                }
                for hook in hooks.post {
                    data.hooks.add_post(hook);
                }
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
