//! ElementContainer: an ordered matched set of elements with working-set
//! identity and explicit bulk dispatch.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::doc::{Document, ElementId};

/// Monotonic source for working-set identities.
static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

/// An ordered sequence of matched elements.
///
/// Every container carries a `set_id`: the identity of the working set
/// it represents. A fresh identity is minted per allocation event
/// (construction or transformation); clones share it, because a clone
/// is still "the same matched set". The match cache keys on this
/// identity, not on structural contents.
#[derive(Clone, Debug)]
pub struct ElementContainer {
    ids: Vec<ElementId>,
    set_id: u64,
}

impl ElementContainer {
    /// Create a container over the given elements with a fresh identity.
    pub fn new(ids: Vec<ElementId>) -> Self {
        Self { ids, set_id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed) }
    }

    /// The working-set identity.
    pub fn set_id(&self) -> u64 {
        self.set_id
    }

    /// The matched element ids, in match order.
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// Number of matched elements.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the match set is empty. An empty set is a valid no-op.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The first matched element, if any.
    pub fn first(&self) -> Option<ElementId> {
        self.ids.first().copied()
    }

    /// Iterate over the matched element ids.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    /// Keep only elements whose data satisfies the predicate.
    ///
    /// Returns a new container (fresh identity), preserving order, so
    /// rule code can keep chaining matched-set operations.
    pub fn filtered(
        &self,
        doc: &Document,
        mut predicate: impl FnMut(&crate::doc::ElementData) -> bool,
    ) -> Self {
        let ids = self
            .ids
            .iter()
            .copied()
            .filter(|&id| doc.get(id).is_some_and(|data| predicate(data)))
            .collect();
        Self::new(ids)
    }

    /// Select a sub-container by index positions, skipping out-of-range
    /// indices. Returns a new container.
    pub fn selected(&self, indices: &[usize]) -> Self {
        let ids = indices.iter().filter_map(|&i| self.ids.get(i).copied()).collect();
        Self::new(ids)
    }

    /// Run `op` once per member element, in order.
    pub fn each<R>(&self, doc: &mut Document, mut op: impl FnMut(&mut Document, ElementId) -> R) {
        for &id in &self.ids {
            op(doc, id);
        }
    }

    /// Bulk dispatch: run `op` once per member element and invoke
    /// `callback` once per (element, result) pair.
    ///
    /// This is how one rule line styles N elements while still
    /// receiving a per-element callback.
    pub fn dispatch<R>(
        &self,
        doc: &mut Document,
        mut op: impl FnMut(&mut Document, ElementId) -> R,
        mut callback: impl FnMut(ElementId, &R),
    ) {
        for &id in &self.ids {
            let result = op(doc, id);
            callback(id, &result);
        }
    }
}
