//! Per-invocation memo table keyed by reference identity.

use std::collections::HashMap;

use crate::value::Value;

/// Maps a source node's identity to its already-produced copy. One context
/// exists per top-level `deep_copy` call; it is created inside the call,
/// threaded by `&mut` through every recursive step, and dropped on return.
///
/// Invariant: once a source node is recorded, every later encounter of that
/// node (via any path, including back-edges) must yield the same copy
/// handle. Recording happens before descending into a node's children.
pub(crate) struct CopyContext {
    copies: HashMap<usize, Value>,
    /// Source handles are pinned for the lifetime of the call so a source
    /// allocation cannot be freed and its address reused as another key.
    /// Synthesized placeholder instances routed through the engine would
    /// otherwise be exactly that hazard.
    pinned: Vec<Value>,
}

impl CopyContext {
    pub(crate) fn new() -> Self {
        Self {
            copies: HashMap::new(),
            pinned: Vec::new(),
        }
    }

    /// The copy already produced for this node, if any. Scalars and pairs
    /// have no identity and always miss.
    pub(crate) fn lookup(&self, source: &Value) -> Option<Value> {
        let key = source.identity_key()?;
        self.copies.get(&key).cloned()
    }

    pub(crate) fn record(&mut self, source: &Value, copy: Value) {
        if let Some(key) = source.identity_key() {
            self.pinned.push(source.clone());
            self.copies.insert(key, copy);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.copies.len()
    }
}
