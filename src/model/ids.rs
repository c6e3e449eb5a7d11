//! Object ID assignment for multi-object saves

use std::collections::HashSet;

use tracing::debug;

use super::core::MeshModel;

/// A monotonically increasing ID sequence starting at 0
#[derive(Debug, Clone, Default)]
pub struct AutoCounter {
    next: i32,
}

impl AutoCounter {
    /// Create a counter whose first value is 0
    pub fn new() -> Self {
        Self { next: 0 }
    }
}

impl Iterator for AutoCounter {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let current = self.next;
        self.next = self.next.checked_add(1)?;
        Some(current)
    }
}

/// Whether any two models share an ID
pub fn has_duplicate_ids(models: &[MeshModel]) -> bool {
    let mut seen = HashSet::with_capacity(models.len());
    models.iter().any(|model| !seen.insert(model.id))
}

/// Replace every model's ID with a fresh value from 0, keeping input order
pub fn assign_unique_ids(models: &mut [MeshModel]) {
    for (model, id) in models.iter_mut().zip(AutoCounter::new()) {
        model.id = id;
    }
}

/// Renumber all models if their IDs collide
///
/// Returns `true` when the IDs were rewritten. Models whose IDs are already
/// unique are left untouched.
pub fn normalize_ids(models: &mut [MeshModel]) -> bool {
    if !has_duplicate_ids(models) {
        return false;
    }
    debug!(count = models.len(), "object IDs collide, renumbering from 0");
    assign_unique_ids(models);
    true
}
