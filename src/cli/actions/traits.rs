//! Action trait definition.
//!
//! Actions convert planned changes into Operations. Each Action can be
//! implemented for multiple plan types.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};

use super::operation::Operation;
use crate::core::{StoreError, TranslationStore};

/// Statistics from running an action.
#[derive(Debug, Clone, Default)]
pub struct ActionStats {
    /// Number of operations processed.
    pub processed: usize,
    /// Number of operations skipped (store unreadable, or missing for a removal).
    pub skipped: usize,
    /// Number of changes actually applied to stores.
    pub changes_applied: usize,
    /// Number of store files written.
    pub files_modified: usize,
}

impl std::ops::AddAssign for ActionStats {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.changes_applied += other.changes_applied;
        self.files_modified += other.files_modified;
    }
}

/// Action trait - converts plan items into Operations and executes them.
///
/// # Example
///
/// ```ignore
/// if apply {
///     WriteValues::run(&plan.writes)?;
/// } else {
///     WriteValues::preview(&plan.writes);
/// }
/// ```
pub trait Action<I> {
    /// Convert plan items to low-level operations.
    fn to_operations(items: &[I]) -> Vec<Operation>;

    /// Execute the action (modify stores).
    fn run(items: &[I]) -> Result<ActionStats> {
        let ops = Self::to_operations(items);
        execute_operations(&ops)
    }

    /// Preview the action (dry-run mode).
    fn preview(items: &[I]) {
        for op in &Self::to_operations(items) {
            op.preview();
        }
    }
}

/// Apply operations store by store.
///
/// Each store is loaded once, receives all of its operations in order and is
/// saved once, only if something changed. A missing store is created when it
/// receives a write. An unreadable store is never overwritten: its operations
/// are skipped.
pub(crate) fn execute_operations(ops: &[Operation]) -> Result<ActionStats> {
    let mut by_store: BTreeMap<&Path, Vec<&Operation>> = BTreeMap::new();
    for op in ops {
        by_store.entry(op.store_path()).or_default().push(op);
    }

    let mut stats = ActionStats {
        processed: ops.len(),
        ..Default::default()
    };

    for (store_path, store_ops) in by_store {
        let mut store = match TranslationStore::load(store_path) {
            Ok(store) => store,
            Err(StoreError::Missing { .. }) if store_ops.iter().any(|op| op.creates_store()) => {
                tracing::debug!("creating store {}", store_path.display());
                TranslationStore::new()
            }
            Err(e) => {
                tracing::warn!("skipping {} operation(s): {}", store_ops.len(), e);
                stats.skipped += store_ops.len();
                continue;
            }
        };

        let applied = store_ops.iter().filter(|op| op.apply(&mut store)).count();
        if applied == 0 {
            continue;
        }

        store
            .save(store_path)
            .with_context(|| format!("Failed to update {}", store_ops[0].display_path()))?;
        stats.changes_applied += applied;
        stats.files_modified += 1;
    }

    Ok(stats)
}
