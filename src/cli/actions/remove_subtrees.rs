//! RemoveSubtrees action.
//!
//! Deletes placeholder-only subtrees from stores. Used by `clean`.

use super::{operation::Operation, traits::Action};
use crate::rules::SentinelSubtree;

pub struct RemoveSubtrees;

impl Action<SentinelSubtree> for RemoveSubtrees {
    fn to_operations(subtrees: &[SentinelSubtree]) -> Vec<Operation> {
        subtrees
            .iter()
            .map(|subtree| Operation::RemovePath {
                store_path: subtree.store_path.clone(),
                display_path: subtree.display_path.clone(),
                path: subtree.path.clone(),
            })
            .collect()
    }
}
