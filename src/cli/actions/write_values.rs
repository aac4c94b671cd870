//! WriteValues action.
//!
//! Sets leaf values in stores. Used by `fix`, `fill` and `placeholders`.

use super::{operation::Operation, traits::Action};
use crate::rules::KeyWrite;

pub struct WriteValues;

impl Action<KeyWrite> for WriteValues {
    fn to_operations(writes: &[KeyWrite]) -> Vec<Operation> {
        writes.iter().cloned().map(Operation::WriteKey).collect()
    }
}
