//! Actions that turn planned changes into store edits.
//!
//! ## Architecture
//!
//! ```text
//! Plan item (KeyWrite, SentinelSubtree)
//!     ↓
//! Action (plan item → Operation conversion)
//!     ↓
//! Operation (one edit of one store)
//!     ↓
//! execute (load, mutate and save each store once)
//! ```
//!
//! ## Actions
//!
//! - [`WriteValues`]: Set leaf values (fix, fill, placeholders)
//! - [`RemoveSubtrees`]: Delete placeholder-only subtrees (clean)

mod operation;
mod remove_subtrees;
mod traits;
mod write_values;

pub use operation::Operation;
pub use remove_subtrees::RemoveSubtrees;
pub use traits::{Action, ActionStats};
pub use write_values::WriteValues;
