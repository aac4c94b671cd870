//! Checks and repair planning.
//!
//! Functions here read from a [`CheckContext`](crate::core::CheckContext) and
//! return plain data: issues, audits and planned writes. Nothing in this
//! module writes to disk.
//!
//! ## Module Structure
//!
//! - `audit`: key resolution per page and locale
//! - `repair`: planned store writes (extraction, fill, placeholders)
//! - `sentinel`: placeholder-only subtrees
//! - `integrity`: manifest entries against the filesystem

pub mod audit;
pub mod integrity;
pub mod repair;
pub mod sentinel;

pub use audit::{LocaleAudit, PageIndex, audit_locale, index_pages};
pub use integrity::{IntegrityResult, check_integrity};
pub use repair::{
    KeyWrite, RepairPlan, RepairTarget, ValueOrigin, plan_extraction, plan_fill,
    plan_placeholders, plan_store_fill, targets_from_audit, targets_from_report,
};
pub use sentinel::{
    SentinelSubtree, check_sentinel_subtrees, find_sentinel_leaves, find_sentinel_subtrees,
};
