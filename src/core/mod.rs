//! Core engine: keys, markup scanning, stores and resolution.
//!
//! ## Module Structure
//!
//! - `key`: translation keys and annotation markers
//! - `markup`: regex-based key and content extraction from markup
//! - `store`: nested JSON translation stores
//! - `resolver`: [`KeyResolver`], classifying keys against stores
//! - `manifest`: page to store mapping
//! - `context`: [`CheckContext`], configuration and lazily loaded inputs
//! - `audit_report`: saved audit results

pub mod audit_report;
pub mod context;
pub mod file_scanner;
pub mod key;
pub mod location;
pub mod manifest;
pub mod markup;
pub mod resolver;
pub mod store;

pub use audit_report::{AuditReport, LocaleReport, MissingEntry, PageReport};
pub use context::{CheckContext, MarkupDocument};
pub use key::{Annotation, TranslationKey, strip_annotations};
pub use location::{SourceContext, SourceLocation};
pub use manifest::{Manifest, PageEntry, PageTitle, load_manifest};
pub use markup::KeyOccurrence;
pub use resolver::{DEFAULT_PLACEHOLDER, KeyResolver, Resolution, ResolutionStatus};
pub use store::{StoreError, TranslationStore};
