//! Pageglot - i18n key audit and repair for static multi-language sites
//!
//! Markup elements carry translation keys in `data-i18n` attributes; each page
//! maps to one JSON store per locale through a pages manifest. Pageglot finds
//! keys that do not resolve, extracts source-language values from the markup,
//! fills gaps from reference stores and cleans up placeholder leftovers.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, actions, reporting)
//! - `config`: Configuration file loading and validation
//! - `core`: Keys, markup scanning, stores and key resolution
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Audits, repair planning and store checks
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
