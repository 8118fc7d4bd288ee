//! # testmeta
//!
//! Builds a catalog of test-relevant facts from an application's source tree.
//!
//! Front-end files (JavaScript, TypeScript, JSX/TSX) are parsed with
//! tree-sitter and walked once; a table of declarative rules picks out:
//!
//! - **Messages**: user-visible strings passed to toasts, `alert`, `setError`,
//!   `throw new Error`, `console.*` and translation calls
//! - **Locators**: JSX attributes usable as test selectors (`id`, `data-testid`, `aria-*`, ...)
//! - **Endpoints**: HTTP calls whose URL starts with a recognized API prefix
//! - **UI routes**: `<Route path>` elements and route-table arrays
//!
//! Back-end files are scanned line by line for endpoint annotations
//! (`@RequestMapping` + `@GetMapping` and friends) and merged into the
//! persisted endpoint catalog without disturbing existing entries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use testmeta::{run_all, TestmetaConfig};
//!
//! let root = Path::new(".");
//! let config = TestmetaConfig::load_with_env(&root.join("testmeta.toml"));
//! let report = run_all(root, &config).unwrap();
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod parser;
pub mod storage;

// Re-exports for convenience
pub use catalog::{
    dedupe, merge, run_all, run_backend, run_frontend, BackendSummary, Catalog, EndpointEntry,
    EndpointRecord, FrontendSummary, LocatorEntry, LocatorRecord, MergeOutcome, MessageKind,
    MessageRecord, RunReport, StoredEndpoint, UiRouteEntry, UiRouteRecord,
};
pub use config::TestmetaConfig;
pub use error::{CatalogError, Result};
pub use parser::{extract_file, AnnotationScanner, PrefixScope, RuleSet};
pub use storage::CatalogStore;
