//! Storage layer for testmeta.
//!
//! Handles all file system operations:
//! - Creating the output directory
//! - Writing the locator, endpoint and UI-route catalogs
//! - Reading back and merging the endpoint catalog

mod fs;

pub use fs::CatalogStore;
