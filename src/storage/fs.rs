//! File system operations for the catalog output directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::merge::{merge, MergeOutcome};
use crate::catalog::types::{EndpointEntry, LocatorEntry, StoredEndpoint, UiRouteEntry};
use crate::config::OutputConfig;
use crate::error::Result;

/// Output store for locator, endpoint and UI-route catalogs.
pub struct CatalogStore {
    /// Output directory (features/meta_data/ by default)
    root: PathBuf,
    locators_path: PathBuf,
    endpoints_path: PathBuf,
    ui_routes_path: PathBuf,
}

impl CatalogStore {
    /// Open the output directory, creating it if needed.
    ///
    /// ```text
    /// features/meta_data/
    /// ├── locators_babel.json
    /// ├── endpoints_babel.json
    /// └── ui_endpoints_babel.json
    /// ```
    pub fn init(root: &Path, output: &OutputConfig) -> Result<Self> {
        if !root.exists() {
            fs::create_dir_all(root)?;
        }

        Ok(Self {
            root: root.to_path_buf(),
            locators_path: root.join(&output.locators_file),
            endpoints_path: root.join(&output.endpoints_file),
            ui_routes_path: root.join(&output.ui_routes_file),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn locators_path(&self) -> &Path {
        &self.locators_path
    }

    pub fn endpoints_path(&self) -> &Path {
        &self.endpoints_path
    }

    pub fn ui_routes_path(&self) -> &Path {
        &self.ui_routes_path
    }

    /// Replace the locator catalog.
    pub fn write_locators(&self, entries: &[LocatorEntry]) -> Result<()> {
        write_json(&self.locators_path, entries)
    }

    /// Replace the endpoint catalog.
    pub fn write_endpoints(&self, entries: &[EndpointEntry]) -> Result<()> {
        write_json(&self.endpoints_path, entries)
    }

    /// Replace the UI-route catalog.
    pub fn write_ui_routes(&self, entries: &[UiRouteEntry]) -> Result<()> {
        write_json(&self.ui_routes_path, entries)
    }

    /// Read the persisted endpoint catalog, element by element.
    ///
    /// A missing file is an empty catalog. So is one that cannot be read,
    /// is not valid JSON, or is not an array, with a warning. Elements of a
    /// valid array are kept verbatim, whatever their shape.
    pub fn read_endpoints(&self) -> Vec<StoredEndpoint> {
        let content = match fs::read_to_string(&self.endpoints_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.endpoints_path.display(), "no existing endpoint catalog");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.endpoints_path.display(), error = %e, "could not read endpoint catalog, starting empty");
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(serde_json::Value::Array(items)) => items,
            Ok(_) => {
                warn!(path = %self.endpoints_path.display(), "endpoint catalog is not an array, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.endpoints_path.display(), error = %e, "invalid endpoint catalog, starting empty");
                return Vec::new();
            }
        };

        let entries: Vec<StoredEndpoint> = items.into_iter().map(StoredEndpoint).collect();
        let unkeyed = entries.iter().filter(|e| e.key().is_none()).count();
        if unkeyed > 0 {
            warn!(path = %self.endpoints_path.display(), count = unkeyed, "endpoint entries without method/path kept as-is");
        }
        entries
    }

    /// Merge `incoming` into the persisted endpoint catalog and write it back.
    /// Every existing element is written back unchanged.
    pub fn merge_endpoints(
        &self,
        incoming: impl IntoIterator<Item = EndpointEntry>,
    ) -> Result<MergeOutcome<StoredEndpoint>> {
        let existing = self.read_endpoints();
        let outcome = merge(existing, incoming.into_iter().map(StoredEndpoint::from));
        write_json(&self.endpoints_path, &outcome.records)?;
        Ok(outcome)
    }
}

/// Pretty-print `value` to `path`, atomically (write to temp, then rename).
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;
    Ok(())
}
