//
//  builder.rs
//  testmeta
//

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

use super::types::{EndpointEntry, EndpointRecord, FileExtractions, StoredEndpoint};
use super::Catalog;
use crate::config::TestmetaConfig;
use crate::error::{CatalogError, Result};
use crate::parser::annotations::AnnotationScanner;
use crate::parser::extractor::extract_file;
use crate::parser::rules::RuleSet;
use crate::storage::CatalogStore;

/// Directories that are never scanned, even without .gitignore.
const BUILTIN_IGNORE: &[&str] = &["node_modules", "dist", "build", ".git"];

/// Check if any path segment is a built-in or configured excluded directory.
fn is_excluded(path: &Path, exclude_dirs: &[String]) -> bool {
    path.components().any(|c| {
        if let Component::Normal(name) = c {
            let name = name.to_str().unwrap_or("");
            BUILTIN_IGNORE.contains(&name) || exclude_dirs.iter().any(|d| d == name)
        } else {
            false
        }
    })
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// List source files under `root`, sorted.
///
/// Respects .gitignore and hidden files. Only the part of each path below
/// `root` is checked against the exclusion list, so a project living in a
/// directory called `build` still scans.
pub fn discover_files(root: &Path, extensions: &[String], exclude_dirs: &[String]) -> Vec<PathBuf> {
    if !root.is_dir() {
        warn!(root = %root.display(), "source root not found, nothing to scan");
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| {
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            !is_excluded(rel, exclude_dirs)
        })
        .filter(|entry| has_extension(entry.path(), extensions))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Result of a front-end extraction pass over a file list.
#[derive(Debug, Clone, Default)]
pub struct FrontendScan {
    /// Deduplicated records from every file that parsed.
    pub catalog: Catalog,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

/// Extract from in-memory sources. Files that fail to parse are logged and
/// skipped; the catalog is deduplicated.
pub fn extract_sources<'a, I>(sources: I, rules: &RuleSet) -> FrontendScan
where
    I: IntoIterator<Item = (&'a Path, &'a str)>,
{
    let mut scan = FrontendScan::default();
    let mut catalog = Catalog::new();

    for (path, source) in sources {
        match extract_file(path, source, rules) {
            Ok(extraction) => {
                scan.files_scanned += 1;
                catalog.absorb(extraction);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping file");
                scan.files_skipped += 1;
            }
        }
    }

    scan.catalog = catalog.deduplicated();
    scan
}

/// Read a source file, replacing invalid UTF-8 with U+FFFD.
fn read_source(path: &Path) -> std::io::Result<String> {
    Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned())
}

/// Read and extract every file in parallel. Results are absorbed in the
/// order of `files`, so output does not depend on scheduling.
pub fn extract_frontend(files: &[PathBuf], rules: &RuleSet) -> FrontendScan {
    let results: Vec<Result<FileExtractions>> = files
        .par_iter()
        .map(|path| -> Result<FileExtractions> {
            let source = read_source(path)?;
            extract_file(path, &source, rules)
        })
        .collect();

    let mut scan = FrontendScan::default();
    let mut catalog = Catalog::new();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(extraction) => {
                if extraction.is_empty() {
                    debug!(path = %path.display(), "nothing extracted");
                }
                scan.files_scanned += 1;
                catalog.absorb(extraction);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping file");
                scan.files_skipped += 1;
            }
        }
    }

    scan.catalog = catalog.deduplicated();
    scan
}

/// Scan back-end files for annotation-declared endpoints, in file order.
pub fn extract_backend(files: &[PathBuf], scanner: &AnnotationScanner) -> Vec<EndpointRecord> {
    let mut endpoints = Vec::new();
    for path in files {
        let content = match read_source(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping file");
                continue;
            }
        };
        let found = scanner.scan(&path.to_string_lossy(), &content);
        debug!(path = %path.display(), count = found.len(), "scanned");
        endpoints.extend(found);
    }
    endpoints
}

/// Counts from a front-end run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontendSummary {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub messages: usize,
    pub locators: usize,
    pub endpoints: usize,
    pub ui_routes: usize,
}

/// Counts from a back-end run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendSummary {
    pub files_scanned: usize,
    pub endpoints_found: usize,
    /// Endpoints appended to the persisted catalog, in order.
    pub added: Vec<EndpointEntry>,
    /// Size of the persisted catalog after merging.
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub frontend: Option<FrontendSummary>,
    pub backend: Option<BackendSummary>,
}

fn ensure_project_root(project_root: &Path) -> Result<()> {
    if !project_root.is_dir() {
        return Err(CatalogError::NotFound(project_root.to_path_buf()));
    }
    Ok(())
}

fn open_store(project_root: &Path, config: &TestmetaConfig) -> Result<CatalogStore> {
    CatalogStore::init(&config.resolve_output_dir(project_root), &config.output)
}

/// Extract from the front-end tree and replace the locator, endpoint and
/// UI-route catalogs.
pub fn run_frontend(project_root: &Path, config: &TestmetaConfig) -> Result<FrontendSummary> {
    ensure_project_root(project_root)?;
    let root = config.resolve_frontend_root(project_root);
    let files = discover_files(&root, &config.scan.frontend_extensions, &config.scan.exclude_dirs);
    info!(root = %root.display(), files = files.len(), "scanning front-end sources");

    let scan = extract_frontend(&files, &config.rule_set());
    let catalog = &scan.catalog;

    let store = open_store(project_root, config)?;
    store.write_locators(&catalog.locator_entries())?;
    store.write_endpoints(&catalog.endpoint_entries())?;
    store.write_ui_routes(&catalog.ui_route_entries())?;

    let summary = FrontendSummary {
        files_scanned: scan.files_scanned,
        files_skipped: scan.files_skipped,
        messages: catalog.messages.len(),
        locators: catalog.locators.len(),
        endpoints: catalog.endpoints.len(),
        ui_routes: catalog.ui_routes.len(),
    };
    info!(
        locators = summary.locators,
        endpoints = summary.endpoints,
        ui_routes = summary.ui_routes,
        skipped = summary.files_skipped,
        "front-end catalog written"
    );
    info!(
        messages = summary.messages,
        "messages are not persisted here; a separate tool owns the message catalog"
    );
    Ok(summary)
}

/// Scan the back-end tree and merge its endpoints into the persisted catalog.
pub fn run_backend(project_root: &Path, config: &TestmetaConfig) -> Result<BackendSummary> {
    ensure_project_root(project_root)?;
    let root = config.resolve_backend_root(project_root);
    let files = discover_files(&root, &config.scan.backend_extensions, &config.scan.exclude_dirs);
    let scanner = AnnotationScanner::new(config.endpoints.prefix_scope)?;
    info!(
        root = %root.display(),
        files = files.len(),
        scope = ?scanner.scope(),
        "scanning back-end sources"
    );

    let found = extract_backend(&files, &scanner);
    let endpoints_found = found.len();

    let store = open_store(project_root, config)?;
    let outcome = store.merge_endpoints(found.iter().map(EndpointEntry::from))?;

    let added: Vec<EndpointEntry> = outcome.records[outcome.records.len() - outcome.added..]
        .iter()
        .filter_map(StoredEndpoint::entry)
        .collect();
    for entry in &added {
        info!(endpoint = %entry, "new endpoint");
    }
    info!(
        found = endpoints_found,
        added = outcome.added,
        total = outcome.records.len(),
        path = %store.endpoints_path().display(),
        "back-end endpoints merged"
    );

    Ok(BackendSummary {
        files_scanned: files.len(),
        endpoints_found,
        added,
        total: outcome.records.len(),
    })
}

/// Front-end run followed by a back-end run.
pub fn run_all(project_root: &Path, config: &TestmetaConfig) -> Result<RunReport> {
    let frontend = run_frontend(project_root, config)?;
    let backend = run_backend(project_root, config)?;
    Ok(RunReport {
        frontend: Some(frontend),
        backend: Some(backend),
    })
}
