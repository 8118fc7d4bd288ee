//
//  mod.rs
//  testmeta
//

pub mod builder;
pub mod dedupe;
pub mod merge;
pub mod types;

pub use builder::{
    discover_files, extract_backend, extract_frontend, extract_sources, run_all, run_backend,
    run_frontend, BackendSummary, FrontendScan, FrontendSummary, RunReport,
};
pub use dedupe::{dedupe, dedupe_by_key};
pub use merge::{merge, MergeOutcome};
pub use types::*;

/// Records accumulated across many files, one list per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub messages: Vec<MessageRecord>,
    pub locators: Vec<LocatorRecord>,
    pub endpoints: Vec<EndpointRecord>,
    pub ui_routes: Vec<UiRouteRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file's records, keeping traversal order.
    pub fn absorb(&mut self, extraction: FileExtractions) {
        self.messages.extend(extraction.messages);
        self.locators.extend(extraction.locators);
        self.endpoints.extend(extraction.endpoints);
        self.ui_routes.extend(extraction.ui_routes);
    }

    /// Same catalog with each kind reduced to the first record per key.
    pub fn deduplicated(self) -> Self {
        Self {
            messages: dedupe(self.messages),
            locators: dedupe(self.locators),
            endpoints: dedupe(self.endpoints),
            ui_routes: dedupe(self.ui_routes),
        }
    }

    pub fn locator_entries(&self) -> Vec<LocatorEntry> {
        self.locators.iter().map(LocatorEntry::from).collect()
    }

    pub fn endpoint_entries(&self) -> Vec<EndpointEntry> {
        self.endpoints.iter().map(EndpointEntry::from).collect()
    }

    pub fn ui_route_entries(&self) -> Vec<UiRouteEntry> {
        self.ui_routes.iter().map(UiRouteEntry::from).collect()
    }
}

impl FromIterator<FileExtractions> for Catalog {
    fn from_iter<I: IntoIterator<Item = FileExtractions>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for extraction in iter {
            catalog.absorb(extraction);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str, file: &str, line: usize) -> UiRouteRecord {
        UiRouteRecord {
            path: path.into(),
            file: file.into(),
            line,
        }
    }

    #[test]
    fn test_absorb_then_dedupe_keeps_first_file() {
        let a = FileExtractions {
            ui_routes: vec![route("/login", "a.tsx", 3)],
            locators: vec![LocatorRecord::new("id", "email", "a.tsx", 5)],
            ..Default::default()
        };
        let b = FileExtractions {
            ui_routes: vec![route("/login", "b.tsx", 9), route("/home", "b.tsx", 10)],
            locators: vec![LocatorRecord::new("id", "email", "b.tsx", 1)],
            ..Default::default()
        };

        let catalog: Catalog = vec![a, b].into_iter().collect();
        assert_eq!(catalog.ui_routes.len(), 3);

        let catalog = catalog.deduplicated();
        assert_eq!(catalog.ui_routes, vec![route("/login", "a.tsx", 3), route("/home", "b.tsx", 10)]);
        assert_eq!(catalog.locators.len(), 1);
        assert_eq!(catalog.locators[0].file, "a.tsx");
    }

    #[test]
    fn test_entries_strip_provenance() {
        let mut catalog = Catalog::new();
        catalog.absorb(FileExtractions {
            endpoints: vec![EndpointRecord {
                method: "GET".into(),
                path: "/api/users".into(),
                file: "a.ts".into(),
                line: 4,
                origin: EndpointOrigin::FrontendCall,
            }],
            ..Default::default()
        });
        assert_eq!(catalog.endpoint_entries(), vec![EndpointEntry::new("GET", "/api/users")]);
        assert!(catalog.ui_route_entries().is_empty());
    }
}
