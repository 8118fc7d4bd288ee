//
//  types.rs
//  testmeta
//

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// A record kind with an explicit identity key.
///
/// Two records with equal keys describe the same fact; deduplication and
/// merging keep only the first one seen.
pub trait Identity {
    type Key: Eq + Hash;

    fn identity(&self) -> Self::Key;
}

// ─── Messages ───────────────────────────────────────────────────

/// Which message rule produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    ToastError,
    ToastSuccess,
    ToastInfo,
    ToastWarning,
    ToastTitle,
    ToastDesc,
    I18n,
    SetError,
    Alert,
    ThrowError,
    ConsoleLog,
    ConsoleWarn,
    ConsoleError,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::ToastError => "toast-error",
            MessageKind::ToastSuccess => "toast-success",
            MessageKind::ToastInfo => "toast-info",
            MessageKind::ToastWarning => "toast-warning",
            MessageKind::ToastTitle => "toast-title",
            MessageKind::ToastDesc => "toast-desc",
            MessageKind::I18n => "i18n",
            MessageKind::SetError => "set-error",
            MessageKind::Alert => "alert",
            MessageKind::ThrowError => "throw-error",
            MessageKind::ConsoleLog => "console-log",
            MessageKind::ConsoleWarn => "console-warn",
            MessageKind::ConsoleError => "console-error",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-visible string literal found at a call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub message: String,
    pub kind: MessageKind,
}

impl Identity for MessageRecord {
    type Key = MessageKey;

    fn identity(&self) -> MessageKey {
        MessageKey {
            message: self.message.clone(),
            kind: self.kind,
        }
    }
}

// ─── Locators ───────────────────────────────────────────────────

/// An addressable UI element attribute (`data-testid="submit"` and friends).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorRecord {
    pub key: String,
    pub strategy: String,
    pub by: String,
    pub selector: String,
    pub value: String,
    pub file: String,
    pub line: usize,
}

impl LocatorRecord {
    /// Build a locator from an attribute name and its literal value.
    pub fn new(attribute: &str, value: &str, file: &str, line: usize) -> Self {
        Self {
            key: value.to_string(),
            strategy: attribute.to_string(),
            by: attribute.to_string(),
            selector: format!("[{attribute}='{value}']"),
            value: value.to_string(),
            file: file.to_string(),
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatorKey {
    pub key: String,
    pub strategy: String,
    pub by: String,
    pub selector: String,
    pub value: String,
}

impl Identity for LocatorRecord {
    type Key = LocatorKey;

    fn identity(&self) -> LocatorKey {
        LocatorKey {
            key: self.key.clone(),
            strategy: self.strategy.clone(),
            by: self.by.clone(),
            selector: self.selector.clone(),
            value: self.value.clone(),
        }
    }
}

/// Persisted form of a locator (provenance stripped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorEntry {
    pub key: String,
    pub strategy: String,
    pub by: String,
    pub selector: String,
    pub value: String,
}

impl From<&LocatorRecord> for LocatorEntry {
    fn from(record: &LocatorRecord) -> Self {
        Self {
            key: record.key.clone(),
            strategy: record.strategy.clone(),
            by: record.by.clone(),
            selector: record.selector.clone(),
            value: record.value.clone(),
        }
    }
}

// ─── Endpoints ──────────────────────────────────────────────────

/// Where an endpoint record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointOrigin {
    /// A front-end call site (`fetch`, `axios.get`, `this.request`).
    #[serde(rename = "frontend-call")]
    FrontendCall,
    /// A back-end route annotation (`@GetMapping` and friends).
    #[serde(rename = "java-backend")]
    JavaBackend,
}

/// An HTTP endpoint, either called by the front-end or declared by the back-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub method: String,
    pub path: String,
    pub file: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub origin: EndpointOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointKey {
    pub method: String,
    pub path: String,
}

impl Identity for EndpointRecord {
    type Key = EndpointKey;

    fn identity(&self) -> EndpointKey {
        EndpointKey {
            method: self.method.clone(),
            path: self.path.clone(),
        }
    }
}

/// Persisted form of an endpoint. Extra fields in a prior output file are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointEntry {
    pub method: String,
    pub path: String,
}

impl EndpointEntry {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

impl From<&EndpointRecord> for EndpointEntry {
    fn from(record: &EndpointRecord) -> Self {
        Self::new(record.method.clone(), record.path.clone())
    }
}

impl Identity for EndpointEntry {
    type Key = EndpointKey;

    fn identity(&self) -> EndpointKey {
        EndpointKey {
            method: self.method.clone(),
            path: self.path.clone(),
        }
    }
}

impl fmt::Display for EndpointEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// One element of a persisted endpoint catalog, kept exactly as read.
///
/// Hand-edited fields survive a rewrite. Only elements with string `method`
/// and `path` fields carry a key; the rest are kept but never match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredEndpoint(pub serde_json::Value);

impl StoredEndpoint {
    pub fn key(&self) -> Option<EndpointKey> {
        let method = self.0.get("method")?.as_str()?;
        let path = self.0.get("path")?.as_str()?;
        Some(EndpointKey {
            method: method.to_string(),
            path: path.to_string(),
        })
    }

    /// The `{method, path}` view of this element, when it has both.
    pub fn entry(&self) -> Option<EndpointEntry> {
        self.key().map(|k| EndpointEntry::new(k.method, k.path))
    }
}

impl Identity for StoredEndpoint {
    type Key = Option<EndpointKey>;

    fn identity(&self) -> Option<EndpointKey> {
        self.key()
    }
}

impl From<EndpointEntry> for StoredEndpoint {
    fn from(entry: EndpointEntry) -> Self {
        Self(serde_json::json!({ "method": entry.method, "path": entry.path }))
    }
}

// ─── UI routes ──────────────────────────────────────────────────

/// A declared client-side route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiRouteRecord {
    pub path: String,
    pub file: String,
    pub line: usize,
}

/// Routes are identified by path alone: two declarations of `/login` are one route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey(pub String);

impl Identity for UiRouteRecord {
    type Key = RouteKey;

    fn identity(&self) -> RouteKey {
        RouteKey(self.path.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiRouteEntry {
    pub path: String,
}

impl From<&UiRouteRecord> for UiRouteEntry {
    fn from(record: &UiRouteRecord) -> Self {
        Self {
            path: record.path.clone(),
        }
    }
}

// ─── Per-file output ────────────────────────────────────────────

/// Everything the syntax matcher found in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileExtractions {
    pub messages: Vec<MessageRecord>,
    pub locators: Vec<LocatorRecord>,
    pub endpoints: Vec<EndpointRecord>,
    pub ui_routes: Vec<UiRouteRecord>,
}

impl FileExtractions {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
            && self.locators.is_empty()
            && self.endpoints.is_empty()
            && self.ui_routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_selector_shape() {
        let loc = LocatorRecord::new("data-testid", "submit-btn", "src/Login.tsx", 12);
        assert_eq!(loc.selector, "[data-testid='submit-btn']");
        assert_eq!(loc.key, "submit-btn");
        assert_eq!(loc.strategy, "data-testid");
        assert_eq!(loc.by, "data-testid");
    }

    #[test]
    fn test_message_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&MessageKind::ThrowError).unwrap();
        assert_eq!(json, "\"throw-error\"");
        assert_eq!(MessageKind::I18n.to_string(), "i18n");
        assert_eq!(MessageKind::ToastDesc.as_str(), "toast-desc");
    }

    #[test]
    fn test_endpoint_identity_ignores_provenance() {
        let a = EndpointRecord {
            method: "GET".into(),
            path: "/api/users".into(),
            file: "a.ts".into(),
            line: 1,
            origin: EndpointOrigin::FrontendCall,
        };
        let b = EndpointRecord {
            file: "b.ts".into(),
            line: 40,
            origin: EndpointOrigin::JavaBackend,
            ..a.clone()
        };
        assert_eq!(a.identity(), b.identity());
        assert_eq!(a.identity(), EndpointEntry::from(&b).identity());
    }

    #[test]
    fn test_stored_endpoint_key_needs_string_method_and_path() {
        let full: StoredEndpoint =
            serde_json::from_str(r#"{"method":"GET","path":"/api/a","note":"hand"}"#).unwrap();
        assert_eq!(full.entry(), Some(EndpointEntry::new("GET", "/api/a")));
        assert_eq!(full.identity(), Some(EndpointEntry::new("GET", "/api/a").identity()));

        for raw in [r#"{"path":"/api/c"}"#, r#"{"method":1,"path":"/x"}"#, r#""GET /x""#] {
            let partial: StoredEndpoint = serde_json::from_str(raw).unwrap();
            assert_eq!(partial.key(), None, "{raw}");
        }
    }

    #[test]
    fn test_stored_endpoint_from_entry() {
        let stored = StoredEndpoint::from(EndpointEntry::new("POST", "/api/x"));
        assert_eq!(
            serde_json::to_string(&stored).unwrap(),
            r#"{"method":"POST","path":"/api/x"}"#
        );
    }

    #[test]
    fn test_file_extractions_is_empty() {
        let mut extraction = FileExtractions::default();
        assert!(extraction.is_empty());
        extraction.ui_routes.push(UiRouteRecord {
            path: "/".into(),
            file: "a.tsx".into(),
            line: 1,
        });
        assert!(!extraction.is_empty());
    }

    #[test]
    fn test_endpoint_entry_ignores_extra_fields() {
        let entry: EndpointEntry =
            serde_json::from_str(r#"{"method":"POST","path":"/api/x","file":"a.ts","line":3}"#)
                .unwrap();
        assert_eq!(entry, EndpointEntry::new("POST", "/api/x"));
    }
}
