//
//  annotations.rs
//  testmeta
//
//  Line-oriented scanner for annotation-declared HTTP endpoints
//  (Spring `@RequestMapping` / `@GetMapping` and friends).
//

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::types::{EndpointOrigin, EndpointRecord};
use crate::error::Result;

/// How a type-level path prefix is applied to verb annotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixScope {
    /// The first prefix declaration anywhere in the file applies to every
    /// verb annotation in it.
    #[default]
    File,
    /// A prefix declaration applies to the type declaration it annotates,
    /// up to the next type declaration. Nested types are not tracked.
    Type,
}

/// Annotation name, optional `value =` / `path =`, then a quoted literal.
fn mapping_pattern(annotation: &str) -> String {
    format!(r#"@{annotation}\s*\(\s*(?:(?:value|path)\s*=\s*)?["']([^"']+)["']"#)
}

const VERB_ANNOTATIONS: &[(&str, &str)] = &[
    ("GetMapping", "GET"),
    ("PostMapping", "POST"),
    ("PutMapping", "PUT"),
    ("DeleteMapping", "DELETE"),
    ("PatchMapping", "PATCH"),
];

/// Scans raw back-end source text for endpoint annotations.
#[derive(Debug, Clone)]
pub struct AnnotationScanner {
    prefix: Regex,
    verbs: Vec<(Regex, &'static str)>,
    type_decl: Regex,
    scope: PrefixScope,
}

impl AnnotationScanner {
    pub fn new(scope: PrefixScope) -> Result<Self> {
        let prefix = Regex::new(&mapping_pattern("RequestMapping"))?;
        let verbs = VERB_ANNOTATIONS
            .iter()
            .map(|(name, method)| Ok((Regex::new(&mapping_pattern(name))?, *method)))
            .collect::<Result<Vec<_>>>()?;
        let type_decl = Regex::new(r"\b(?:class|interface|record|enum)\s+[A-Za-z_$][\w$]*")?;
        Ok(Self {
            prefix,
            verbs,
            type_decl,
            scope,
        })
    }

    pub fn scope(&self) -> PrefixScope {
        self.scope
    }

    /// Extract endpoint declarations from one file.
    pub fn scan(&self, file: &str, content: &str) -> Vec<EndpointRecord> {
        match self.scope {
            PrefixScope::File => self.scan_file_scope(file, content),
            PrefixScope::Type => self.scan_type_scope(file, content),
        }
    }

    fn scan_file_scope(&self, file: &str, content: &str) -> Vec<EndpointRecord> {
        let prefix = content
            .lines()
            .find_map(|line| self.prefix_on(line))
            .unwrap_or_default();

        let mut endpoints = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            self.push_verbs(line, idx + 1, &prefix, file, &mut endpoints);
        }
        endpoints
    }

    fn scan_type_scope(&self, file: &str, content: &str) -> Vec<EndpointRecord> {
        let mut endpoints = Vec::new();
        let mut pending: Option<String> = None;
        let mut current = String::new();

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || is_comment(trimmed) {
                continue;
            }
            let declared = self.prefix_on(trimmed);
            let has_prefix = declared.is_some();
            if has_prefix {
                pending = declared;
            }

            if self.type_decl.is_match(trimmed) {
                current = pending.take().unwrap_or_default();
            } else if has_prefix {
                continue;
            } else if !trimmed.starts_with('@') {
                // A method-level @RequestMapping is not a prefix.
                pending = None;
            }
            self.push_verbs(line, idx + 1, &current, file, &mut endpoints);
        }
        endpoints
    }

    fn prefix_on(&self, line: &str) -> Option<String> {
        self.prefix
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn push_verbs(
        &self,
        line: &str,
        line_no: usize,
        prefix: &str,
        file: &str,
        out: &mut Vec<EndpointRecord>,
    ) {
        for (pattern, method) in &self.verbs {
            if let Some(path) = pattern.captures(line).and_then(|c| c.get(1)) {
                out.push(EndpointRecord {
                    method: method.to_string(),
                    path: apply_base_path(path.as_str(), prefix),
                    file: file.to_string(),
                    line: line_no,
                    origin: EndpointOrigin::JavaBackend,
                });
            }
        }
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

/// Join a type-level prefix and a method-level path with exactly one separator.
///
/// A relative path that already spells out the prefix (`orders/{id}` under
/// `/orders`) is taken as rooted under it rather than repeating it.
pub fn apply_base_path(path: &str, base_path: &str) -> String {
    if base_path.is_empty() {
        return path.to_string();
    }
    let base = base_path.trim_end_matches('/');
    if path.is_empty() {
        return base_path.to_string();
    }
    if path.starts_with('/') {
        return format!("{base}{path}");
    }

    let bare_base = base.trim_start_matches('/');
    let repeats_base = !bare_base.is_empty()
        && path
            .strip_prefix(bare_base)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
    if repeats_base {
        let lead = if base.starts_with('/') { "/" } else { "" };
        return format!("{lead}{path}");
    }
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_CONTROLLER: &str = r#"package com.shop.orders;

@RestController
@RequestMapping("/orders")
public class OrderController {

    @GetMapping("/{id}")
    public Order get(@PathVariable Long id) { return service.get(id); }

    @PostMapping(value = "")
    public Order create(@RequestBody Order order) { return service.save(order); }

    @PutMapping('items/{itemId}')
    public Order update() { return null; }

    @DeleteMapping
    public void clear() {}

    @PatchMapping(path = "/{id}/status")
    public Order patch() { return null; }
}
"#;

    fn pairs(records: &[EndpointRecord]) -> Vec<(&str, &str, usize)> {
        records
            .iter()
            .map(|e| (e.method.as_str(), e.path.as_str(), e.line))
            .collect()
    }

    #[test]
    fn test_apply_base_path() {
        assert_eq!(apply_base_path("/{id}", "/orders"), "/orders/{id}");
        assert_eq!(apply_base_path("orders/{id}", "/orders"), "/orders/{id}");
        assert_eq!(apply_base_path("{id}", "/orders"), "/orders/{id}");
        assert_eq!(apply_base_path("/{id}", "/orders/"), "/orders/{id}");
        assert_eq!(apply_base_path("ordersummary", "/orders"), "/orders/ordersummary");
        assert_eq!(apply_base_path("/users", ""), "/users");
        assert_eq!(apply_base_path("users", ""), "users");
        assert_eq!(apply_base_path("", "/orders"), "/orders");
    }

    #[test]
    fn test_scan_file_scope() {
        let scanner = AnnotationScanner::new(PrefixScope::File).unwrap();
        let out = scanner.scan("OrderController.java", ORDER_CONTROLLER);
        assert_eq!(
            pairs(&out),
            vec![
                ("GET", "/orders/{id}", 7),
                ("PUT", "/orders/items/{itemId}", 13),
                ("PATCH", "/orders/{id}/status", 19),
            ]
        );
        assert!(out.iter().all(|e| e.origin == EndpointOrigin::JavaBackend));
        assert!(out.iter().all(|e| e.file == "OrderController.java"));
    }

    #[test]
    fn test_no_prefix_leaves_paths_untouched() {
        let scanner = AnnotationScanner::new(PrefixScope::File).unwrap();
        let src = "class Health {\n  @GetMapping(\"/health\")\n  String ok() { return \"ok\"; }\n}\n";
        let out = scanner.scan("Health.java", src);
        assert_eq!(pairs(&out), vec![("GET", "/health", 2)]);
    }

    const TWO_CONTROLLERS: &str = r#"@RequestMapping("/users")
class UserController {
    @GetMapping("/{id}")
    User get() { return null; }

    @RequestMapping("/legacy")
    void legacy() {}

    @PostMapping("/")
    User create() { return null; }
}

@RequestMapping("/admin")
class AdminController {
    @DeleteMapping("/cache")
    void flush() {}
}

class Plain {
    @GetMapping("/ping")
    String ping() { return "pong"; }
}
"#;

    #[test]
    fn test_file_scope_applies_first_prefix_everywhere() {
        let scanner = AnnotationScanner::new(PrefixScope::File).unwrap();
        let out = scanner.scan("Controllers.java", TWO_CONTROLLERS);
        let paths: Vec<_> = out.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/users/{id}", "/users/", "/users/cache", "/users/ping"]);
    }

    #[test]
    fn test_type_scope_tracks_each_type() {
        let scanner = AnnotationScanner::new(PrefixScope::Type).unwrap();
        assert_eq!(scanner.scope(), PrefixScope::Type);
        let out = scanner.scan("Controllers.java", TWO_CONTROLLERS);
        assert_eq!(
            pairs(&out),
            vec![
                ("GET", "/users/{id}", 3),
                ("POST", "/users/", 9),
                ("DELETE", "/admin/cache", 15),
                ("GET", "/ping", 20),
            ]
        );
    }

    #[test]
    fn test_inline_annotation_on_declaration_line() {
        let scanner = AnnotationScanner::new(PrefixScope::Type).unwrap();
        let src = "@RequestMapping(\"/api\")\npublic class A {\n  @GetMapping(\"/a\") public String a() { return \"\"; }\n}\n";
        let out = scanner.scan("A.java", src);
        assert_eq!(pairs(&out), vec![("GET", "/api/a", 3)]);
    }

    #[test]
    fn test_type_scope_ignores_comments_and_handles_inline_prefix() {
        let scanner = AnnotationScanner::new(PrefixScope::Type).unwrap();
        let src = "// this class handles reports\n@RequestMapping(\"/reports\") public class Reports {\n  @GetMapping(\"daily\")\n  String daily() { return \"\"; }\n}\n";
        let out = scanner.scan("Reports.java", src);
        assert_eq!(pairs(&out), vec![("GET", "/reports/daily", 3)]);
    }
}
