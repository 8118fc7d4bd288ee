//! End-to-end runs against a throwaway project tree.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use testmeta::{run_all, run_backend, run_frontend, EndpointEntry, PrefixScope, TestmetaConfig};

const LOGIN_JSX: &str = r#"import axios from "axios";
import { Route } from "react-router-dom";

export function Login() {
  async function submit() {
    await axios.post("/api/login", {});
    toast.success("Signed in");
  }
  return (
    <form onSubmit={submit}>
      <input id="username" data-testid="username-input" />
      <button aria-label="Submit login">Go</button>
    </form>
  );
}

export const loginRoute = <Route path="/login" element={<Login />} />;
"#;

const USERS_TS: &str = r#"export async function loadUsers(): Promise<unknown> {
  const res = await fetch("/api/users");
  return res.json();
}

export function createUser(body: object) {
  return request("/api/users", { method: "post", body });
}
"#;

const ORDER_CONTROLLER: &str = r#"package com.shop;

@RestController
@RequestMapping("/api")
public class OrderController {
    @PostMapping("/login")
    public Session login() { return null; }

    @GetMapping("orders")
    public List<Order> list() { return null; }
}
"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "src/pages/Login.jsx", LOGIN_JSX);
    write(root, "src/api/users.ts", USERS_TS);
    write(root, "src/Broken.js", "export function ( {\n");
    write(root, "src/__tests__/Login.test.jsx", "const x = <div data-testid=\"only-in-tests\" />;\n");
    write(
        root,
        "backend/src/main/java/com/shop/OrderController.java",
        ORDER_CONTROLLER,
    );
    temp
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn read_endpoints(root: &Path) -> Vec<EndpointEntry> {
    let path = root.join("features/meta_data/endpoints_babel.json");
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_full_run_writes_catalogs() {
    let temp = project();
    let root = temp.path();
    let config = TestmetaConfig::default();

    let report = run_all(root, &config).unwrap();

    let frontend = report.frontend.unwrap();
    assert_eq!(frontend.files_scanned, 2);
    assert_eq!(frontend.files_skipped, 1);
    assert_eq!(frontend.messages, 1);

    let backend = report.backend.unwrap();
    assert_eq!(backend.endpoints_found, 2);
    assert_eq!(backend.added, vec![EndpointEntry::new("GET", "/api/orders")]);

    assert_eq!(
        read_endpoints(root),
        vec![
            EndpointEntry::new("GET", "/api/users"),
            EndpointEntry::new("POST", "/api/users"),
            EndpointEntry::new("POST", "/api/login"),
            EndpointEntry::new("GET", "/api/orders"),
        ]
    );

    let out = root.join("features/meta_data");
    let locators = read_json(&out.join("locators_babel.json"));
    let selectors: Vec<_> = locators
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["selector"].as_str().unwrap())
        .collect();
    assert_eq!(
        selectors,
        vec![
            "[id='username']",
            "[data-testid='username-input']",
            "[aria-label='Submit login']",
        ]
    );
    assert_eq!(locators[0]["key"], "username");
    assert_eq!(locators[0]["strategy"], "id");
    assert!(locators[0].get("file").is_none());

    let routes = read_json(&out.join("ui_endpoints_babel.json"));
    assert_eq!(routes, serde_json::json!([{ "path": "/login" }]));

    let mut names: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["endpoints_babel.json", "locators_babel.json", "ui_endpoints_babel.json"]
    );
}

#[test]
fn test_repeated_runs_are_stable() {
    let temp = project();
    let root = temp.path();
    let config = TestmetaConfig::default();

    run_all(root, &config).unwrap();
    let first = read_endpoints(root);

    let report = run_all(root, &config).unwrap();
    assert_eq!(read_endpoints(root), first);

    let backend = report.backend.unwrap();
    assert_eq!(backend.added, vec![EndpointEntry::new("GET", "/api/orders")]);

    let again = run_backend(root, &config).unwrap();
    assert!(again.added.is_empty());
    assert_eq!(read_endpoints(root), first);
}

#[test]
fn test_backend_merge_preserves_hand_edited_entries() {
    let temp = project();
    let root = temp.path();
    let out = root.join("features/meta_data");
    fs::create_dir_all(&out).unwrap();
    fs::write(
        out.join("endpoints_babel.json"),
        r#"[{"method": "GET", "path": "/manual"}, {"method": "POST", "path": "/api/login"}]"#,
    )
    .unwrap();

    let summary = run_backend(root, &TestmetaConfig::default()).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(
        read_endpoints(root),
        vec![
            EndpointEntry::new("GET", "/manual"),
            EndpointEntry::new("POST", "/api/login"),
            EndpointEntry::new("GET", "/api/orders"),
        ]
    );
}

#[test]
fn test_backend_merge_keeps_unrecognised_entries_verbatim() {
    let temp = project();
    let root = temp.path();
    let out = root.join("features/meta_data");
    fs::create_dir_all(&out).unwrap();
    fs::write(
        out.join("endpoints_babel.json"),
        r#"[{"method": "GET", "path": "/api/orders", "owner": "qa"}, {"path": "/draft"}, "legacy"]"#,
    )
    .unwrap();

    let summary = run_backend(root, &TestmetaConfig::default()).unwrap();
    assert_eq!(summary.added, vec![EndpointEntry::new("POST", "/api/login")]);
    assert_eq!(summary.total, 4);

    assert_eq!(
        read_json(&out.join("endpoints_babel.json")),
        serde_json::json!([
            { "method": "GET", "path": "/api/orders", "owner": "qa" },
            { "path": "/draft" },
            "legacy",
            { "method": "POST", "path": "/api/login" },
        ])
    );
}

#[test]
fn test_configured_prefixes_and_scope() {
    let temp = project();
    let root = temp.path();
    write(
        root,
        "backend/src/main/java/com/shop/Zones.java",
        "@RequestMapping(\"/zones\")\nclass Zones {\n  @GetMapping(\"/{id}\") Zone get() { return null; }\n}\nclass Misc {\n  @GetMapping(\"/ping\") String ping() { return \"\"; }\n}\n",
    );

    let mut config = TestmetaConfig::default();
    config.endpoints.api_prefixes = vec!["/api/login".into()];
    config.endpoints.prefix_scope = PrefixScope::Type;

    let frontend = run_frontend(root, &config).unwrap();
    assert_eq!(frontend.endpoints, 1);

    run_backend(root, &config).unwrap();
    let paths: Vec<_> = read_endpoints(root).into_iter().map(|e| e.path).collect();
    assert_eq!(paths, vec!["/api/login", "/api/orders", "/zones/{id}", "/ping"]);
}
