//
//  config.rs
//  testmeta
//

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::parser::annotations::PrefixScope;
use crate::parser::rules::{RuleSet, DEFAULT_API_PREFIXES};

/// Environment variable holding a comma-separated recognized-prefix list.
pub const API_PREFIXES_ENV: &str = "API_PREFIXES";

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "testmeta.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestmetaConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which files feed each extraction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Front-end source root (relative to the project root).
    #[serde(default = "default_frontend_root")]
    pub frontend_root: String,
    /// Back-end annotation source root.
    #[serde(default = "default_backend_root")]
    pub backend_root: String,
    #[serde(default = "default_frontend_extensions")]
    pub frontend_extensions: Vec<String>,
    #[serde(default = "default_backend_extensions")]
    pub backend_extensions: Vec<String>,
    /// Any path with a segment named here is skipped.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Front-end call sites are kept only when their URL starts with one of these.
    #[serde(default = "default_api_prefixes")]
    pub api_prefixes: Vec<String>,
    #[serde(default)]
    pub prefix_scope: PrefixScope,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_locators_file")]
    pub locators_file: String,
    #[serde(default = "default_endpoints_file")]
    pub endpoints_file: String,
    #[serde(default = "default_ui_routes_file")]
    pub ui_routes_file: String,
}

fn default_frontend_root() -> String {
    "src".to_string()
}

fn default_backend_root() -> String {
    "backend/src/main/java".to_string()
}

fn default_frontend_extensions() -> Vec<String> {
    ["js", "jsx", "ts", "tsx"].iter().map(|s| s.to_string()).collect()
}

fn default_backend_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

fn default_exclude_dirs() -> Vec<String> {
    vec!["test".to_string(), "__tests__".to_string()]
}

fn default_api_prefixes() -> Vec<String> {
    DEFAULT_API_PREFIXES.iter().map(|s| s.to_string()).collect()
}

fn default_output_dir() -> String {
    "features/meta_data".to_string()
}

fn default_locators_file() -> String {
    "locators_babel.json".to_string()
}

fn default_endpoints_file() -> String {
    "endpoints_babel.json".to_string()
}

fn default_ui_routes_file() -> String {
    "ui_endpoints_babel.json".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            frontend_root: default_frontend_root(),
            backend_root: default_backend_root(),
            frontend_extensions: default_frontend_extensions(),
            backend_extensions: default_backend_extensions(),
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_prefixes: default_api_prefixes(),
            prefix_scope: PrefixScope::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            locators_file: default_locators_file(),
            endpoints_file: default_endpoints_file(),
            ui_routes_file: default_ui_routes_file(),
        }
    }
}

impl TestmetaConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Load from file, then apply environment overrides.
    pub fn load_with_env(path: &Path) -> Self {
        let mut config = Self::load(path);
        if let Ok(raw) = std::env::var(API_PREFIXES_ENV) {
            config.apply_api_prefixes_override(&raw);
        }
        config
    }

    /// Replace the recognized prefixes with a comma-separated list.
    /// A list with no usable entries is ignored.
    pub fn apply_api_prefixes_override(&mut self, raw: &str) {
        let prefixes = parse_prefix_list(raw);
        if prefixes.is_empty() {
            warn!(value = raw, "API_PREFIXES has no usable prefixes, keeping configured list");
            return;
        }
        self.endpoints.api_prefixes = prefixes;
    }

    /// Syntax-matcher rules for this configuration.
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::with_api_prefixes(self.endpoints.api_prefixes.iter().cloned())
    }

    pub fn resolve_frontend_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.scan.frontend_root)
    }

    pub fn resolve_backend_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.scan.backend_root)
    }

    pub fn resolve_output_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output.dir)
    }
}

/// Split a comma-separated list, trimming whitespace and dropping empties.
pub fn parse_prefix_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
