//
//  mod.rs
//  testmeta
//

pub(crate) mod helpers;

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use super::language::SupportedLanguage;
use super::rules::RuleSet;
use crate::catalog::types::FileExtractions;
use crate::error::{CatalogError, Result};

/// Parse a front-end source file. A tree containing syntax errors counts as
/// a failed parse.
pub fn parse_source(path: &Path, source: &str) -> Result<Tree> {
    let lang = SupportedLanguage::from_path(path)
        .ok_or_else(|| CatalogError::UnsupportedLanguage(path.to_path_buf()))?;

    let mut parser = Parser::new();
    parser
        .set_language(&lang.tree_sitter_language())
        .map_err(|e| CatalogError::ParserInitError(path.to_path_buf(), e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| CatalogError::TreeSitterParseFailed(path.to_path_buf()))?;

    if tree.root_node().has_error() {
        return Err(CatalogError::TreeSitterParseFailed(path.to_path_buf()));
    }
    Ok(tree)
}

/// Extract messages, locators, endpoints and UI routes from one source file.
pub fn extract_file(path: &Path, source: &str, rules: &RuleSet) -> Result<FileExtractions> {
    let tree = parse_source(path, source)?;
    let file = path.to_string_lossy();
    Ok(extract_tree(&tree, source.as_bytes(), &file, rules))
}

/// Run every rule against every node of an already parsed tree.
pub fn extract_tree(tree: &Tree, source: &[u8], file: &str, rules: &RuleSet) -> FileExtractions {
    let mut out = FileExtractions::default();
    walk_tree(tree, source, file, rules, &mut out);
    out
}

// ── Walker ───────────────────────────────────────────────────────────────────

/// Pre-order walk driven by a `TreeCursor`. Depth is bounded by the tree,
/// not by the call stack.
fn walk_tree(tree: &Tree, source: &[u8], file: &str, rules: &RuleSet, out: &mut FileExtractions) {
    let mut cursor = tree.walk();
    loop {
        visit_node(&cursor.node(), source, file, rules, out);

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

fn visit_node(node: &Node, source: &[u8], file: &str, rules: &RuleSet, out: &mut FileExtractions) {
    match node.kind() {
        "call_expression" => {
            for rule in &rules.messages {
                rule.apply(node, source, file, &mut out.messages);
            }
            rules.endpoints.apply(node, source, file, &mut out.endpoints);
        }
        "new_expression" => {
            for rule in &rules.messages {
                rule.apply(node, source, file, &mut out.messages);
            }
        }
        "jsx_attribute" => {
            rules.locators.apply(node, source, file, &mut out.locators);
        }
        "jsx_opening_element" | "jsx_self_closing_element" => {
            rules.routes.apply_element(node, source, file, &mut out.ui_routes);
        }
        "variable_declarator" => {
            rules.routes.apply_declarator(node, source, file, &mut out.ui_routes);
        }
        _ => {}
    }
}
