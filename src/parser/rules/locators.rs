//! Locator rules: JSX attributes that make an element addressable from a test.

use tree_sitter::Node;

use crate::catalog::types::LocatorRecord;
use crate::parser::extractor::helpers::{line_of, node_text, string_literal};

/// An attribute name pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeName {
    Exact(&'static str),
    /// The prefix followed by at least one word or hyphen character (`aria-label`).
    Prefix(&'static str),
}

impl AttributeName {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            AttributeName::Exact(exact) => name == *exact,
            AttributeName::Prefix(prefix) => name.strip_prefix(prefix).is_some_and(|rest| {
                !rest.is_empty()
                    && rest
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            }),
        }
    }
}

pub const DEFAULT_LOCATOR_ATTRIBUTES: &[AttributeName] = &[
    AttributeName::Exact("id"),
    AttributeName::Exact("data-testid"),
    AttributeName::Exact("data-test"),
    AttributeName::Exact("data-qa"),
    AttributeName::Prefix("aria-"),
    AttributeName::Exact("placeholder"),
    AttributeName::Exact("type"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorRules {
    pub attributes: Vec<AttributeName>,
}

impl Default for LocatorRules {
    fn default() -> Self {
        Self {
            attributes: DEFAULT_LOCATOR_ATTRIBUTES.to_vec(),
        }
    }
}

impl LocatorRules {
    pub fn is_locator_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.matches(name))
    }

    /// Test a `jsx_attribute` node. Expression-valued attributes
    /// (`data-testid={id}`) never match.
    pub fn apply(&self, node: &Node, source: &[u8], file: &str, out: &mut Vec<LocatorRecord>) {
        if node.kind() != "jsx_attribute" {
            return;
        }
        let Some((name, value)) = jsx_attribute_parts(node, source) else {
            return;
        };
        if !self.is_locator_attribute(name) {
            return;
        }
        if let Some(value) = value.and_then(|v| string_literal(&v, source)) {
            out.push(LocatorRecord::new(name, &value, file, line_of(node)));
        }
    }
}

/// Split a `jsx_attribute` into its name text and optional value node.
pub fn jsx_attribute_parts<'t, 'a>(
    node: &Node<'t>,
    source: &'a [u8],
) -> Option<(&'a str, Option<Node<'t>>)> {
    let name = node.named_child(0)?;
    let value = node.named_child(1);
    Some((node_text(&name, source), value))
}
