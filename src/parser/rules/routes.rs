//! UI route rules: `<Route path="...">` elements and `routes = [{ path }]` tables.

use tree_sitter::Node;

use crate::catalog::types::UiRouteRecord;
use crate::parser::extractor::helpers::{
    identifier_name, line_of, node_text, object_string_property, string_literal,
};

use super::locators::jsx_attribute_parts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRules {
    /// JSX component names that declare a route.
    pub components: Vec<&'static str>,
    /// Attribute / object property holding the route path.
    pub path_property: &'static str,
    /// A variable whose name contains this (case-insensitive) is treated as a route table.
    pub binding_fragment: &'static str,
}

impl Default for RouteRules {
    fn default() -> Self {
        Self {
            components: vec!["Route"],
            path_property: "path",
            binding_fragment: "route",
        }
    }
}

impl RouteRules {
    /// Test a `jsx_opening_element` or `jsx_self_closing_element` node.
    pub fn apply_element(
        &self,
        node: &Node,
        source: &[u8],
        file: &str,
        out: &mut Vec<UiRouteRecord>,
    ) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        if name.kind() != "identifier" || !self.components.contains(&node_text(&name, source)) {
            return;
        }

        let mut cursor = node.walk();
        let path = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "jsx_attribute")
            .find_map(|attr| {
                let (attr_name, value) = jsx_attribute_parts(&attr, source)?;
                if attr_name != self.path_property {
                    return None;
                }
                string_literal(&value?, source)
            });

        if let Some(path) = path {
            out.push(UiRouteRecord {
                path,
                file: file.to_string(),
                line: line_of(node),
            });
        }
    }

    /// Test a `variable_declarator` node: `const appRoutes = [{ path: "/" }, ...]`.
    pub fn apply_declarator(
        &self,
        node: &Node,
        source: &[u8],
        file: &str,
        out: &mut Vec<UiRouteRecord>,
    ) {
        let Some(binding) = node
            .child_by_field_name("name")
            .and_then(|n| identifier_name(&n, source))
        else {
            return;
        };
        if !self.is_route_binding(binding) {
            return;
        }
        let Some(array) = node.child_by_field_name("value").filter(|v| v.kind() == "array") else {
            return;
        };

        let mut cursor = array.walk();
        for element in array.named_children(&mut cursor) {
            if element.kind() != "object" {
                continue;
            }
            if let Some(path) = object_string_property(&element, self.path_property, source) {
                out.push(UiRouteRecord {
                    path,
                    file: file.to_string(),
                    line: line_of(&element),
                });
            }
        }
    }

    pub fn is_route_binding(&self, name: &str) -> bool {
        name.to_ascii_lowercase()
            .contains(&self.binding_fragment.to_ascii_lowercase())
    }
}
