//! Front-end endpoint rules: `fetch`, `request` and `axios.<verb>` call sites
//! whose target is a literal URL with a recognized prefix.

use tree_sitter::Node;

use crate::catalog::types::{EndpointOrigin, EndpointRecord};
use crate::parser::extractor::helpers::{
    call_arguments, identifier_name, line_of, member_parts, object_string_property,
    string_literal,
};

pub const DEFAULT_API_PREFIXES: &[&str] = &["/api/", "/auth/", "/v1/", "/v2/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointCallee {
    /// `<anything>.name(...)`, e.g. `this.request(...)`.
    AnyReceiver(&'static str),
    /// `name(...)`
    Function(&'static str),
    /// `object.property(...)`
    Member {
        object: &'static str,
        property: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbSource {
    /// Use the given verb unless the second argument is an object literal
    /// with a literal `method` property.
    OptionsOr(&'static str),
    /// Use the called member's name (`axios.post` → `POST`).
    MemberName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointRule {
    pub callee: EndpointCallee,
    pub verb: VerbSource,
}

impl EndpointRule {
    pub const fn any_receiver(name: &'static str) -> Self {
        Self {
            callee: EndpointCallee::AnyReceiver(name),
            verb: VerbSource::OptionsOr("GET"),
        }
    }
    pub const fn function(name: &'static str) -> Self {
        Self {
            callee: EndpointCallee::Function(name),
            verb: VerbSource::OptionsOr("GET"),
        }
    }
    pub const fn member_verb(object: &'static str, property: &'static str) -> Self {
        Self {
            callee: EndpointCallee::Member { object, property },
            verb: VerbSource::MemberName,
        }
    }

    /// Returns the member name when the call's callee matches this rule.
    fn callee_match<'a>(&self, node: &Node, source: &'a [u8]) -> Option<&'a str> {
        let function = node.child_by_field_name("function")?;
        match self.callee {
            EndpointCallee::AnyReceiver(name) => {
                let (_, property) = member_parts(&function, source)?;
                (property == name).then_some(property)
            }
            EndpointCallee::Function(name) => {
                let ident = identifier_name(&function, source)?;
                (ident == name).then_some(ident)
            }
            EndpointCallee::Member { object, property } => {
                let (o, p) = member_parts(&function, source)?;
                (o == object && p == property).then_some(p)
            }
        }
    }
}

pub const DEFAULT_ENDPOINT_RULES: &[EndpointRule] = &[
    EndpointRule::any_receiver("request"),
    EndpointRule::function("request"),
    EndpointRule::function("fetch"),
    EndpointRule::member_verb("axios", "get"),
    EndpointRule::member_verb("axios", "post"),
    EndpointRule::member_verb("axios", "put"),
    EndpointRule::member_verb("axios", "delete"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRules {
    pub rules: Vec<EndpointRule>,
    /// Only literal paths starting with one of these are kept.
    pub api_prefixes: Vec<String>,
}

impl Default for EndpointRules {
    fn default() -> Self {
        Self {
            rules: DEFAULT_ENDPOINT_RULES.to_vec(),
            api_prefixes: DEFAULT_API_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl EndpointRules {
    pub fn is_api_url(&self, url: &str) -> bool {
        self.api_prefixes.iter().any(|prefix| url.starts_with(prefix.as_str()))
    }

    /// Test every rule against a `call_expression` node.
    pub fn apply(&self, node: &Node, source: &[u8], file: &str, out: &mut Vec<EndpointRecord>) {
        if node.kind() != "call_expression" {
            return;
        }
        for rule in &self.rules {
            let Some(member) = rule.callee_match(node, source) else {
                continue;
            };
            let args = call_arguments(node);
            let Some(path) = args.first().and_then(|a| string_literal(a, source)) else {
                continue;
            };
            if !self.is_api_url(&path) {
                continue;
            }

            let method = match rule.verb {
                VerbSource::MemberName => member.to_string(),
                VerbSource::OptionsOr(default) => args
                    .get(1)
                    .and_then(|opts| object_string_property(opts, "method", source))
                    .unwrap_or_else(|| default.to_string()),
            };

            out.push(EndpointRecord {
                method: method.to_uppercase(),
                path,
                file: file.to_string(),
                line: line_of(node),
                origin: EndpointOrigin::FrontendCall,
            });
        }
    }
}
