//! Declarative rule tables for the syntax matcher.
//!
//! Every rule the matcher knows lives here, one module per record kind.
//! A [`RuleSet`] bundles them; the defaults mirror common React + axios
//! conventions and can be replaced wholesale or per kind.

pub mod endpoints;
pub mod locators;
pub mod messages;
pub mod routes;

pub use endpoints::{EndpointCallee, EndpointRule, EndpointRules, VerbSource, DEFAULT_API_PREFIXES};
pub use locators::{AttributeName, LocatorRules};
pub use messages::{Argument, Callee, MessageRule, DEFAULT_MESSAGE_RULES};
pub use routes::RouteRules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub messages: Vec<MessageRule>,
    pub locators: LocatorRules,
    pub endpoints: EndpointRules,
    pub routes: RouteRules,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            messages: DEFAULT_MESSAGE_RULES.to_vec(),
            locators: LocatorRules::default(),
            endpoints: EndpointRules::default(),
            routes: RouteRules::default(),
        }
    }
}

impl RuleSet {
    /// Default rules with a custom recognized-prefix list for endpoint filtering.
    pub fn with_api_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rules = Self::default();
        rules.endpoints.api_prefixes = prefixes.into_iter().map(Into::into).collect();
        rules
    }
}
