//! Message rules: user-visible strings passed to toasts, i18n lookups,
//! error setters, alerts, thrown errors and console output.

use tree_sitter::Node;

use crate::catalog::types::{MessageKind, MessageRecord};
use crate::parser::extractor::helpers::{
    call_arguments, identifier_name, line_of, member_parts, object_string_properties,
    string_literal,
};

/// The call shape a message rule fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callee {
    /// `object.property(...)`
    Member {
        object: &'static str,
        property: &'static str,
    },
    /// `name(...)`
    Function(&'static str),
    /// `new Name(...)`. A plain `Name(...)` call does not match.
    Constructor(&'static str),
}

/// Where the message text is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    /// First argument, when it is a string literal.
    FirstLiteral,
    /// A named property of a first-argument object literal.
    ObjectProperty(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRule {
    pub callee: Callee,
    pub argument: Argument,
    pub kind: MessageKind,
}

impl MessageRule {
    pub const fn member(object: &'static str, property: &'static str, kind: MessageKind) -> Self {
        Self {
            callee: Callee::Member { object, property },
            argument: Argument::FirstLiteral,
            kind,
        }
    }
    pub const fn function(name: &'static str, kind: MessageKind) -> Self {
        Self {
            callee: Callee::Function(name),
            argument: Argument::FirstLiteral,
            kind,
        }
    }
    pub const fn function_property(
        name: &'static str,
        property: &'static str,
        kind: MessageKind,
    ) -> Self {
        Self {
            callee: Callee::Function(name),
            argument: Argument::ObjectProperty(property),
            kind,
        }
    }
    pub const fn constructor(name: &'static str, kind: MessageKind) -> Self {
        Self {
            callee: Callee::Constructor(name),
            argument: Argument::FirstLiteral,
            kind,
        }
    }

    /// Test this rule against a `call_expression` or `new_expression` node.
    pub fn apply(&self, node: &Node, source: &[u8], file: &str, out: &mut Vec<MessageRecord>) {
        if !self.callee_matches(node, source) {
            return;
        }
        let args = call_arguments(node);
        let Some(first) = args.first() else {
            return;
        };
        let line = line_of(node);
        let record = |message: String| MessageRecord {
            message,
            kind: self.kind,
            file: file.to_string(),
            line,
        };

        match self.argument {
            Argument::FirstLiteral => {
                if let Some(text) = string_literal(first, source) {
                    out.push(record(text));
                }
            }
            Argument::ObjectProperty(name) => {
                for (key, value) in object_string_properties(first, source) {
                    if key == name {
                        out.push(record(value));
                    }
                }
            }
        }
    }

    fn callee_matches(&self, node: &Node, source: &[u8]) -> bool {
        match (self.callee, node.kind()) {
            (Callee::Member { object, property }, "call_expression") => node
                .child_by_field_name("function")
                .and_then(|f| member_parts(&f, source))
                .is_some_and(|(o, p)| o == object && p == property),
            (Callee::Function(name), "call_expression") => node
                .child_by_field_name("function")
                .and_then(|f| identifier_name(&f, source))
                .is_some_and(|n| n == name),
            (Callee::Constructor(name), "new_expression") => node
                .child_by_field_name("constructor")
                .and_then(|c| identifier_name(&c, source))
                .is_some_and(|n| n == name),
            _ => false,
        }
    }
}

pub const DEFAULT_MESSAGE_RULES: &[MessageRule] = &[
    MessageRule::member("toast", "error", MessageKind::ToastError),
    MessageRule::member("toast", "success", MessageKind::ToastSuccess),
    MessageRule::member("toast", "info", MessageKind::ToastInfo),
    MessageRule::member("toast", "warning", MessageKind::ToastWarning),
    MessageRule::function_property("toast", "title", MessageKind::ToastTitle),
    MessageRule::function_property("toast", "description", MessageKind::ToastDesc),
    MessageRule::function("t", MessageKind::I18n),
    MessageRule::function("setError", MessageKind::SetError),
    MessageRule::function("alert", MessageKind::Alert),
    MessageRule::constructor("Error", MessageKind::ThrowError),
    MessageRule::member("console", "log", MessageKind::ConsoleLog),
    MessageRule::member("console", "warn", MessageKind::ConsoleWarn),
    MessageRule::member("console", "error", MessageKind::ConsoleError),
];
