//
//  helpers.rs
//  testmeta
//

use tree_sitter::Node;

/// Get the full text of a node.
pub fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// 1-based line a node starts on.
pub fn line_of(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Text of a node if it is a bare identifier.
pub fn identifier_name<'a>(node: &Node, source: &'a [u8]) -> Option<&'a str> {
    match node.kind() {
        "identifier" | "property_identifier" => Some(node_text(node, source)),
        _ => None,
    }
}

/// Decoded value of a quoted string literal. Template strings and any other
/// expression yield `None`.
pub fn string_literal(node: &Node, source: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let mut value = String::new();
    // High half of a `\uD83D\uDE00` pair, with its raw text.
    let mut high_surrogate: Option<(u32, &str)> = None;
    let mut cursor = node.walk();
    for part in node.named_children(&mut cursor) {
        let text = node_text(&part, source);
        if part.kind() == "escape_sequence" {
            if let Some(unit) = unicode_escape_value(text) {
                match (high_surrogate.take(), unit) {
                    (Some((high, raw_high)), 0xDC00..=0xDFFF) => {
                        let combined = 0x10000 + ((high - 0xD800) << 10) + (unit - 0xDC00);
                        match char::from_u32(combined) {
                            Some(c) => value.push(c),
                            None => {
                                value.push_str(raw_high);
                                value.push_str(text);
                            }
                        }
                        continue;
                    }
                    (pending, _) => {
                        if let Some((_, raw)) = pending {
                            value.push_str(raw);
                        }
                        if (0xD800..=0xDBFF).contains(&unit) {
                            high_surrogate = Some((unit, text));
                            continue;
                        }
                    }
                }
            }
        }
        if let Some((_, raw)) = high_surrogate.take() {
            value.push_str(raw);
        }
        match part.kind() {
            "string_fragment" => value.push_str(text),
            "escape_sequence" => push_escape(&mut value, text),
            "html_character_reference" => push_html_reference(&mut value, text),
            _ => value.push_str(text),
        }
    }
    if let Some((_, raw)) = high_surrogate {
        value.push_str(raw);
    }
    Some(value)
}

/// Code unit of a `\uXXXX` or `\u{X..}` escape.
fn unicode_escape_value(escape: &str) -> Option<u32> {
    let hex = escape.strip_prefix("\\u")?;
    let hex = hex
        .strip_prefix('{')
        .and_then(|h| h.strip_suffix('}'))
        .unwrap_or(hex);
    u32::from_str_radix(hex, 16).ok()
}

/// Arguments of a call or `new` expression, without punctuation.
pub fn call_arguments<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let Some(args) = node.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = args.walk();
    let named: Vec<Node<'t>> = args
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    named
}

/// Callee of a member call split into `(object, property)` text.
pub fn member_parts<'a>(callee: &Node, source: &'a [u8]) -> Option<(&'a str, &'a str)> {
    if callee.kind() != "member_expression" {
        return None;
    }
    let object = callee.child_by_field_name("object")?;
    let property = callee.child_by_field_name("property")?;
    Some((node_text(&object, source), identifier_name(&property, source)?))
}

/// Value of an object literal property whose key is `name` and whose value
/// is a string literal. Keys may be identifiers or quoted strings.
pub fn object_string_property(object: &Node, name: &str, source: &[u8]) -> Option<String> {
    object_string_properties(object, source)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// All `(key, literal value)` pairs of an object literal, in source order.
pub fn object_string_properties(object: &Node, source: &[u8]) -> Vec<(String, String)> {
    if object.kind() != "object" {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut cursor = object.walk();
    for pair in object.named_children(&mut cursor) {
        if pair.kind() != "pair" {
            continue;
        }
        let (Some(key), Some(value)) = (
            pair.child_by_field_name("key"),
            pair.child_by_field_name("value"),
        ) else {
            continue;
        };
        let key = match key.kind() {
            "property_identifier" | "identifier" => node_text(&key, source).to_string(),
            "string" => match string_literal(&key, source) {
                Some(k) => k,
                None => continue,
            },
            _ => continue,
        };
        if let Some(value) = string_literal(&value, source) {
            out.push((key, value));
        }
    }
    out
}

fn push_escape(out: &mut String, escape: &str) {
    let body = &escape[escape.len().min(1)..];
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return;
    };
    match first {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        'b' => out.push('\u{8}'),
        'f' => out.push('\u{c}'),
        'v' => out.push('\u{b}'),
        '0' if body.len() == 1 => out.push('\0'),
        // Line continuation.
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => {}
        'x' => push_code_point(out, &body[1..], escape),
        'u' => {
            let hex = body[1..].trim_start_matches('{').trim_end_matches('}');
            push_code_point(out, hex, escape);
        }
        _ => out.push_str(body),
    }
}

fn push_code_point(out: &mut String, hex: &str, raw: &str) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => out.push_str(raw),
    }
}

fn push_html_reference(out: &mut String, reference: &str) {
    let decoded = match reference {
        "&amp;" => Some('&'),
        "&lt;" => Some('<'),
        "&gt;" => Some('>'),
        "&quot;" => Some('"'),
        "&apos;" => Some('\''),
        "&nbsp;" => Some('\u{a0}'),
        _ => reference
            .strip_prefix("&#x")
            .or_else(|| reference.strip_prefix("&#X"))
            .and_then(|h| h.strip_suffix(';'))
            .and_then(|h| u32::from_str_radix(h, 16).ok())
            .or_else(|| {
                reference
                    .strip_prefix("&#")
                    .and_then(|d| d.strip_suffix(';'))
                    .and_then(|d| d.parse().ok())
            })
            .and_then(char::from_u32),
    };
    match decoded {
        Some(c) => out.push(c),
        None => out.push_str(reference),
    }
}
