//! Convert raw XML markup into a generic [`Node`] tree.
//!
//! Uses the `@_` attribute / `#text` text convention the normalizer expects:
//!
//! ```text
//! <section id="s1"><enum>1.</enum>Short title</section>
//! => {"section": {"@_id": "s1", "enum": "1.", "#text": "Short title"}}
//! ```
//!
//! Repeated child tags collapse into a sequence at the position of their
//! first occurrence. A leaf element with no attributes becomes a scalar.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, ParsingOptions};

use super::utils::{
    collect_text, declared_namespaces, element_children, parse_pseudo_attributes,
    qualified_attribute_name, qualified_name, xml_declaration,
};
use crate::config::{ATTRIBUTE_PREFIX, PROCESSING_INSTRUCTION_MARKER, TEXT_KEY};
use crate::error::Result;
use crate::node::{Node, Record};

/// Integers without leading zeros, so bill numbers like `007` stay strings.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(0|[1-9]\d*)$").expect("valid regex"));

/// Plain decimal floats (`1.5`, `-0.25`), no exponent.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FLOAT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(0|[1-9]\d*)\.\d+$").expect("valid regex"));

/// Options controlling how text becomes scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Turn numeric and boolean text into numbers and booleans.
    pub parse_values: bool,
    /// Trim text runs and drop whitespace-only ones.
    pub trim_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            parse_values: true,
            trim_text: true,
        }
    }
}

/// Parse an XML document into a generic tree.
///
/// The result is a record holding `?xml` (when the input has a
/// declaration), one `?target` key per top-level processing instruction and
/// the root element under its tag name. DTDs are accepted; comments are
/// ignored.
///
/// # Examples
/// ```
/// use bill_normalizer::xml::{parse_document, ParseOptions};
/// use bill_normalizer::node::Node;
/// use serde_json::json;
///
/// let tree = parse_document(r#"<bill bill-stage="Introduced"><congress>118</congress></bill>"#,
///     &ParseOptions::default()).unwrap();
/// assert_eq!(tree, Node::from(json!({
///     "bill": {"@_bill-stage": "Introduced", "congress": 118}
/// })));
/// ```
pub fn parse_document(input: &str, options: &ParseOptions) -> Result<Node> {
    let mut parsing = ParsingOptions::default();
    parsing.allow_dtd = true;
    let doc = Document::parse_with_options(input, parsing)?;

    let mut record = Record::new();

    if let Some(body) = xml_declaration(input) {
        record.insert(
            format!("{PROCESSING_INSTRUCTION_MARKER}xml"),
            pseudo_attributes(body),
        );
    }

    for child in doc.root().children() {
        if child.is_element() {
            let value = convert_element(child, options);
            insert_child(&mut record, qualified_name(child), value);
        } else if let Some(pi) = child.pi() {
            let value = pseudo_attributes(pi.value.unwrap_or_default());
            record.insert(format!("{PROCESSING_INSTRUCTION_MARKER}{}", pi.target), value);
        }
    }

    tracing::debug!(keys = record.len(), "Parsed XML document");
    Ok(Node::Record(record))
}

/// Convert one element and its subtree.
fn convert_element(node: roxmltree::Node<'_, '_>, options: &ParseOptions) -> Node {
    let mut record = Record::new();

    for (name, uri) in declared_namespaces(node) {
        record.insert(format!("{ATTRIBUTE_PREFIX}{name}"), Node::from(uri));
    }

    for attribute in node.attributes() {
        let name = qualified_attribute_name(node, &attribute);
        record.insert(
            format!("{ATTRIBUTE_PREFIX}{name}"),
            Node::from(attribute.value()),
        );
    }

    for child in element_children(node) {
        let value = convert_element(child, options);
        insert_child(&mut record, qualified_name(child), value);
    }

    let text = collect_text(node, options.trim_text);

    if record.is_empty() {
        return scalar(&text, options);
    }
    if !text.is_empty() {
        record.insert(TEXT_KEY.to_string(), scalar(&text, options));
    }

    Node::Record(record)
}

/// Add a child element, turning repeated tags into a sequence.
fn insert_child(record: &mut Record, key: String, value: Node) {
    match record.get_mut(&key) {
        Some(Node::Sequence(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Node::null());
            *existing = Node::Sequence(vec![first, value]);
        }
        None => {
            record.insert(key, value);
        }
    }
}

/// Interpret element text as a scalar.
fn scalar(text: &str, options: &ParseOptions) -> Node {
    if !options.parse_values {
        return Node::from(text);
    }

    match text {
        "true" => return Node::from(true),
        "false" => return Node::from(false),
        _ => {}
    }

    if INTEGER_PATTERN.is_match(text) {
        if let Ok(value) = text.parse::<i64>() {
            return Node::from(value);
        }
    } else if FLOAT_PATTERN.is_match(text) {
        if let Ok(value) = text.parse::<f64>() {
            return Node::from(value);
        }
    }

    Node::from(text)
}

/// Processing-instruction body as `@_name` pairs, or the raw body.
fn pseudo_attributes(body: &str) -> Node {
    match parse_pseudo_attributes(body) {
        Some(pairs) => pairs
            .into_iter()
            .map(|(name, value)| (format!("{ATTRIBUTE_PREFIX}{name}"), Node::from(value)))
            .collect(),
        None => Node::from(body.trim()),
    }
}
