//! Key normalizer: first structural pass over a parsed bill tree.
//!
//! Rebuilds every record key by key:
//! - processing instructions and the `xmlns:dc` declaration are dropped
//! - attribute prefixes are stripped and keys camel-cased
//! - `pagebreak` markers are dropped
//! - an element holding `#text` next to attributes is flattened: the text
//!   becomes the element's value and its attributes move up one level to
//!   sit beside it (minus `display`)
//!
//! An element with text and no attributes is not hoisted; its `#text` is
//! simply dropped by the ordinary recursion.

use crate::casing::normalize_key;
use crate::config::{is_ignored_key, DISPLAY_KEY, PAGEBREAK_KEY, TEXT_KEY};
use crate::node::{Node, Record};

/// Counters collected during one normalization pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Mixed text/attribute elements flattened into their parent.
    pub flattened: usize,
    /// `pagebreak` entries dropped.
    pub pagebreaks_dropped: usize,
    /// `display` attributes dropped while flattening.
    pub display_dropped: usize,
    /// Processing instructions and namespace declarations dropped.
    pub ignored_keys: usize,
}

/// Normalize keys and flatten mixed-content elements.
///
/// # Examples
/// ```
/// use bill_normalizer::node::Node;
/// use bill_normalizer::normalize::normalize;
/// use serde_json::json;
///
/// let input = Node::from(json!({"section": {"@_id": "5", "#text": "Hello"}}));
/// let output = normalize(&input);
/// assert_eq!(output, Node::from(json!({"section": "Hello", "id": "5"})));
/// ```
#[must_use]
pub fn normalize(node: &Node) -> Node {
    normalize_with_stats(node).0
}

/// Same as [`normalize`], also returning what the pass dropped or flattened.
#[must_use]
pub fn normalize_with_stats(node: &Node) -> (Node, NormalizeStats) {
    let mut normalizer = Normalizer::default();
    let output = normalizer.node(node);
    (output, normalizer.stats)
}

#[derive(Default)]
struct Normalizer {
    stats: NormalizeStats,
}

impl Normalizer {
    fn node(&mut self, node: &Node) -> Node {
        match node {
            Node::Scalar(_) => node.clone(),
            Node::Sequence(items) => {
                Node::Sequence(items.iter().map(|item| self.node(item)).collect())
            }
            Node::Record(record) => Node::Record(self.record(record)),
        }
    }

    fn record(&mut self, record: &Record) -> Record {
        let mut result = Record::with_capacity(record.len());
        for (key, value) in record {
            self.insert_pair(key, value, &mut result);
        }
        result
    }

    /// Apply the per-entry rules to `key: value` and write the outcome into `result`.
    fn insert_pair(&mut self, key: &str, value: &Node, result: &mut Record) {
        if is_ignored_key(key) {
            self.stats.ignored_keys += 1;
            return;
        }

        let new_key = normalize_key(key);
        if new_key == PAGEBREAK_KEY {
            self.stats.pagebreaks_dropped += 1;
            return;
        }

        // Only surfaced through flattening by the caller.
        if key == TEXT_KEY {
            return;
        }

        match value {
            Node::Record(element) if element.contains_key(TEXT_KEY) => {
                self.flatten(new_key, element, result);
            }
            Node::Record(_) | Node::Sequence(_) => {
                let nested = self.node(value);
                result.insert(new_key, nested);
            }
            Node::Scalar(_) => {
                result.insert(new_key, value.clone());
            }
        }
    }

    /// Write `element`'s text under `key` and its other entries beside it.
    ///
    /// Promoted entries go through [`Self::insert_pair`], so a mixed-content
    /// child is flattened into `result` as well.
    fn flatten(&mut self, key: String, element: &Record, result: &mut Record) {
        self.stats.flattened += 1;

        if let Some(text) = element.get(TEXT_KEY) {
            let text = self.node(text);
            result.insert(key, text);
        }

        for (sub_key, sub_value) in element {
            if sub_key != TEXT_KEY && normalize_key(sub_key) == DISPLAY_KEY {
                self.stats.display_dropped += 1;
                continue;
            }
            self.insert_pair(sub_key, sub_value, result);
        }
    }
}
