//! Structural cleaner: second pass, run on normalizer output.
//!
//! Drops keys whose value is an empty record or sequence and any `display`
//! key the normalizer left behind (it only filters `display` while
//! flattening). Sequence elements are never removed, even when they clean
//! down to an empty record.

use crate::config::DISPLAY_KEY;
use crate::node::{Node, Record};

/// Remove empty container values and `display` keys.
///
/// Emptiness is judged after cleaning the value, so one pass is enough for
/// a key whose record only held noise. An empty top-level input is returned
/// as-is.
///
/// # Examples
/// ```
/// use bill_normalizer::clean::clean;
/// use bill_normalizer::node::Node;
/// use serde_json::json;
///
/// let input = Node::from(json!({"a": {}, "b": {"c": 1}}));
/// assert_eq!(clean(&input), Node::from(json!({"b": {"c": 1}})));
/// ```
#[must_use]
pub fn clean(node: &Node) -> Node {
    match node {
        Node::Scalar(_) => node.clone(),
        Node::Sequence(items) => Node::Sequence(items.iter().map(clean).collect()),
        Node::Record(record) => Node::Record(clean_record(record)),
    }
}

fn clean_record(record: &Record) -> Record {
    let mut result = Record::with_capacity(record.len());

    for (key, value) in record {
        if key == DISPLAY_KEY || value.is_empty_container() {
            continue;
        }

        let cleaned = clean(value);
        if cleaned.is_empty_container() {
            continue;
        }
        result.insert(key.clone(), cleaned);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(value: serde_json::Value) -> serde_json::Value {
        serde_json::to_value(clean(&Node::from(value))).unwrap()
    }

    #[test]
    fn test_prunes_empty_objects() {
        assert_eq!(run(json!({"a": {}, "b": {"c": 1}})), json!({"b": {"c": 1}}));
    }

    #[test]
    fn test_prunes_empty_sequences() {
        assert_eq!(run(json!({"a": [], "b": [1]})), json!({"b": [1]}));
    }

    #[test]
    fn test_strips_display_at_any_depth() {
        assert_eq!(
            run(json!({"a": {"display": "bold", "value": 1}})),
            json!({"a": {"value": 1}})
        );
        assert_eq!(
            run(json!({"x": [{"y": {"display": "no", "z": "keep"}}]})),
            json!({"x": [{"y": {"z": "keep"}}]})
        );
    }

    #[test]
    fn test_drops_record_emptied_by_cleaning() {
        assert_eq!(
            run(json!({"a": {"display": "yes"}, "b": {"c": {"d": {}}}, "e": 0})),
            json!({"e": 0})
        );
    }

    #[test]
    fn test_keeps_empty_records_inside_sequences() {
        assert_eq!(
            run(json!({"items": [{}, {"display": "x"}, {"a": 1}]})),
            json!({"items": [{}, {}, {"a": 1}]})
        );
    }

    #[test]
    fn test_keeps_falsy_scalars() {
        assert_eq!(
            run(json!({"a": "", "b": 0, "c": false, "d": null})),
            json!({"a": "", "b": 0, "c": false, "d": null})
        );
    }

    #[test]
    fn test_top_level_empty_input_returned() {
        assert_eq!(run(json!({})), json!({}));
        assert_eq!(run(json!([])), json!([]));
        assert_eq!(run(json!("scalar")), json!("scalar"));
    }

    #[test]
    fn test_idempotent() {
        let input = Node::from(json!({
            "bill": {"display": "x", "a": {"b": {}}, "c": [{"display": 1}], "d": "keep"}
        }));
        let once = clean(&input);
        assert_eq!(clean(&once), once);
    }
}
