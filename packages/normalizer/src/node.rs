//! Generic node: the in-memory shape of one parsed XML subtree.
//!
//! Every stage of the pipeline consumes a `Node` and returns a new one.
//! Records keep insertion order so serialized output is reproducible.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Ordered mapping from key to child node.
pub type Record = IndexMap<String, Node>;

/// Numeric scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

/// Leaf value of a tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Absence of a value.
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// Tagged union over the three shapes a parsed XML subtree can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// String, number, boolean, or null.
    Scalar(Scalar),
    /// Repeated sibling elements with the same tag, in document order.
    Sequence(Vec<Node>),
    /// Child elements and attributes keyed by name.
    Record(Record),
}

impl Node {
    /// The null scalar.
    #[must_use]
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    /// An empty record.
    #[must_use]
    pub fn empty_record() -> Self {
        Node::Record(Record::new())
    }

    /// Returns `true` for a record or sequence with zero entries.
    ///
    /// Scalars are never empty containers, including the empty string.
    #[must_use]
    pub fn is_empty_container(&self) -> bool {
        match self {
            Node::Record(record) => record.is_empty(),
            Node::Sequence(items) => items.is_empty(),
            Node::Scalar(_) => false,
        }
    }

    /// Number of entries of a container, `None` for scalars.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Node::Record(record) => Some(record.len()),
            Node::Sequence(items) => Some(items.len()),
            Node::Scalar(_) => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Node::Record(record) => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// String content of a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up a key of a record. Always `None` for sequences and scalars.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_record().and_then(|record| record.get(key))
    }

    /// Visit every record key in the tree, depth first.
    pub fn for_each_key<F: FnMut(&str, &Node)>(&self, f: &mut F) {
        match self {
            Node::Record(record) => {
                for (key, value) in record {
                    f(key, value);
                    value.for_each_key(f);
                }
            }
            Node::Sequence(items) => {
                for item in items {
                    item.for_each_key(f);
                }
            }
            Node::Scalar(_) => {}
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(scalar) => scalar.serialize(serializer),
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (key, value) in record {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(Scalar::String(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Scalar(Scalar::Number(Number::Integer(value)))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Scalar(Scalar::Number(Number::Float(value)))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Scalar(Scalar::Bool(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Node::Record(record)
    }
}

impl FromIterator<(String, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Node::Record(iter.into_iter().collect())
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::null(),
            Value::Bool(b) => b.into(),
            Value::Number(n) => match n.as_i64() {
                Some(i) => i.into(),
                None => n.as_f64().map_or_else(Node::null, Node::from),
            },
            Value::String(s) => s.into(),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => map.into_iter().map(|(k, v)| (k, Node::from(v))).collect(),
        }
    }
}
