//! Pipeline tying parser, normalizer and cleaner together.

use std::fs;
use std::path::Path;

use crate::clean::clean;
use crate::error::{NormalizerError, Result};
use crate::node::Node;
use crate::normalize::normalize_with_stats;
use crate::xml::{parse_document, ParseOptions};

/// What to do with a parsed tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransformMode {
    /// Normalize keys, then clean the structure.
    #[default]
    Clean,
    /// Return the parser output untouched.
    Raw,
}

/// Normalize then clean a parsed tree.
///
/// # Examples
/// ```
/// use bill_normalizer::node::Node;
/// use bill_normalizer::pipeline::transform;
/// use serde_json::json;
///
/// let input = Node::from(json!({"bill": {"title": {"@_role": "short"}, "pagebreak": ""}}));
/// assert_eq!(transform(&input), Node::from(json!({"bill": {"title": {"role": "short"}}})));
/// ```
#[must_use]
pub fn transform(node: &Node) -> Node {
    let (normalized, stats) = normalize_with_stats(node);
    tracing::debug!(
        flattened = stats.flattened,
        pagebreaks = stats.pagebreaks_dropped,
        display = stats.display_dropped,
        ignored = stats.ignored_keys,
        "Normalized keys"
    );
    clean(&normalized)
}

/// Parse XML text and transform it according to `mode`.
pub fn transform_xml(xml: &str, options: &ParseOptions, mode: TransformMode) -> Result<Node> {
    let parsed = parse_document(xml, options)?;
    Ok(match mode {
        TransformMode::Clean => transform(&parsed),
        TransformMode::Raw => parsed,
    })
}

/// Read, parse and transform one XML file.
///
/// # Returns
/// * `Err(NormalizerError::InputNotFound)` if `path` does not exist
/// * `Err(NormalizerError::XmlParse)` if the markup is malformed
pub fn transform_file(path: &Path, options: &ParseOptions, mode: TransformMode) -> Result<Node> {
    if !path.exists() {
        return Err(NormalizerError::InputNotFound(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), "Reading XML file");
    let xml = fs::read_to_string(path)?;
    transform_xml(&xml, options, mode)
}
