//! Bill normalizer - Turn attribute-heavy legislative XML into clean records.
//!
//! Parsed bill XML mixes child elements, attributes and text in ways that
//! make the raw tree awkward to store or query. This crate rewrites it into
//! a canonical nested form: camelCase keys without attribute markers,
//! mixed text/attribute elements flattened, and no pagination markers,
//! display hints or empty containers.
//!
//! # Example
//!
//! ```
//! use bill_normalizer::node::Node;
//! use bill_normalizer::transform;
//! use serde_json::json;
//!
//! let parsed = Node::from(json!({
//!     "bill": {
//!         "@_bill-stage": "Introduced",
//!         "legis-num": {"@_display": "yes", "#text": "H. R. 1"},
//!         "pagebreak": ""
//!     }
//! }));
//!
//! assert_eq!(
//!     transform(&parsed),
//!     Node::from(json!({"bill": {"billStage": "Introduced", "legisNum": "H. R. 1"}}))
//! );
//! ```
//!
//! # Architecture
//!
//! - [`node`]: Generic node tree (scalar, sequence, record)
//! - [`config`]: Reserved key conventions
//! - [`casing`]: camelCase key conversion
//! - [`normalize`]: Key normalizer (first pass)
//! - [`clean`]: Structural cleaner (second pass)
//! - [`xml`]: XML to generic tree parsing
//! - [`pipeline`]: Parse, normalize and clean in one call
//! - [`output`]: JSON/YAML rendering and atomic file output
//! - [`batch`]: Directory processing
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod batch;
pub mod casing;
pub mod clean;
pub mod cli;
pub mod config;
pub mod error;
pub mod node;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod xml;

// Re-export main functions
pub use pipeline::{transform, transform_file, transform_xml, TransformMode};

// Re-export commonly used items
pub use error::{NormalizerError, Result};
pub use node::{Node, Record, Scalar};
pub use output::OutputFormat;
pub use xml::ParseOptions;
