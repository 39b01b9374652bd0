//! Reserved key conventions and defaults.
//!
//! The parser writes attributes and mixed text under reserved keys; the
//! normalizer and cleaner recognise the same constants.

/// Prefix marking a key as an XML attribute rather than a child element.
pub const ATTRIBUTE_PREFIX: &str = "@_";

/// Key holding an element's own text when it also has attributes or children.
pub const TEXT_KEY: &str = "#text";

/// Pagination marker element. Never present in output.
pub const PAGEBREAK_KEY: &str = "pagebreak";

/// Presentation hint attribute (after normalization). Never present in output.
pub const DISPLAY_KEY: &str = "display";

/// Dublin Core namespace declaration, dropped wherever it appears.
pub const DROPPED_NAMESPACE_KEY: &str = "@_xmlns:dc";

/// First character of processing-instruction keys such as `?xml`.
pub const PROCESSING_INSTRUCTION_MARKER: char = '?';

/// Extension of documents picked up in batch mode.
pub const XML_EXTENSION: &str = "xml";

/// Check whether a raw input key is dropped before any other rule applies.
///
/// # Examples
/// ```
/// use bill_normalizer::config::is_ignored_key;
///
/// assert!(is_ignored_key("?xml"));
/// assert!(is_ignored_key("@_xmlns:dc"));
/// assert!(!is_ignored_key("@_xmlns"));
/// ```
#[must_use]
pub fn is_ignored_key(key: &str) -> bool {
    key.starts_with(PROCESSING_INSTRUCTION_MARKER) || key == DROPPED_NAMESPACE_KEY
}
