//! Key casing: hyphen/underscore separated keys to camelCase.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::ATTRIBUTE_PREFIX;

/// A separator followed by the lowercase letter that starts the next word.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]([a-z])").expect("valid regex"));

/// Convert a separated key to camelCase.
///
/// A `-` or `_` directly followed by a lowercase ASCII letter is removed and
/// the letter upper-cased. Anything else is left alone, so a separator
/// before a digit, an uppercase letter, another separator or the end of the
/// string survives. The conversion is idempotent.
///
/// # Examples
/// ```
/// use bill_normalizer::casing::to_camel_case;
///
/// assert_eq!(to_camel_case("legis-num"), "legisNum");
/// assert_eq!(to_camel_case("bill_type"), "billType");
/// assert_eq!(to_camel_case("id"), "id");
/// ```
#[must_use]
pub fn to_camel_case(key: &str) -> String {
    WORD_SEPARATOR
        .replace_all(key, |caps: &Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

/// Strip the attribute prefix and camel-case the remainder.
///
/// # Examples
/// ```
/// use bill_normalizer::casing::normalize_key;
///
/// assert_eq!(normalize_key("@_dms-id"), "dmsId");
/// assert_eq!(normalize_key("legis-type"), "legisType");
/// ```
#[must_use]
pub fn normalize_key(key: &str) -> String {
    to_camel_case(key.trim_start_matches(ATTRIBUTE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hyphenated() {
        assert_eq!(to_camel_case("legis-num"), "legisNum");
        assert_eq!(to_camel_case("public-private"), "publicPrivate");
        assert_eq!(to_camel_case("dc-title-alt"), "dcTitleAlt");
    }

    #[test]
    fn test_underscored() {
        assert_eq!(to_camel_case("bill_type"), "billType");
        assert_eq!(to_camel_case("resolution_stage_name"), "resolutionStageName");
    }

    #[test]
    fn test_no_separator_unchanged() {
        assert_eq!(to_camel_case("id"), "id");
        assert_eq!(to_camel_case("legisNum"), "legisNum");
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_camel_case("#text"), "#text");
    }

    #[test]
    fn test_separator_before_non_letter_is_kept() {
        assert_eq!(to_camel_case("section-1"), "section-1");
        assert_eq!(to_camel_case("a_B"), "a_B");
        assert_eq!(to_camel_case("trailing-"), "trailing-");
        assert_eq!(to_camel_case("-leading"), "Leading");
    }

    #[test]
    fn test_double_separator() {
        assert_eq!(to_camel_case("a--b"), "a-B");
        assert_eq!(to_camel_case("a-_b"), "a-B");
    }

    #[test]
    fn test_namespace_colon_untouched() {
        assert_eq!(to_camel_case("xmlns:dc"), "xmlns:dc");
        assert_eq!(to_camel_case("dc:date-issued"), "dc:dateIssued");
    }

    #[test]
    fn test_normalize_key_strips_prefix() {
        assert_eq!(normalize_key("@_id"), "id");
        assert_eq!(normalize_key("@_@_id"), "id");
        assert_eq!(normalize_key("@id"), "@id");
        assert_eq!(normalize_key("@_key_words"), "keyWords");
        assert_eq!(normalize_key("title"), "title");
    }

    proptest! {
        #[test]
        fn prop_to_camel_case_idempotent(key in "[a-zA-Z0-9_\\-:#@.]{0,24}") {
            let once = to_camel_case(&key);
            prop_assert_eq!(to_camel_case(&once), once);
        }

        #[test]
        fn prop_no_separator_before_lowercase(key in "[a-z_\\-]{0,24}") {
            let converted = to_camel_case(&key);
            prop_assert!(!WORD_SEPARATOR.is_match(&converted));
        }
    }
}
