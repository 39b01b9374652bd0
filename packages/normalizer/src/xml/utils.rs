//! XML utility functions for reading names, namespaces and text from DOM nodes.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Attribute, Node};

/// Namespace URI bound to the reserved `xml` prefix.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// `name="value"` or `name='value'` pairs inside a processing instruction.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PSEUDO_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w.:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

/// XML declaration at the very start of a document.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static XML_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\x{FEFF}?<\?xml\s([^?]*)\?>").expect("valid regex"));

fn with_prefix(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{name}"),
        _ => name.to_string(),
    }
}

/// Get the tag name as written in the source, including its namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bill_normalizer::xml::qualified_name;
///
/// let xml = r#"<bill xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>T</dc:title></bill>"#;
/// let doc = Document::parse(xml).unwrap();
/// let title = doc.root_element().first_element_child().unwrap();
/// assert_eq!(qualified_name(title), "dc:title");
/// assert_eq!(qualified_name(doc.root_element()), "bill");
/// ```
pub fn qualified_name(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    let prefix = tag.namespace().and_then(|uri| node.lookup_prefix(uri));
    with_prefix(prefix, tag.name())
}

/// Get an attribute name including its namespace prefix (e.g. `xml:lang`).
pub fn qualified_attribute_name(node: Node<'_, '_>, attribute: &Attribute<'_, '_>) -> String {
    let prefix = attribute.namespace().and_then(|uri| {
        if uri == XML_NAMESPACE {
            Some("xml")
        } else {
            node.lookup_prefix(uri)
        }
    });
    with_prefix(prefix, attribute.name())
}

/// Namespace declarations introduced by this element.
///
/// Returns `(attribute name, uri)` pairs such as `("xmlns:dc", "http://...")`
/// for namespaces in scope on `node` but not on its parent element.
pub fn declared_namespaces(node: Node<'_, '_>) -> Vec<(String, String)> {
    let parent = node.parent_element();

    node.namespaces()
        .filter(|ns| ns.uri() != XML_NAMESPACE)
        .filter(|ns| {
            parent.is_none_or(|p| {
                !p.namespaces()
                    .any(|other| other.name() == ns.name() && other.uri() == ns.uri())
            })
        })
        .map(|ns| {
            let name = match ns.name() {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            };
            (name, ns.uri().to_string())
        })
        .collect()
}

/// Get all element children of a node.
///
/// # Returns
/// Iterator over element children (excludes text nodes, comments, etc.)
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Collect an element's own text runs (not its descendants' text).
///
/// With `trim`, each run is trimmed, blank runs are skipped and the rest are
/// joined with a single space. Without it, runs are concatenated verbatim;
/// a result that is only whitespace is still reported as empty.
pub fn collect_text(node: Node<'_, '_>, trim: bool) -> String {
    let runs = node
        .children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text());

    if trim {
        runs.map(str::trim)
            .filter(|run| !run.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        let text: String = runs.collect();
        if text.trim().is_empty() {
            String::new()
        } else {
            text
        }
    }
}

/// Parse `name="value"` pairs from a processing instruction body.
///
/// Returns `None` when the body holds no such pairs.
///
/// # Examples
/// ```
/// use bill_normalizer::xml::parse_pseudo_attributes;
///
/// let attrs = parse_pseudo_attributes(r#"type="text/xsl" href="billres.xsl""#).unwrap();
/// assert_eq!(attrs[0], ("type".to_string(), "text/xsl".to_string()));
/// assert_eq!(attrs[1], ("href".to_string(), "billres.xsl".to_string()));
/// ```
pub fn parse_pseudo_attributes(body: &str) -> Option<Vec<(String, String)>> {
    let pairs: Vec<(String, String)> = PSEUDO_ATTRIBUTE
        .captures_iter(body)
        .map(|caps| {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            (caps[1].to_string(), value.to_string())
        })
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs)
    }
}

/// Body of the XML declaration (`version="1.0" ...`), if the input has one.
pub fn xml_declaration(input: &str) -> Option<&str> {
    XML_DECLARATION
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_qualified_name_plain() {
        let doc = Document::parse("<bill><legis-num/></bill>").unwrap();
        let child = doc.root_element().first_element_child().unwrap();
        assert_eq!(qualified_name(child), "legis-num");
    }

    #[test]
    fn test_qualified_name_default_namespace() {
        let xml = r#"<bill xmlns="http://example.com/bill"><title/></bill>"#;
        let doc = Document::parse(xml).unwrap();
        let child = doc.root_element().first_element_child().unwrap();
        assert_eq!(qualified_name(child), "title");
    }

    #[test]
    fn test_qualified_attribute_name() {
        let xml = r#"<bill xml:lang="EN" bill-stage="Introduced"/>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();
        let names: Vec<String> = root
            .attributes()
            .map(|a| qualified_attribute_name(root, &a))
            .collect();
        assert_eq!(names, vec!["xml:lang", "bill-stage"]);
    }

    #[test]
    fn test_declared_namespaces_only_on_declaring_element() {
        let xml = r#"<bill xmlns:dc="http://purl.org/dc/elements/1.1/"><metadata><dc:title>T</dc:title></metadata></bill>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        assert_eq!(
            declared_namespaces(root),
            vec![(
                "xmlns:dc".to_string(),
                "http://purl.org/dc/elements/1.1/".to_string()
            )]
        );
        let metadata = root.first_element_child().unwrap();
        assert!(declared_namespaces(metadata).is_empty());
    }

    #[test]
    fn test_declared_default_namespace() {
        let xml = r#"<bill xmlns="http://example.com/bill"/>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            declared_namespaces(doc.root_element()),
            vec![("xmlns".to_string(), "http://example.com/bill".to_string())]
        );
    }

    #[test]
    fn test_element_children() {
        let xml = r#"<root>text<child1/>more<child2/></root>"#;
        let doc = Document::parse(xml).unwrap();
        let children: Vec<_> = element_children(doc.root_element()).collect();
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_collect_text_trimmed() {
        let xml = "<text>  Be it enacted <term>by</term>\n  the Senate  </text>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(collect_text(doc.root_element(), true), "Be it enacted the Senate");
    }

    #[test]
    fn test_collect_text_untrimmed() {
        let xml = "<text> a <b/> c </text>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(collect_text(doc.root_element(), false), " a  c ");

        let doc = Document::parse("<text>  <b/>\n</text>").unwrap();
        assert_eq!(collect_text(doc.root_element(), false), "");
    }

    #[test]
    fn test_parse_pseudo_attributes_without_pairs() {
        assert!(parse_pseudo_attributes("just some text").is_none());
        assert_eq!(
            parse_pseudo_attributes("a='1'"),
            Some(vec![("a".to_string(), "1".to_string())])
        );
    }

    #[test]
    fn test_xml_declaration() {
        let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<bill/>";
        assert_eq!(
            xml_declaration(input),
            Some("version=\"1.0\" encoding=\"UTF-8\"")
        );
        assert!(xml_declaration("<bill/>").is_none());
        assert!(xml_declaration("<?xml-stylesheet href=\"a\"?><bill/>").is_none());
    }
}
