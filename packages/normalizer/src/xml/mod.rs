//! XML parsing into the generic tree, plus DOM helpers.

mod parser;
mod utils;

pub use parser::{parse_document, ParseOptions};
pub use utils::{
    collect_text, declared_namespaces, element_children, parse_pseudo_attributes,
    qualified_attribute_name, qualified_name, xml_declaration,
};
