//! noscript HTML
//!
//! HTML5 parser built on html5ever, converting into the arena DOM, and
//! the matching serializer that writes a DOM back out as HTML text.

mod parser;
mod serializer;

pub use noscript_dom::{Document, DomTree, Node, NodeId};
pub use parser::HtmlParser;
pub use serializer::HtmlSerializer;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Serialize a whole Document back to HTML
pub fn serialize(doc: &Document) -> String {
    HtmlSerializer::new().serialize(doc)
}
