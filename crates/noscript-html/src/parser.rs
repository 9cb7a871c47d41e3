//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our arena DOM.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use noscript_dom::{Document, DomTree, Namespace, NodeId};

/// HTML5 parser
///
/// Parsing never fails: html5ever recovers from any malformed input and
/// always yields a document.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        tracing::debug!(bytes = html.len(), "parsing HTML document");

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::new();
        self.convert_node(&dom.document, document.tree_mut(), NodeId::ROOT);

        tracing::debug!(nodes = document.tree().node_count(), "parsed HTML document");
        document
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        let id = match &handle.data {
            RcNodeData::Document => {
                self.convert_children(handle, tree, parent);
                return;
            }
            RcNodeData::Doctype {
                name,
                public_id,
                system_id,
            } => tree.create_doctype(name, public_id, system_id),
            RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element {
                name,
                attrs,
                template_contents,
                ..
            } => {
                let id = tree.create_element_ns(&name.local, Namespace::from_url(&name.ns));
                if let Some(elem) = tree.element_mut(id) {
                    for attr in attrs.borrow().iter() {
                        let attr_name = match &attr.name.prefix {
                            Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                            None => attr.name.local.to_string(),
                        };
                        elem.set_attr(attr_name, attr.value.to_string());
                    }
                }
                // Template children live in a separate fragment in RcDom
                if let Some(contents) = template_contents.borrow().as_ref() {
                    self.convert_children(contents, tree, id);
                }
                self.convert_children(handle, tree, id);
                id
            }
            RcNodeData::ProcessingInstruction { .. } => return,
        };

        if let Err(err) = tree.append_child(parent, id) {
            tracing::warn!(%err, "dropping node that could not be attached");
        }
    }

    fn convert_children(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html);

        assert!(doc.tree().node_count() > 1, "Expected more than 1 node, got {}", doc.tree().node_count());
        assert!(doc.tree().first_element_by_tag(NodeId::ROOT, "p").is_some());
    }

    #[test]
    fn test_parse_fragment() {
        let html = "<div><span>Text</span></div>";
        let doc = HtmlParser::new().parse(html);

        // Even fragments get wrapped in html/head/body by html5ever
        assert!(doc.body().is_some());
        let span = doc.tree().first_element_by_tag(NodeId::ROOT, "span").unwrap();
        assert_eq!(doc.tree().text_content(span), "Text");
    }

    #[test]
    fn test_parse_keeps_attribute_order() {
        let doc = HtmlParser::new().parse(r#"<link rel="preload" href="a.js?v=2" crossorigin>"#);
        let link = doc.tree().first_element_by_tag(NodeId::ROOT, "link").unwrap();
        let elem = doc.tree().element(link).unwrap();

        let names: Vec<_> = elem.attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["rel", "href", "crossorigin"]);
        assert_eq!(elem.get_attr("crossorigin"), Some(""));
    }

    #[test]
    fn test_parse_keeps_whitespace_text() {
        let doc = HtmlParser::new().parse("<body><div>   </div></body>");
        let div = doc.tree().first_element_by_tag(NodeId::ROOT, "div").unwrap();
        assert_eq!(doc.tree().text_content(div), "   ");
    }

    #[test]
    fn test_parse_records_namespace() {
        let doc = HtmlParser::new().parse("<style>p{}</style><svg><style>a</style></svg>");
        let styles = doc.tree().elements_by_tag(NodeId::ROOT, "style");
        let namespaces: Vec<_> = styles
            .iter()
            .filter_map(|&id| doc.tree().element(id).map(|e| e.namespace))
            .collect();
        assert_eq!(namespaces, [Namespace::Html, Namespace::Svg]);
    }

    #[test]
    fn test_parse_template_contents() {
        let doc = HtmlParser::new().parse("<template><div>inside</div></template>");
        let template = doc.tree().first_element_by_tag(NodeId::ROOT, "template").unwrap();
        assert!(doc.tree().has_descendant_tag(template, "div"));
    }
}
