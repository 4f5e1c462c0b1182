//! Markup fragment tree
//!
//! Fragments are parsed with html5ever into an rcdom and then copied into a
//! flat arena. Nodes are addressed by [`NodeId`], a plain index that tokens
//! can carry around without borrowing the tree. The arena supports the two
//! mutations the diff needs: replacing a text node with pre-rendered markup
//! and serializing the result back to HTML.

use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_fragment, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::Result;

/// Elements without an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose text children are serialized without escaping
pub(crate) const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "plaintext", "script", "style", "xmp",
];

/// Elements whose parser drops a newline right after the start tag
const LEADING_NEWLINE_ELEMENTS: &[&str] = &["listing", "pre", "textarea"];

/// Handle to a node inside a [`Fragment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Content of a single node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        name: String,
        attrs: Vec<(String, String)>,
        children: Vec<NodeId>,
    },
    Text(String),
    Comment(String),
    Doctype(String),
    /// Pre-rendered markup, written out verbatim
    Markup(String),
}

/// A parsed markup fragment
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Fragment {
    /// Parse an HTML fragment as if it were the content of a `<body>`
    pub fn parse(html: &str) -> Result<Self> {
        let context = QualName::new(None, ns!(html), "body".into());
        let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, vec![], false)
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut fragment = Self::default();
        for child in fragment_children(&dom.document) {
            if let Some(id) = fragment.convert(&child) {
                fragment.roots.push(id);
            }
        }
        Ok(fragment)
    }

    /// Top-level nodes in document order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Children of an element, empty for every other node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0] {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Text of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0] {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Tag name of an element
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0] {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replace a node with pre-rendered markup
    pub fn replace_with_markup(&mut self, id: NodeId, markup: String) {
        self.nodes[id.0] = Node::Markup(markup);
    }

    /// Serialize the fragment back to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for &root in &self.roots {
            self.write_node(root, None, &mut out);
        }
        out
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn convert(&mut self, handle: &Handle) -> Option<NodeId> {
        match &handle.data {
            NodeData::Document => None,
            NodeData::Doctype { name, .. } => Some(self.push(Node::Doctype(name.to_string()))),
            NodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                Some(self.push(Node::Text(text)))
            }
            NodeData::Comment { contents } => Some(self.push(Node::Comment(contents.to_string()))),
            NodeData::Element {
                name,
                attrs,
                template_contents,
                ..
            } => {
                let attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| {
                        let local = &attr.name.local;
                        let name = match &attr.name.prefix {
                            Some(prefix) => format!("{prefix}:{local}"),
                            None => local.to_string(),
                        };
                        (name, attr.value.to_string())
                    })
                    .collect();

                // <template> keeps its content in a separate document fragment.
                let sources = match template_contents.borrow().as_ref() {
                    Some(contents) => contents.children.borrow().clone(),
                    None => handle.children.borrow().clone(),
                };
                let children = sources.iter().filter_map(|c| self.convert(c)).collect();

                Some(self.push(Node::Element {
                    name: name.local.to_string(),
                    attrs,
                    children,
                }))
            }
            NodeData::ProcessingInstruction { .. } => None,
        }
    }

    fn write_node(&self, id: NodeId, parent: Option<&str>, out: &mut String) {
        match &self.nodes[id.0] {
            Node::Text(text) => {
                if parent.is_some_and(|p| RAW_TEXT_ELEMENTS.contains(&p)) {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            Node::Markup(markup) => out.push_str(markup),
            Node::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            Node::Doctype(name) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(name);
                out.push('>');
            }
            Node::Element {
                name,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attrs {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&name.as_str()) {
                    return;
                }

                if LEADING_NEWLINE_ELEMENTS.contains(&name.as_str())
                    && children
                        .first()
                        .and_then(|&child| self.text(child))
                        .is_some_and(|text| text.starts_with('\n'))
                {
                    out.push('\n');
                }

                for &child in children {
                    self.write_node(child, Some(name), out);
                }

                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

/// Nodes produced by a fragment parse
///
/// html5ever places the parsed nodes under a synthetic `<html>` element.
fn fragment_children(document: &Handle) -> Vec<Handle> {
    let top = document.children.borrow();
    if let [root] = top.as_slice() {
        if let NodeData::Element { name, .. } = &root.data {
            if &*name.local == "html" {
                return root.children.borrow().clone();
            }
        }
    }
    top.clone()
}

/// Escape text content for HTML output
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(html: &str) -> String {
        Fragment::parse(html).unwrap().to_html()
    }

    #[test]
    fn test_parse_plain_text() {
        let fragment = Fragment::parse("hello world").unwrap();
        assert_eq!(fragment.roots().len(), 1);
        assert_eq!(fragment.text(fragment.roots()[0]), Some("hello world"));
    }

    #[test]
    fn test_parse_nested_elements() {
        let fragment = Fragment::parse("<p>hello <b>big</b> world</p>").unwrap();
        let p = fragment.roots()[0];
        assert_eq!(fragment.element_name(p), Some("p"));

        let children = fragment.children(p);
        assert_eq!(children.len(), 3);
        assert_eq!(fragment.text(children[0]), Some("hello "));
        assert_eq!(fragment.element_name(children[1]), Some("b"));
        assert_eq!(fragment.text(children[2]), Some(" world"));
    }

    #[test]
    fn test_roundtrip() {
        assert_eq!(roundtrip("<b>byebye</b> world"), "<b>byebye</b> world");
        assert_eq!(
            roundtrip(r#"<a href="/x?a=1&amp;b=2" class="link">go</a>"#),
            r#"<a href="/x?a=1&amp;b=2" class="link">go</a>"#
        );
        assert_eq!(roundtrip("line<br>break"), "line<br>break");
        assert_eq!(roundtrip("<!-- note -->text"), "<!-- note -->text");
    }

    #[test]
    fn test_prefixed_attributes_roundtrip() {
        assert_eq!(
            roundtrip(r##"<svg><use xlink:href="#a"></use></svg> hi"##),
            r##"<svg><use xlink:href="#a"></use></svg> hi"##
        );
        assert_eq!(
            roundtrip(r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink"></svg>"#),
            r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink"></svg>"#
        );
    }

    #[test]
    fn test_leading_newline_survives_reparse() {
        let html = "<pre>\n\nindented</pre>";
        let once = roundtrip(html);
        assert_eq!(once, html);
        assert_eq!(roundtrip(&once), html);

        assert_eq!(roundtrip("<textarea>\n\nnote</textarea>"), "<textarea>\n\nnote</textarea>");
        assert_eq!(roundtrip("<pre>\nx</pre>"), "<pre>x</pre>");
    }

    #[test]
    fn test_entities_are_decoded_and_reescaped() {
        let fragment = Fragment::parse("foo &lt; bar &#252;").unwrap();
        assert_eq!(fragment.text(fragment.roots()[0]), Some("foo < bar ü"));
        assert_eq!(fragment.to_html(), "foo &lt; bar ü");
    }

    #[test]
    fn test_script_text_is_not_escaped() {
        assert_eq!(
            roundtrip("<script>if (a < b) {}</script>"),
            "<script>if (a < b) {}</script>"
        );
    }

    #[test]
    fn test_empty_fragment() {
        let fragment = Fragment::parse("").unwrap();
        assert!(fragment.is_empty());
        assert_eq!(fragment.to_html(), "");
    }

    #[test]
    fn test_replace_with_markup() {
        let mut fragment = Fragment::parse("<i>hello</i>").unwrap();
        let text = fragment.children(fragment.roots()[0])[0];
        fragment.replace_with_markup(text, "<ins>hello</ins>".to_string());
        assert_eq!(fragment.to_html(), "<i><ins>hello</ins></i>");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_text("a\u{a0}b"), "a&nbsp;b");
    }
}
