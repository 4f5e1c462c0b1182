//! Text extraction
//!
//! Walks a [`Fragment`] in document order and tokenizes every visible text
//! node. Each token remembers the text node it came from.

use crate::diff::TextFromNode;
use crate::dom::{Fragment, NodeId, RAW_TEXT_ELEMENTS};
use crate::tokenizers::Tokenizer;

/// Elements whose text is not rendered as markup, besides the raw text ones
const OPAQUE_ELEMENTS: &[&str] = &["template", "textarea", "title"];

/// Whether the text below an element must be left alone
fn is_opaque(name: &str) -> bool {
    OPAQUE_ELEMENTS.contains(&name) || RAW_TEXT_ELEMENTS.contains(&name)
}

/// Extract the visible text of a fragment as provenanced tokens
///
/// Consecutive whitespace tokens are merged into the first one, also when
/// they come from different nodes, so the diff never sees two adjacent
/// whitespace tokens.
pub fn extract_text(fragment: &Fragment, tokenizer: &dyn Tokenizer) -> Vec<TextFromNode> {
    let mut fragments = Vec::new();
    for &root in fragment.roots() {
        text_fragments(fragment, root, tokenizer, &mut fragments);
    }
    collapse_whitespace(fragments)
}

fn text_fragments(
    fragment: &Fragment,
    id: NodeId,
    tokenizer: &dyn Tokenizer,
    out: &mut Vec<TextFromNode>,
) {
    if let Some(text) = fragment.text(id) {
        out.extend(
            tokenizer
                .tokenize(text)
                .into_iter()
                .map(|token| TextFromNode::new(token, id)),
        );
        return;
    }

    if fragment.element_name(id).is_some_and(is_opaque) {
        return;
    }

    for &child in fragment.children(id) {
        text_fragments(fragment, child, tokenizer, out);
    }
}

/// Drop every whitespace token that directly follows another one
pub fn collapse_whitespace(tokens: Vec<TextFromNode>) -> Vec<TextFromNode> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut last_was_whitespace = false;

    for token in tokens {
        let whitespace = token.is_whitespace();
        if !(last_was_whitespace && whitespace) {
            result.push(token);
        }
        last_was_whitespace = whitespace;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizers::WordTokenizer;

    fn extract(html: &str) -> (Fragment, Vec<TextFromNode>) {
        let fragment = Fragment::parse(html).unwrap();
        let tokens = extract_text(&fragment, &WordTokenizer::new());
        (fragment, tokens)
    }

    fn texts(tokens: &[TextFromNode]) -> Vec<&str> {
        tokens.iter().map(|t| t.text()).collect()
    }

    #[test]
    fn test_extract_plain_text() {
        let (_, tokens) = extract("hello world");
        assert_eq!(texts(&tokens), vec!["hello", "world"]);
    }

    #[test]
    fn test_tokens_point_at_text_nodes() {
        let (fragment, tokens) = extract("<b>byebye</b> world");
        assert_eq!(texts(&tokens), vec!["byebye", "", "world"]);

        let b = fragment.roots()[0];
        let bold_text = fragment.children(b)[0];
        assert_eq!(tokens[0].node(), bold_text);
        assert_eq!(tokens[1].node(), fragment.roots()[1]);
        assert_eq!(tokens[2].node(), fragment.roots()[1]);
        assert!(tokens.iter().all(|t| fragment.text(t.node()).is_some()));
    }

    #[test]
    fn test_double_space_equals_single_space() {
        let (_, double) = extract("hello  world");
        let (_, single) = extract("hello world");
        assert_eq!(double, single);
    }

    #[test]
    fn test_whitespace_collapses_across_nodes() {
        let (fragment, tokens) = extract("<span>hello </span> <span> world</span>");
        assert_eq!(texts(&tokens), vec!["hello", "", "world"]);

        let first_span_text = fragment.children(fragment.roots()[0])[0];
        assert_eq!(tokens[1].node(), first_span_text);
    }

    #[test]
    fn test_invisible_text_is_skipped() {
        let (_, tokens) = extract("<style>p { color: red }</style>shown<script>var x;</script>");
        assert_eq!(texts(&tokens), vec!["shown"]);
    }

    #[test]
    fn test_raw_text_elements_are_skipped() {
        let (_, tokens) = extract(
            "<xmp>a &amp; b</xmp><iframe>x</iframe><noembed>y</noembed><textarea>z</textarea>kept",
        );
        assert_eq!(texts(&tokens), vec!["kept"]);
    }

    #[test]
    fn test_empty_fragment_has_no_tokens() {
        let (_, tokens) = extract("");
        assert!(tokens.is_empty());
    }
}
