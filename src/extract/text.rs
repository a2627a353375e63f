// src/extract/text.rs
// =============================================================================
// Visible text extraction and tokenization.
//
// Both the duplicate classifier (phrase profiles) and the run analytics (word
// counts, vocabulary) work on the same token stream: the text a reader would
// see, lowercased and split on whitespace.
//
// Text inside script, style, noscript, template and head is skipped. Every
// other text node counts, whether it sits in a paragraph, a heading, a span
// or a bare div. Inline markup joins its pieces directly, so "Hel<b>lo</b>"
// stays one word; a block-level boundary puts a space between them.
// =============================================================================

use crate::page::PageRecord;
use scraper::{Html, Node};

// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

// Elements that start a new run of text
const BLOCK_ELEMENTS: &[&str] = &[
    "html", "body", "address", "article", "aside", "blockquote", "br", "dd", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody",
    "td", "tfoot", "th", "thead", "tr", "ul",
];

fn is_named(node: &Node, names: &[&str]) -> bool {
    node.as_element()
        .is_some_and(|element| names.contains(&element.name()))
}

/// Visible text of an HTML document
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    // Nearest block ancestor of the last text node written
    let mut last_block = None;
    // A block element (or <br>) opened since the last text node
    let mut boundary = false;

    for node in document.tree.root().descendants() {
        let chunk = match node.value() {
            Node::Text(chunk) => chunk,
            other => {
                if is_named(other, BLOCK_ELEMENTS) {
                    boundary = true;
                }
                continue;
            }
        };

        if node.ancestors().any(|ancestor| is_named(ancestor.value(), HIDDEN_ELEMENTS)) {
            continue;
        }

        let block = node
            .ancestors()
            .find(|ancestor| is_named(ancestor.value(), BLOCK_ELEMENTS))
            .map(|ancestor| ancestor.id());

        // "<p>a</p><p>b</p>" must not become "ab"
        if !text.is_empty() && (boundary || block != last_block) {
            text.push(' ');
        }
        text.push_str(chunk);

        last_block = block;
        boundary = false;
    }

    text
}

/// Lowercased whitespace-separated tokens of some text
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(|word| word.to_lowercase()).collect()
}

/// Tokens of a page's visible text, or `None` when the page has no content
pub fn page_tokens(page: &PageRecord) -> Option<Vec<String>> {
    let body = page.body()?;
    let html = String::from_utf8_lossy(body);
    Some(tokenize(&visible_text(&html)))
}
