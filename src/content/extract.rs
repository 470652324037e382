//! Main-content extraction
//!
//! Parses a page, drops every non-content element and serializes the best
//! content region. The parsed tree is never mutated: removal happens while
//! serializing, so the result is a pure function of the input HTML.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Elements that never count as content, removed wherever they appear
pub const REMOVED_TAGS: &[&str] = &[
    "nav", "footer", "header", "aside", "script", "style", "img", "svg",
];

/// Candidate content regions, most specific first
pub const CONTENT_REGIONS: &[&str] = &["main", "article", "body"];

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Extracts the content fragment of a page
///
/// The region is the first `<main>` that survives noise removal, else the
/// first `<article>`, else `<body>`, else the whole document. The returned
/// HTML is that region with every [`REMOVED_TAGS`] element left out.
///
/// # Examples
///
/// ```
/// use docs_mirror::content::extract;
///
/// let html = "<body><nav>Menu</nav><main><h1>Title</h1></main></body>";
/// assert_eq!(extract(html), "<main><h1>Title</h1></main>");
/// ```
pub fn extract(html: &str) -> String {
    let document = Html::parse_document(html);
    let region = select_region(&document);

    let mut out = String::new();
    serialize_element(region, &mut out);
    out
}

/// Picks the content region following [`CONTENT_REGIONS`] order
fn select_region(document: &Html) -> ElementRef<'_> {
    for tag in CONTENT_REGIONS {
        let Ok(selector) = Selector::parse(tag) else {
            continue;
        };

        if let Some(element) = document.select(&selector).find(|el| !inside_removed(*el)) {
            return element;
        }
    }

    document.root_element()
}

fn is_removed_tag(name: &str) -> bool {
    REMOVED_TAGS.contains(&name)
}

/// Whether an element sits inside a removed element
fn inside_removed(element: ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .map(|el| is_removed_tag(el.name()))
            .unwrap_or(false)
    })
}

fn serialize_element(element: ElementRef<'_>, out: &mut String) {
    let value = element.value();
    let name = value.name();

    if is_removed_tag(name) {
        return;
    }

    out.push('<');
    out.push_str(name);
    for (attr, attr_value) in value.attrs() {
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(attr_value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    serialize_element(child_element, out);
                }
            }
            Node::Text(text) => out.push_str(&html_escape::encode_text(&**text)),
            // Comments, doctypes and processing instructions carry no content
            _ => {}
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
