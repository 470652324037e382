//! HTML to Markdown conversion
//!
//! Uses `htmd` with ATX headings. Elements without a textual form are
//! skipped. If conversion fails the visible text is returned instead so a
//! page never disappears because of a converter error.

use htmd::HtmlToMarkdown;
use scraper::Html;

/// Tags with no textual representation
const SKIPPED_TAGS: &[&str] = &["script", "style", "img", "svg", "noscript", "iframe"];

/// Converts an HTML fragment to trimmed Markdown
///
/// Empty or whitespace-only input yields an empty string.
///
/// # Examples
///
/// ```
/// use docs_mirror::content::to_markdown;
///
/// let md = to_markdown("<h1>Title</h1><p>Text</p>");
/// assert!(md.contains("# Title"));
/// assert!(md.contains("Text"));
/// ```
pub fn to_markdown(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let converter = HtmlToMarkdown::builder()
        .skip_tags(SKIPPED_TAGS.to_vec())
        .build();

    match converter.convert(html) {
        Ok(markdown) => markdown.trim().to_string(),
        Err(e) => {
            tracing::warn!("Markdown conversion failed, falling back to plain text: {}", e);
            plain_text(html)
        }
    }
}

/// Visible text of a fragment, one trimmed line per text run
fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
