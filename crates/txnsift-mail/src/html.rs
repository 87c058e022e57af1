//! Visible-text extraction from untrusted HTML email bodies
//!
//! Alert emails frequently carry their useful text inside an HTML body
//! padded with hidden preheader spans, tracking pixels, and disclaimers
//! styled `display: none`. Extraction walks the parsed body and keeps only
//! text a recipient would actually see. Parsing is html5ever via `scraper`:
//! no script execution, no remote fetches.

use scraper::{ElementRef, Html, Selector};

/// Elements whose text content is never user-visible
const SKIPPED_ELEMENTS: [&str; 5] = ["script", "style", "head", "title", "noscript"];

/// Extract the visible text content of an HTML document's body
///
/// Returns the empty string when the document has no `<body>` element.
/// Any element hidden via an inline `display: none` contributes nothing,
/// including its entire subtree. Output is raw concatenated text; callers
/// run it through the normalizer afterwards.
pub fn html_to_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    // Selector literal is valid, parse cannot fail
    let body_selector = Selector::parse("body").unwrap();
    let Some(body) = doc.select(&body_selector).next() else {
        return String::new();
    };

    let mut out = String::new();
    collect_visible_text(body, &mut out);
    out
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    if is_hidden(element) || is_skipped(element) {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_visible_text(child_element, out);
        }
    }
}

/// Whether the element's inline style hides it
///
/// Matches `display:none` with any spacing and casing, e.g.
/// `style="DISPLAY: NONE; max-height: 0"`.
fn is_hidden(element: ElementRef<'_>) -> bool {
    let Some(style) = element.value().attr("style") else {
        return false;
    };
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.contains("display:none")
}

fn is_skipped(element: ElementRef<'_>) -> bool {
    let name = element.value().name();
    SKIPPED_ELEMENTS
        .iter()
        .any(|skipped| name.eq_ignore_ascii_case(skipped))
}
