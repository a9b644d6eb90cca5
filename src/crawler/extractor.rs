//! Title and main-text extraction
//!
//! Strips non-content subtrees from a parsed page and produces the bounded
//! text that feeds summarization.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{Html, Selector};

/// Fallback title for pages without a usable `<title>`
pub const UNTITLED: &str = "Без заголовка";

/// Hard cap on extracted main text, in characters
pub const MAIN_TEXT_CAP: usize = 4096;

/// Tags whose entire subtree is excluded from main text
const SKIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "aside"];

/// Extracts the page title, trimmed, falling back to [`UNTITLED`]
pub fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return UNTITLED.to_string();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Extracts the visible main text of a page
///
/// Subtrees under script/style/nav/footer/header/aside are removed, the
/// remaining text nodes are trimmed and joined with single spaces, and the
/// result is cut at [`MAIN_TEXT_CAP`] characters. The cut is a hard char
/// cap, not sentence-aware.
pub fn extract_main_text(document: &Html) -> String {
    let mut parts: Vec<String> = Vec::new();
    collect_text(document.tree.root(), &mut parts);

    let text = parts.join(" ");
    if text.chars().count() > MAIN_TEXT_CAP {
        text.chars().take(MAIN_TEXT_CAP).collect()
    } else {
        text
    }
}

/// Walks the node tree, skipping excluded subtrees entirely
fn collect_text(node: NodeRef<'_, Node>, parts: &mut Vec<String>) {
    if let Node::Element(element) = node.value() {
        if SKIPPED_TAGS.contains(&element.name()) {
            return;
        }
    }

    if let Node::Text(text) = node.value() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
        return;
    }

    for child in node.children() {
        collect_text(child, parts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_extract_title() {
        let doc = parse("<html><head><title>  Главная  </title></head><body></body></html>");
        assert_eq!(extract_title(&doc), "Главная");
    }

    #[test]
    fn test_missing_title_falls_back() {
        let doc = parse("<html><head></head><body></body></html>");
        assert_eq!(extract_title(&doc), UNTITLED);
    }

    #[test]
    fn test_empty_title_falls_back() {
        let doc = parse("<html><head><title>   </title></head><body></body></html>");
        assert_eq!(extract_title(&doc), UNTITLED);
    }

    #[test]
    fn test_main_text_joins_with_single_spaces() {
        let doc = parse("<html><body><p>Hello</p><p>world</p></body></html>");
        assert_eq!(extract_main_text(&doc), "Hello world");
    }

    #[test]
    fn test_skipped_tags_are_excluded() {
        let doc = parse(
            r#"<html><body>
                <script>var x = "SCRIPT";</script>
                <style>.c { color: red; }</style>
                <nav>NAVTEXT</nav>
                <header>HEADTEXT</header>
                <footer>FOOTTEXT</footer>
                <aside>ASIDETEXT</aside>
                <p>Visible content</p>
            </body></html>"#,
        );
        let text = extract_main_text(&doc);
        assert_eq!(text, "Visible content");
        for hidden in ["SCRIPT", "NAVTEXT", "HEADTEXT", "FOOTTEXT", "ASIDETEXT", "color"] {
            assert!(!text.contains(hidden), "leaked text from skipped tag: {}", hidden);
        }
    }

    #[test]
    fn test_nested_content_inside_skipped_tag_is_excluded() {
        let doc = parse("<html><body><nav><div><a href=\"/x\">Menu item</a></div></nav><p>Body</p></body></html>");
        assert_eq!(extract_main_text(&doc), "Body");
    }

    #[test]
    fn test_main_text_is_capped() {
        let long = "слово ".repeat(2000);
        let doc = parse(&format!("<html><body><p>{}</p></body></html>", long));
        let text = extract_main_text(&doc);
        assert_eq!(text.chars().count(), MAIN_TEXT_CAP);
    }

    #[test]
    fn test_cap_respects_char_boundaries() {
        // Cyrillic text: a byte-based cut would split a UTF-8 sequence
        let long = "я".repeat(MAIN_TEXT_CAP + 100);
        let doc = parse(&format!("<html><body>{}</body></html>", long));
        let text = extract_main_text(&doc);
        assert_eq!(text.chars().count(), MAIN_TEXT_CAP);
        assert!(text.chars().all(|c| c == 'я'));
    }
}
