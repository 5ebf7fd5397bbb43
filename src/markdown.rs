//! Markdown Preview
//!
//! Renders page descriptions for the editor preview pane using
//! pulldown-cmark with the extensions the CMS supports.

use pulldown_cmark::{html::push_html, Options, Parser};

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Parse markdown to an HTML fragment.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let mut html_output = String::new();
    push_html(&mut html_output, parser);
    html_output
}

/// Parse markdown for inline use (strips the outer <p> tags).
pub fn render_markdown_inline(text: &str) -> String {
    let html = render_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading_and_list() {
        let html = render_markdown("# Filings\n\n- motion\n- brief\n");
        assert!(html.contains("<h1>Filings</h1>"));
        assert!(html.contains("<li>motion</li>"));
    }

    #[test]
    fn test_render_strikethrough_extension() {
        let html = render_markdown("~~withdrawn~~");
        assert!(html.contains("<del>withdrawn</del>"));
    }

    #[test]
    fn test_inline_strips_outer_paragraph() {
        assert_eq!(render_markdown_inline("plain *text*"), "plain <em>text</em>");
    }
}
