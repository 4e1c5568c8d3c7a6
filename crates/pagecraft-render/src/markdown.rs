// crates/pagecraft-render/src/markdown.rs
use crate::markup::escape;

/// Turns the markdown content of text blocks into HTML.
pub trait MarkdownConverter {
    fn to_html(&self, markdown: &str) -> String;
}

/// No markdown support: blank-line separated paragraphs, escaped, with line
/// breaks kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainText;

impl MarkdownConverter for PlainText {
    fn to_html(&self, markdown: &str) -> String {
        markdown
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .map(|paragraph| {
                let lines: Vec<String> = paragraph.lines().map(escape).collect();
                format!("<p>{}</p>", lines.join("<br>"))
            })
            .collect()
    }
}

/// CommonMark rendering via pulldown-cmark.
#[cfg(feature = "markdown")]
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMark;

#[cfg(feature = "markdown")]
impl MarkdownConverter for CommonMark {
    fn to_html(&self, markdown: &str) -> String {
        use pulldown_cmark::{html, Options, Parser};

        let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out.truncate(out.trim_end().len());
        out
    }
}

/// The best converter this build has.
pub fn default_converter() -> Box<dyn MarkdownConverter> {
    #[cfg(feature = "markdown")]
    {
        Box::new(CommonMark)
    }
    #[cfg(not(feature = "markdown"))]
    {
        Box::new(PlainText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_paragraphs() {
        assert_eq!(
            PlainText.to_html("one\ntwo\n\n<three>"),
            "<p>one<br>two</p><p>&lt;three&gt;</p>"
        );
        assert_eq!(PlainText.to_html(""), "");
    }

    #[cfg(feature = "markdown")]
    #[test]
    fn test_common_mark_inline() {
        assert_eq!(CommonMark.to_html("Hello **world**"), "<p>Hello <strong>world</strong></p>");
    }
}
