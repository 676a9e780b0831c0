//! Markdown rendering for section documentation.

use pulldown_cmark::{html, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::highlight::Highlighter;
use crate::text::{anchor, escape_html};

const HEADING_CLASS: &str = "www-heading pb4 mb2 relative h3";
const PARAGRAPH_OPEN: &str = "<p class=\"mb2 px1\">";

/// Render markdown to HTML with anchored headings and styled paragraphs.
///
/// Fenced code is highlighted when a highlighter is given and escaped otherwise.
pub fn render(source: &str, highlighter: Option<&Highlighter>) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let mut events: Vec<Event> = Vec::new();
    let mut heading: Option<(HeadingLevel, Vec<Event>)> = None;
    let mut code: Option<(Option<String>, String)> = None;

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((level, Vec::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, inner)) = heading.take() {
                    events.push(Event::Html(heading_html(level, inner).into()));
                }
            }
            Event::Start(Tag::Paragraph) => events.push(Event::Html(PARAGRAPH_OPEN.into())),
            Event::End(TagEnd::Paragraph) => events.push(Event::Html("</p>\n".into())),
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|l| l.to_string()),
                    CodeBlockKind::Indented => None,
                };
                code = Some((lang, String::new()));
            }
            Event::Text(text) if code.is_some() => {
                if let Some((_, buffer)) = code.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, buffer)) = code.take() {
                    events.push(Event::Html(code_html(lang.as_deref(), &buffer, highlighter).into()));
                }
            }
            other => match heading.as_mut() {
                Some((_, inner)) => inner.push(other),
                None => events.push(other),
            },
        }
    }

    let mut output = String::with_capacity(source.len() * 2);
    html::push_html(&mut output, events.into_iter());
    output
}

fn heading_html(level: HeadingLevel, inner: Vec<Event>) -> String {
    let text: String = inner
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
            _ => None,
        })
        .collect();

    let mut content = String::new();
    html::push_html(&mut content, inner.into_iter());

    format!(
        "<{level} id=\"{}\" class=\"{HEADING_CLASS}\">{content}</{level}>\n",
        anchor(&text)
    )
}

fn code_html(lang: Option<&str>, code: &str, highlighter: Option<&Highlighter>) -> String {
    let body = match (highlighter, lang) {
        (Some(h), Some(l)) => h.highlight(code, Some(l)),
        _ => escape_html(code),
    };
    match lang {
        Some(l) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            escape_html(l),
            body
        ),
        None => format!("<pre><code>{}</code></pre>\n", body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn anchors_headings() {
        let html = render("## Hello World", None);
        assert_eq!(
            html,
            "<h2 id=\"hello-world\" class=\"www-heading pb4 mb2 relative h3\">Hello World</h2>\n"
        );
    }

    #[test]
    fn styles_paragraphs() {
        let html = render("Hello *world*.", None);
        assert_eq!(html, "<p class=\"mb2 px1\">Hello <em>world</em>.</p>\n");
    }

    #[test]
    fn keeps_inline_markup_in_headings() {
        let html = render("# The `amp-img` tag", None);
        assert!(html.contains("id=\"the-amp-img-tag\""));
        assert!(html.contains("<code>amp-img</code>"));
    }

    #[test]
    fn escapes_code_without_highlighter() {
        let html = render("```html\n<p>x</p>\n```", None);
        assert_eq!(
            html,
            "<pre><code class=\"language-html\">&lt;p&gt;x&lt;/p&gt;\n</code></pre>\n"
        );
    }

    #[test]
    fn highlights_code() {
        let highlighter = Highlighter::new();
        let html = render("```html\n<p>x</p>\n```", Some(&highlighter));
        assert!(html.contains("hljs-"));
    }
}
