//! A documentation + code + preview unit of a sample.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::dialect::Dialect;
use crate::highlight::Highlighter;
use crate::markdown;
use crate::text::{
    anchor, collapse_whitespace, expand_leading_tabs, leading_spaces, normalize_indentation,
};

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const HINT_START: &str = "<!--~";
const HINT_END: &str = "~-->";

// `<label><input><div class="hint">hint</div> element </label>`
const HINT_HTML_OPEN: &str =
    "<label class=\"has-hint\"><input class=\"show-hint\" type=\"checkbox\"><div class=\"hint\">";
const HINT_HTML_CLOSE: &str = "</div>";
const HINT_HTML_END: &str = "</label>";

/// A markdown heading found in a section's documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Anchor ID
    pub id: String,
    /// Heading text
    pub name: String,
}

/// Errors raised while accumulating a section.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    #[error("Only one @filter annotation is allowed per section")]
    MultipleFilterAnnotations,
}

/// One annotated region of a sample: its documentation, its code and the
/// part of the code rendered as a live preview.
#[derive(Debug, Clone)]
pub struct CodeSection {
    dialect: Arc<Dialect>,
    pub(crate) id: usize,
    raw_doc: String,
    code: String,
    pub(crate) preview: String,
    in_body: bool,
    pub(crate) is_first_section: bool,
    pub(crate) is_last_section: bool,
    filters: Option<BTreeSet<String>>,
    hints: Vec<String>,
    pub(crate) story_page_id: String,
    pub(crate) starts_story: bool,
    headings: Vec<Heading>,
    code_offset: Option<usize>,
    current_hint: Option<OpenHint>,
    doc: OnceLock<String>,
    marked_doc: OnceLock<String>,
}

/// A hint whose text is still being collected.
#[derive(Debug, Clone)]
struct OpenHint {
    text: String,
    indent: String,
}

impl CodeSection {
    /// Create an empty section.
    pub fn new(dialect: Arc<Dialect>) -> Self {
        Self {
            dialect,
            id: 0,
            raw_doc: String::new(),
            code: String::new(),
            preview: String::new(),
            in_body: false,
            is_first_section: false,
            is_last_section: true,
            filters: None,
            hints: Vec::new(),
            story_page_id: String::new(),
            starts_story: false,
            headings: Vec::new(),
            code_offset: None,
            current_hint: None,
            doc: OnceLock::new(),
            marked_doc: OnceLock::new(),
        }
    }

    /// Append one line of a documentation comment.
    ///
    /// Comment delimiters are dropped, an `@filter(a, b)` directive is moved
    /// into [`filters`](Self::filters) and markdown headings are recorded.
    pub fn append_doc(&mut self, line: &str) -> Result<(), SectionError> {
        let mut text = line.replace(COMMENT_START, "").replace(COMMENT_END, "");

        while let Some(caps) = self.dialect.filter.captures(&text) {
            if self.filters.is_some() {
                return Err(SectionError::MultipleFilterAnnotations);
            }
            let filters = caps[1]
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
            self.filters = Some(filters);

            let directive = caps.get(0).map_or(0..0, |m| m.range());
            text.replace_range(directive, "");
        }

        if let Some(caps) = self.dialect.heading.captures(&text) {
            let name = caps[1].trim().to_string();
            self.headings.push(Heading {
                id: anchor(&name),
                name,
            });
        }

        self.raw_doc.push_str(&text);
        self.raw_doc.push('\n');
        self.doc = OnceLock::new();
        self.marked_doc = OnceLock::new();
        Ok(())
    }

    /// Append one line of code.
    ///
    /// The first non-blank line fixes the indentation baseline; every line
    /// loses at most that many leading spaces.
    pub fn append_code(&mut self, line: &str) {
        let line = expand_leading_tabs(line);
        let indent = leading_spaces(&line);
        let baseline = match self.code_offset {
            Some(offset) => offset,
            None if !line.trim().is_empty() => {
                self.code_offset = Some(indent);
                indent
            }
            None => indent,
        };
        self.code.push_str(&line[indent.min(baseline)..]);
        self.code.push('\n');
    }

    /// Append one line that lies inside `<body>`.
    pub fn append_preview(&mut self, line: &str) {
        self.preview.push_str(line);
        self.preview.push('\n');
    }

    /// Append one line of a hint block.
    ///
    /// The first line drops a start placeholder into the code so the hint can
    /// be spliced in front of the element it annotates.
    pub fn append_hint(&mut self, line: &str) {
        if self.current_hint.is_none() {
            let expanded = expand_leading_tabs(line);
            let indent = " ".repeat(leading_spaces(&expanded));
            self.append_code(&format!("{}<!--START_HINT_{}-->", indent, self.hints.len()));
            self.current_hint = Some(OpenHint {
                text: String::new(),
                indent,
            });
        }
        if let Some(hint) = self.current_hint.as_mut() {
            hint.text.push_str(line);
            hint.text.push('\n');
        }
    }

    /// Close the hint being collected and mark the end of its element.
    pub fn end_hint(&mut self) {
        let Some(hint) = self.current_hint.take() else {
            return;
        };
        let text = hint.text.replace(HINT_START, "").replace(HINT_END, "");
        self.hints.push(collapse_whitespace(&text));
        self.append_code(&format!("{}<!--END_HINT-->", hint.indent));
    }

    /// Whether a hint was started but not ended.
    pub fn has_open_hint(&self) -> bool {
        self.current_hint.is_some()
    }

    /// The code ready for display: trailing `~` soft-EOF markers removed,
    /// indentation normalized and a bare wrapper `<div>` dropped.
    pub fn code_snippet(&self) -> String {
        let trimmed = self
            .code
            .trim_end()
            .trim_end_matches('~')
            .trim_end()
            .trim_start_matches(['\r', '\n']);
        remove_wrapper_div(normalize_indentation(trimmed, true))
    }

    /// The highlighted code snippet with interactive hints spliced in.
    pub fn escaped_code(&self, highlighter: &Highlighter) -> String {
        let html = highlighter.highlight_with(&self.code_snippet(), Some("html"), |line| {
            self.hint_markup(line)
        });
        self.restore_templates(&html)
    }

    /// The documentation with its indentation normalized.
    pub fn doc(&self) -> &str {
        self.doc
            .get_or_init(|| normalize_indentation(&self.raw_doc, true))
    }

    /// The documentation as accumulated, before normalization.
    pub fn raw_doc(&self) -> &str {
        &self.raw_doc
    }

    /// The documentation rendered as HTML.
    pub fn marked_doc(&self, highlighter: &Highlighter) -> &str {
        self.marked_doc
            .get_or_init(|| markdown::render(self.doc(), Some(highlighter)))
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Position among the sections of the owning document.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn in_body(&self) -> bool {
        self.in_body
    }

    pub fn set_in_body(&mut self, in_body: bool) {
        self.in_body = in_body;
    }

    pub fn is_first_section(&self) -> bool {
        self.is_first_section
    }

    pub fn is_last_section(&self) -> bool {
        self.is_last_section
    }

    /// Formats this section is restricted to, if any.
    pub fn filters(&self) -> Option<&BTreeSet<String>> {
        self.filters.as_ref()
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn story_page_id(&self) -> &str {
        &self.story_page_id
    }

    /// Whether the `<amp-story>` element opens in this section.
    pub fn starts_story(&self) -> bool {
        self.starts_story
    }

    /// The story page ID usable as an identifier.
    pub fn story_page_variable_id(&self) -> String {
        self.story_page_id.replace('-', "")
    }

    pub fn is_empty_code_section(&self) -> bool {
        self.code.trim().is_empty()
    }

    pub fn show_preview(&self) -> bool {
        !self.is_empty_code_section() && self.in_body
    }

    /// Whether both columns collapse: no documentation and code that is
    /// either long or runtime boilerplate.
    pub fn hide_columns(&self) -> bool {
        self.doc().trim().is_empty() && self.should_hide_code()
    }

    pub fn hide_doc_on_mobile(&self) -> bool {
        self.doc().trim().is_empty()
    }

    pub fn hide_code_on_mobile(&self) -> bool {
        self.hide_doc_on_mobile() || self.is_empty_code_section()
    }

    pub fn hide_preview_on_mobile(&self) -> bool {
        self.hide_code_on_mobile() || self.preview.trim().is_empty()
    }

    fn should_hide_code(&self) -> bool {
        let options = self.dialect.options();
        let lines: Vec<&str> = self.code.trim().lines().collect();
        lines.len() > options.hidden_line_threshold
            || lines
                .iter()
                .any(|l| l.trim().starts_with(&options.boilerplate_signature))
    }

    fn hint_markup(&self, line: &str) -> Option<String> {
        if let Some(caps) = self.dialect.hint_start.captures(line) {
            let hint = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.hints.get(index))
                .map_or("", String::as_str);
            return Some(format!("{HINT_HTML_OPEN}{hint}{HINT_HTML_CLOSE}"));
        }
        if self.dialect.hint_end.is_match(line) {
            return Some(HINT_HTML_END.to_string());
        }
        None
    }

    /// Turn `[[ name ]]` tokens split up by highlighting back into plain text.
    fn restore_templates(&self, html: &str) -> String {
        self.dialect
            .encoded_template
            .replace_all(html, |caps: &regex::Captures| {
                let inner = self.dialect.markup.replace_all(&caps[1], "");
                format!("[[{}]]", collapse_whitespace(&inner))
            })
            .into_owned()
    }
}

impl Serialize for CodeSection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CodeSection", 12)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("doc", self.doc())?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("preview", &self.preview)?;
        state.serialize_field("in_body", &self.in_body)?;
        state.serialize_field("is_first_section", &self.is_first_section)?;
        state.serialize_field("is_last_section", &self.is_last_section)?;
        state.serialize_field("filters", &self.filters)?;
        state.serialize_field("hints", &self.hints)?;
        state.serialize_field("story_page_id", &self.story_page_id)?;
        state.serialize_field("starts_story", &self.starts_story)?;
        state.serialize_field("headings", &self.headings)?;
        state.end()
    }
}

/// Drop a `<div>` that only wraps the snippet.
///
/// The div counts as a wrapper when its content is not indented deeper
/// than the div itself.
fn remove_wrapper_div(snippet: String) -> String {
    let lines: Vec<&str> = snippet.lines().collect();
    if lines.len() < 2 {
        return snippet;
    }
    let first = lines[0];
    let last = lines[lines.len() - 1];
    if first.trim() != "<div>" || last.trim() != "</div>" {
        return snippet;
    }

    let inner = &lines[1..lines.len() - 1];
    let inner_indent = inner
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_spaces(l))
        .min()
        .unwrap_or(0);
    if inner_indent > leading_spaces(first) {
        return snippet;
    }
    inner.join("\n")
}
