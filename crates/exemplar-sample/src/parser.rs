//! Annotated HTML sample parser.
//!
//! A single pass over pretty-printed lines. Documentation comments open
//! sections, and a section spans the element following its comment.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classify::{attribute, tag_value, title, LineClassifier};
use crate::dialect::Dialect;
use crate::document::{AmpVariant, Document};
use crate::metadata::{parse_metadata, strip_markers};
use crate::section::{CodeSection, SectionError};
use crate::sorting::ElementSorting;

const COMMENT_START: &str = "<!--";
const METADATA_START: &str = "<!---";
const HINT_START: &str = "<!--~";
const COMMENT_END: &str = "-->";
const METADATA_END: &str = "--->";
const HINT_END: &str = "~-->";

const RUNTIME_SCRIPT: &str = "https://cdn.ampproject.org/v0.js";
const ADS_RUNTIME_SCRIPT: &str = "https://cdn.ampproject.org/amp4ads-v0.js";
const ADS_BOILERPLATE: &str = "<style amp4ads-boilerplate>body{visibility:hidden}</style>";
const EMAIL_BOILERPLATE: &str = "<style amp4email-boilerplate>body{visibility:hidden}</style>";
const LEGACY_STORY_SCRIPT: &str = "amp-story-0.1.js";
const STORY_SCRIPT: &str = "amp-story-1.0.js";

/// Errors that fail the parse of a sample.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid metadata in {} at line {line}: {message}", display_path(.path))]
    MetadataSyntax {
        path: Option<PathBuf>,
        line: usize,
        message: String,
    },

    #[error("Unknown filter '{filter}' in {}", display_path(.path))]
    FilterValidation {
        path: Option<PathBuf>,
        filter: String,
    },

    #[error("Multiple @filter annotations in one section of {}", display_path(.path))]
    MultipleFilterAnnotations { path: Option<PathBuf> },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "<input>".to_string(), |p| p.display().to_string())
}

/// What the current line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    DocComment,
    Metadata,
    Hint,
}

/// Where in the HTML document the scan is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Outside,
    Head,
    CustomStyles,
    Body,
    AfterBody,
}

/// Follows one element from its opening line to its closing line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Tracker {
    Idle,
    /// Waiting for the first code line to name the element
    Pending,
    Active {
        tag: String,
        depth: usize,
        void: bool,
    },
}

/// Tag opened on `line`, including a bare `<name` whose attributes wrap.
fn opened_tag<'a>(classifier: &dyn LineClassifier, line: &'a str) -> Option<&'a str> {
    classifier
        .open_tag(line)
        .or_else(|| classifier.wrapped_tag(line))
}

impl Tracker {
    /// Feed one code line. Returns true when the tracked element ends on it.
    fn feed(&mut self, line: &str, classifier: &dyn LineClassifier) -> bool {
        match self {
            Tracker::Idle => false,
            Tracker::Pending => {
                if line.trim().is_empty() {
                    return false;
                }
                if classifier.is_single_line(line) {
                    *self = Tracker::Idle;
                    return true;
                }
                match opened_tag(classifier, line) {
                    Some(tag) => {
                        *self = Tracker::Active {
                            tag: tag.to_string(),
                            depth: 0,
                            void: classifier.is_void(tag),
                        };
                        self.feed(line, classifier)
                    }
                    None => {
                        *self = Tracker::Idle;
                        false
                    }
                }
            }
            Tracker::Active { tag, depth, void } => {
                let done = if classifier.is_single_line(line) {
                    true
                } else if *void {
                    line.trim_end().ends_with('>')
                } else {
                    if opened_tag(classifier, line) == Some(tag.as_str()) {
                        *depth += 1;
                    }
                    let closed = classifier.close_tag(line) == Some(tag.as_str());
                    if closed {
                        *depth = depth.saturating_sub(1);
                    }
                    closed && *depth == 0
                };
                if done {
                    *self = Tracker::Idle;
                }
                done
            }
        }
    }
}

/// Parses annotated HTML samples into [`Document`]s.
#[derive(Clone)]
pub struct DocumentParser {
    dialect: Arc<Dialect>,
    classifier: Arc<dyn LineClassifier>,
}

impl DocumentParser {
    /// Create a parser classifying lines with the dialect's tag scanner.
    pub fn new(dialect: Arc<Dialect>) -> Self {
        let classifier = Arc::new(dialect.scanner().clone());
        Self {
            dialect,
            classifier,
        }
    }

    /// Replace the line classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn LineClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn dialect(&self) -> &Arc<Dialect> {
        &self.dialect
    }

    /// Split `input` into sections. `path` only shows up in errors.
    pub fn parse(&self, input: &str, path: Option<&Path>) -> Result<Document, ParseError> {
        let mut scan = Scan::new(self, path);
        for (index, line) in input.lines().enumerate() {
            scan.line(index + 1, line)?;
        }
        scan.finish()
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new(Dialect::shared())
    }
}

impl std::fmt::Debug for DocumentParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentParser")
            .field("dialect", &self.dialect)
            .finish_non_exhaustive()
    }
}

/// Parse a sample with the default dialect and move the elements that
/// belong after `<body>` out of the previews.
pub fn parse_sample(input: &str, path: Option<&Path>) -> Result<Document, ParseError> {
    let mut document = DocumentParser::default().parse(input, path)?;
    ElementSorting::apply(&mut document);
    Ok(document)
}

/// State of a single parse.
struct Scan<'p> {
    dialect: &'p Arc<Dialect>,
    classifier: &'p dyn LineClassifier,
    path: Option<PathBuf>,
    document: Document,
    section: Option<CodeSection>,
    mode: Mode,
    region: Region,
    section_tag: Tracker,
    hint_tag: Tracker,
    metadata: String,
    /// `<body` tag whose attributes continue on the next lines
    pending_body: Option<String>,
    /// Same for `<html`
    pending_html: Option<String>,
    in_story: bool,
    story_page_pending: bool,
}

impl<'p> Scan<'p> {
    fn new(parser: &'p DocumentParser, path: Option<&Path>) -> Self {
        Self {
            dialect: &parser.dialect,
            classifier: parser.classifier.as_ref(),
            path: path.map(Path::to_path_buf),
            document: Document::new(parser.dialect.clone()),
            section: None,
            mode: Mode::Code,
            region: Region::Outside,
            section_tag: Tracker::Idle,
            hint_tag: Tracker::Idle,
            metadata: String::new(),
            pending_body: None,
            pending_html: None,
            in_story: false,
            story_page_pending: false,
        }
    }

    fn line(&mut self, number: usize, line: &str) -> Result<(), ParseError> {
        let trimmed = line.trim();

        if self.mode == Mode::Code && trimmed.starts_with(COMMENT_START) {
            if trimmed.starts_with(METADATA_START) {
                self.mode = Mode::Metadata;
                self.metadata.clear();
            } else if trimmed.starts_with(HINT_START) {
                self.mode = Mode::Hint;
            } else {
                self.finish_section()?;
                self.section = Some(self.new_section());
                self.mode = Mode::DocComment;
            }
        }

        match self.mode {
            Mode::DocComment => {
                if let Err(SectionError::MultipleFilterAnnotations) =
                    self.active_section().append_doc(line)
                {
                    return Err(ParseError::MultipleFilterAnnotations {
                        path: self.path.clone(),
                    });
                }
            }
            Mode::Metadata => {
                self.metadata.push_str(&strip_markers(line));
                self.metadata.push('\n');
            }
            Mode::Hint => self.active_section().append_hint(line),
            Mode::Code => self.code_line(line)?,
        }

        if trimmed.ends_with(COMMENT_END) {
            self.close_block(number, trimmed)?;
        }
        Ok(())
    }

    fn close_block(&mut self, number: usize, trimmed: &str) -> Result<(), ParseError> {
        match self.mode {
            Mode::Metadata if trimmed.ends_with(METADATA_END) => {
                self.mode = Mode::Code;
                let metadata =
                    parse_metadata(&self.metadata).map_err(|e| ParseError::MetadataSyntax {
                        path: self.path.clone(),
                        line: number,
                        message: e.to_string(),
                    })?;
                self.document.set_metadata(metadata);
                // a comment followed by metadata documents nothing
                if self.section_tag == Tracker::Pending {
                    self.section_tag = Tracker::Idle;
                }
            }
            Mode::Hint if trimmed.ends_with(HINT_END) => {
                self.mode = Mode::Code;
                self.hint_tag = Tracker::Pending;
            }
            Mode::DocComment => {
                self.mode = Mode::Code;
                self.section_tag = Tracker::Pending;
            }
            _ => {}
        }
        Ok(())
    }

    fn code_line(&mut self, line: &str) -> Result<(), ParseError> {
        let classifier = self.classifier;
        let open = opened_tag(classifier, line);
        let close = classifier.close_tag(line);

        if self.update_body(line, open, close)? {
            self.active_section().append_preview(line);
        }
        self.active_section().append_code(line);
        self.update_head(line, open, close);
        self.update_html(line, open);
        self.update_story(line, open);

        if self.hint_tag.feed(line, classifier) {
            if let Some(section) = self.section.as_mut() {
                section.end_hint();
            }
        }
        if self.section_tag.feed(line, classifier) {
            self.finish_section()?;
        }
        Ok(())
    }

    /// Track `<body>`. Returns whether the line belongs in the preview.
    fn update_body(
        &mut self,
        line: &str,
        open: Option<&str>,
        close: Option<&str>,
    ) -> Result<bool, ParseError> {
        let trimmed = line.trim();

        if let Some(mut body) = self.pending_body.take() {
            body.push(' ');
            body.push_str(trimmed);
            match body.find('>') {
                Some(end) => self.document.body = body[..=end].to_string(),
                None => self.pending_body = Some(body),
            }
            return Ok(false);
        }

        if open == Some("body") {
            self.region = Region::Body;
            match tag_value(line, "body") {
                Some(tag) => self.document.body = tag.to_string(),
                None => self.pending_body = Some(trimmed.to_string()),
            }
            return Ok(false);
        }

        if self.region != Region::Body {
            return Ok(false);
        }
        if close == Some("body") {
            // `</body>` starts a section of its own
            self.finish_section()?;
            self.region = Region::AfterBody;
            return Ok(false);
        }
        Ok(true)
    }

    fn update_head(&mut self, line: &str, open: Option<&str>, close: Option<&str>) {
        match self.region {
            Region::Outside => {
                if open == Some("head") {
                    self.region = Region::Head;
                }
            }
            Region::Head => {
                if close == Some("head") {
                    self.region = Region::Outside;
                    return;
                }
                if self.document.title.is_empty() {
                    if let Some(text) = title(line) {
                        self.document.title = text.to_string();
                    }
                }
                if let Some(start) = line.find("<style amp-custom") {
                    match inline_style(&line[start..]) {
                        Some(styles) if !styles.trim().is_empty() => {
                            self.document.append_styles(styles.trim())
                        }
                        Some(_) => {}
                        None => {
                            let opening = &line[start..];
                            let rules = opening.find('>').map_or("", |end| &opening[end + 1..]);
                            if !rules.trim().is_empty() {
                                self.document.append_styles(rules.trim());
                            }
                            self.region = Region::CustomStyles;
                        }
                    }
                    return;
                }
                self.document.append_head(line);
            }
            Region::CustomStyles => {
                if close == Some("style") {
                    self.region = Region::Head;
                } else {
                    self.document.append_styles(line);
                }
            }
            Region::Body | Region::AfterBody => {}
        }
    }

    fn update_html(&mut self, line: &str, open: Option<&str>) {
        let trimmed = line.trim();
        let mut html = match self.pending_html.take() {
            Some(mut html) => {
                html.push(' ');
                html.push_str(trimmed);
                html
            }
            None if open == Some("html") => trimmed.to_string(),
            None => return,
        };

        let Some(end) = html.find('>') else {
            self.pending_html = Some(html);
            return;
        };
        html.truncate(end + 1);

        self.document.variant = if html.contains("4ads") {
            AmpVariant::Ads
        } else if html.contains("4email") {
            AmpVariant::Email
        } else {
            AmpVariant::Web
        };
        if let Some(lang) = attribute(&html, "lang") {
            self.document.lang = lang.to_string();
        }
    }

    fn update_story(&mut self, line: &str, open: Option<&str>) {
        if self.story_page_pending {
            if let Some(id) = attribute(line, "id") {
                self.active_section().story_page_id = id.to_string();
                self.story_page_pending = false;
            } else if line.contains('>') {
                self.story_page_pending = false;
            }
            return;
        }

        match open {
            Some("amp-story") => {
                self.in_story = true;
                if self.document.variant == AmpVariant::Web {
                    self.document.variant = AmpVariant::Story;
                }
                self.active_section().starts_story = true;
            }
            Some("amp-story-page") if self.in_story => match attribute(line, "id") {
                Some(id) => self.active_section().story_page_id = id.to_string(),
                None => self.story_page_pending = tag_value(line, "amp-story-page").is_none(),
            },
            _ => {}
        }
    }

    fn new_section(&self) -> CodeSection {
        open_section(self.dialect, self.region)
    }

    /// The open section, created on first use.
    fn active_section(&mut self) -> &mut CodeSection {
        let (dialect, region) = (self.dialect, self.region);
        self.section
            .get_or_insert_with(|| open_section(dialect, region))
    }

    fn finish_section(&mut self) -> Result<(), ParseError> {
        self.section_tag = Tracker::Idle;
        self.hint_tag = Tracker::Idle;

        let Some(mut section) = self.section.take() else {
            return Ok(());
        };
        if section.has_open_hint() {
            section.end_hint();
        }

        if let Some(filters) = section.filters() {
            let formats = self.document.formats();
            if let Some(filter) = filters.iter().find(|f| !formats.contains(f)) {
                return Err(ParseError::FilterValidation {
                    path: self.path.clone(),
                    filter: filter.clone(),
                });
            }
        }

        tracing::debug!(
            "Section {} finished ({} code lines)",
            self.document.sections().len(),
            section.code().lines().count()
        );
        self.document.add_section(section);
        Ok(())
    }

    fn finish(mut self) -> Result<Document, ParseError> {
        if self.mode == Mode::Metadata {
            tracing::warn!(
                "Unterminated metadata block in {}, ignoring it",
                display_path(&self.path)
            );
        }
        self.finish_section()?;
        self.fix_head();
        Ok(self.document)
    }

    /// Point the head at the runtime of the document's variant.
    fn fix_head(&mut self) {
        let head = &self.document.head;
        let fixed = match self.document.variant {
            AmpVariant::Web => return,
            AmpVariant::Ads => self
                .dialect
                .web_boilerplate
                .replace_all(&head.replace(RUNTIME_SCRIPT, ADS_RUNTIME_SCRIPT), ADS_BOILERPLATE)
                .into_owned(),
            AmpVariant::Email => self
                .dialect
                .web_boilerplate
                .replace_all(head, EMAIL_BOILERPLATE)
                .into_owned(),
            AmpVariant::Story => head.replace(LEGACY_STORY_SCRIPT, STORY_SCRIPT),
        };
        self.document.head = fixed;
    }
}

fn open_section(dialect: &Arc<Dialect>, region: Region) -> CodeSection {
    let mut section = CodeSection::new(dialect.clone());
    section.set_in_body(region == Region::Body);
    section
}

/// Content of a `<style amp-custom>` opened on `line`, when it also closes
/// there.
fn inline_style(line: &str) -> Option<&str> {
    let start = line.find('>')? + 1;
    let end = line[start..].find("</style>")? + start;
    Some(&line[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(lines: &[&str]) -> Document {
        DocumentParser::default()
            .parse(&lines.join("\n"), None)
            .unwrap()
    }

    fn codes(document: &Document) -> Vec<&str> {
        document.sections().iter().map(|s| s.code()).collect()
    }

    #[test]
    fn tracker_counts_nested_tags() {
        let scanner = Dialect::default().scanner().clone();
        let mut tracker = Tracker::Pending;
        assert!(!tracker.feed("", &scanner));
        assert!(!tracker.feed("<div>", &scanner));
        assert!(!tracker.feed("  <div>x</div>", &scanner));
        assert!(tracker.feed("</div>", &scanner));
        assert_eq!(tracker, Tracker::Idle);
    }

    #[test]
    fn tracker_ends_void_elements() {
        let scanner = Dialect::default().scanner().clone();
        let mut tracker = Tracker::Pending;
        assert!(!tracker.feed("<img src=\"a.png\"", &scanner));
        assert!(tracker.feed("  alt=\"a\">", &scanner));
    }

    #[test]
    fn tracker_idles_without_tag() {
        let scanner = Dialect::default().scanner().clone();
        let mut tracker = Tracker::Pending;
        assert!(!tracker.feed("plain text", &scanner));
        assert_eq!(tracker, Tracker::Idle);
    }

    #[test]
    fn adds_code() {
        let document = parse(&["<h1>hello</h1>"]);
        assert_eq!(codes(&document), vec!["<h1>hello</h1>\n"]);
        assert!(document.sections()[0].is_first_section());
        assert!(document.sections()[0].is_last_section());
    }

    #[test]
    fn adds_comments() {
        let document = parse(&["<!--comment-->", "<h1>hello</h1>"]);
        assert_eq!(document.sections().len(), 1);
        assert_eq!(document.sections()[0].doc(), "comment\n");
        assert_eq!(document.sections()[0].code(), "<h1>hello</h1>\n");
    }

    #[test]
    fn adds_hints() {
        let document = parse(&["<!--~hint~-->", "<h1>hello</h1>"]);
        let section = &document.sections()[0];
        assert_eq!(
            section.code(),
            "<!--START_HINT_0-->\n<h1>hello</h1>\n<!--END_HINT-->\n"
        );
        assert_eq!(section.hints(), &["hint".to_string()]);
        assert_eq!(section.doc(), "");
    }

    #[test]
    fn hint_keeps_section_open() {
        let document = parse(&[
            "<!--doc-->",
            "<div>",
            "  <!--~hint~-->",
            "  <p>a</p>",
            "  <p>b</p>",
            "</div>",
            "<p>c</p>",
        ]);
        assert_eq!(document.sections().len(), 2);
        assert_eq!(
            document.sections()[0].code(),
            "<div>\n  <!--START_HINT_0-->\n  <p>a</p>\n  <!--END_HINT-->\n  <p>b</p>\n</div>\n"
        );
    }

    #[test]
    fn resolves_body_tag() {
        assert_eq!(parse(&["something"]).body, "");
        assert_eq!(parse(&["<body>"]).body, "<body>");
        assert_eq!(
            parse(&["<body attr=\"hello\" attr2=\"world\">"]).body,
            "<body attr=\"hello\" attr2=\"world\">"
        );
        assert_eq!(
            parse(&["<body", "    class=\"x\">", "<p>a</p>"]).body,
            "<body class=\"x\">"
        );
    }

    #[test]
    fn captures_inline_custom_styles() {
        let document = parse(&[
            "<head>",
            "  <style amp-custom>h1 { color: red; }</style>",
            "  <style amp-custom>",
            "    p { margin: 0; }",
            "  </style>",
            "  <meta charset=\"utf-8\">",
            "</head>",
        ]);
        assert_eq!(document.styles, "h1 { color: red; }\n    p { margin: 0; }\n");
        assert_eq!(document.head, "  <meta charset=\"utf-8\">\n");
    }

    #[test]
    fn keeps_rules_on_opening_style_line() {
        let document = parse(&[
            "<head>",
            "  <style amp-custom>h1 { color: red; }",
            "    p { margin: 0; }",
            "  </style>",
            "</head>",
        ]);
        assert_eq!(document.styles, "h1 { color: red; }\n    p { margin: 0; }\n");
        assert_eq!(document.head, "");
    }

    #[test]
    fn reads_variant_from_wrapped_html_tag() {
        let document = parse(&[
            "<html lang=\"en\"",
            "    ⚡4email>",
            "<head>",
            "  <style amp-boilerplate>body{-webkit-animation:none}</style>",
            "</head>",
            "<body>",
            "</body>",
        ]);
        assert_eq!(document.lang, "en");
        assert!(document.is_amp_email());
        assert!(!document.is_amp_web());
        assert_eq!(document.formats(), vec!["email".to_string()]);
        assert!(document.head.contains("amp4email-boilerplate"));

        let document = parse(&["<html", "    ⚡4ads", "    lang=\"de\">", "<body>"]);
        assert!(document.is_amp_ads());
        assert_eq!(document.lang, "de");
    }

    #[test]
    fn wrapped_element_ends_its_section() {
        let document = parse(&["<!--c-->", "<h1", "    class=\"t\">", "  hi", "</h1>", "<p>next</p>"]);
        assert_eq!(codes(&document), vec!["<h1\n    class=\"t\">\n  hi\n</h1>\n", "<p>next</p>\n"]);
    }

    #[test]
    fn reads_wrapped_html_tag() {
        let document = parse(&["<html ⚡4email", "    lang=\"fr\">"]);
        assert_eq!(document.lang, "fr");
        assert!(document.is_amp_email());
    }

    #[test]
    fn rewrites_ads_head() {
        let document = parse(&[
            "<html ⚡4ads>",
            "<head>",
            "  <script async src=\"https://cdn.ampproject.org/v0.js\"></script>",
            "  <style amp-boilerplate>body{-webkit-animation:none}</style><noscript><style amp-boilerplate>body{-webkit-animation:none}</style></noscript>",
            "</head>",
        ]);
        assert_eq!(
            document.head,
            "  <script async src=\"https://cdn.ampproject.org/amp4ads-v0.js\"></script>\n  <style amp4ads-boilerplate>body{visibility:hidden}</style>\n"
        );
    }

    #[test]
    fn rewrites_story_head() {
        let document = parse(&[
            "<head>",
            "  <script async custom-element=\"amp-story\" src=\"https://cdn.ampproject.org/v0/amp-story-0.1.js\"></script>",
            "</head>",
            "<body>",
            "<amp-story standalone>",
            "</amp-story>",
            "</body>",
        ]);
        assert!(document.head.contains("amp-story-1.0.js"));
        assert!(!document.head.contains("amp-story-0.1.js"));
    }

    #[test]
    fn keeps_web_head() {
        let head = "  <style amp-boilerplate>body{}</style>";
        let document = parse(&["<html ⚡>", "<head>", head, "</head>"]);
        assert_eq!(document.head, format!("{head}\n"));
    }

    #[test]
    fn captures_wrapped_story_page_id() {
        let document = parse(&[
            "<body>",
            "<amp-story standalone>",
            "<amp-story-page",
            "    id=\"cover\">",
            "</amp-story-page>",
            "</amp-story>",
            "</body>",
        ]);
        assert_eq!(document.sections()[0].story_page_id(), "cover");
        assert!(document.sections()[0].starts_story());
    }

    #[test]
    fn reports_metadata_line_and_path() {
        let input = "<!--comment-->\n<!---\n  a: [\n--->";
        let err = DocumentParser::default()
            .parse(input, Some(Path::new("samples/broken.html")))
            .unwrap_err();
        match &err {
            ParseError::MetadataSyntax { line, .. } => assert_eq!(*line, 4),
            other => panic!("unexpected error {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("samples/broken.html"));
        assert!(message.contains("line 4"));
    }

    #[test]
    fn ignores_unterminated_metadata() {
        let document = parse(&["<h1>a</h1>", "<!---", "experiments: [x]"]);
        assert!(document.metadata.experiments.is_empty());
        assert_eq!(codes(&document), vec!["<h1>a</h1>\n"]);
    }

    #[test]
    fn validates_filters() {
        let input = "<!-- only email @filter(email) -->\n<p>x</p>";
        let err = DocumentParser::default().parse(input, None).unwrap_err();
        assert!(
            matches!(err, ParseError::FilterValidation { ref filter, .. } if filter == "email")
        );
        assert!(err.to_string().contains("<input>"));

        let declared = "<!---\nformats: [websites, email]\n--->\n<!-- @filter(email) -->\n<p>x</p>";
        let document = DocumentParser::default().parse(declared, None).unwrap();
        assert_eq!(document.sections()[0].filters().map(|f| f.len()), Some(1));
    }

    #[test]
    fn rejects_multiple_filters() {
        let input = "<!-- @filter(websites)\n@filter(email) -->\n<p>x</p>";
        let err = DocumentParser::default().parse(input, None).unwrap_err();
        assert!(matches!(err, ParseError::MultipleFilterAnnotations { .. }));
    }
}
