//! Parser configuration and the patterns compiled from it.

use std::sync::Arc;

use regex::Regex;

use crate::classify::TagScanner;

/// Tunable parts of the sample format.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserOptions {
    /// Tags that always end the element being tracked
    pub single_line_tags: Vec<String>,

    /// Void elements, ended by the first line closing with `>`
    pub void_tags: Vec<String>,

    /// Elements moved out of the previews to after the body, in this order
    pub elements_after_body: Vec<String>,

    /// Undocumented sections with more code lines than this are collapsed
    pub hidden_line_threshold: usize,

    /// Line prefix marking runtime boilerplate in a code section
    pub boilerplate_signature: String,

    /// Thumbnail used when the metadata names none
    pub default_image: String,

    /// Head substring marking a canonical link
    pub canonical_marker: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            single_line_tags: vec!["link".into(), "meta".into()],
            void_tags: [
                "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "param",
                "source", "track", "wbr",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            // amp-sidebar must come directly after the body
            elements_after_body: vec!["amp-sidebar".into(), "amp-app-banner".into()],
            hidden_line_threshold: 1,
            boilerplate_signature: "<style amp-boilerplate>".into(),
            default_image: "/img/sample_thumbnail.png".into(),
            canonical_marker: "rel=\"canonical\"".into(),
        }
    }
}

/// Options plus every pattern derived from them, compiled once.
///
/// Shared by the parser, its documents and their sections through an `Arc`.
#[derive(Debug)]
pub struct Dialect {
    options: ParserOptions,
    scanner: TagScanner,
    pub(crate) filter: Regex,
    pub(crate) heading: Regex,
    pub(crate) paragraph: Regex,
    pub(crate) markup: Regex,
    pub(crate) hint_start: Regex,
    pub(crate) hint_end: Regex,
    pub(crate) encoded_template: Regex,
    pub(crate) web_boilerplate: Regex,
    pub(crate) moved_elements: Vec<(String, Regex)>,
}

impl Dialect {
    /// Compile a dialect from options.
    pub fn new(options: ParserOptions) -> Self {
        let moved_elements = options
            .elements_after_body
            .iter()
            .map(|tag| (tag.clone(), element_pattern(tag)))
            .collect();

        Self {
            scanner: TagScanner::new(&options.single_line_tags, &options.void_tags),
            filter: Regex::new(r"@filter\(([^)]*)\)").expect("Invalid filter regex"),
            heading: Regex::new(r"^\s*#+\s*(.+)$").expect("Invalid heading regex"),
            paragraph: Regex::new(r"<p(?:\s[^>]*)?>([\s\S]*?)</p>")
                .expect("Invalid paragraph regex"),
            markup: Regex::new(r"<[^>]*>").expect("Invalid markup regex"),
            hint_start: Regex::new(r"^\s*<!--START_HINT_(\d+)-->\s*$")
                .expect("Invalid hint start regex"),
            hint_end: Regex::new(r"^\s*<!--END_HINT-->\s*$").expect("Invalid hint end regex"),
            encoded_template: Regex::new(r"\[\[((?:[^\[\]<]|<[^>]*>)*<[^>]*>(?:[^\[\]<]|<[^>]*>)*)\]\]")
                .expect("Invalid template regex"),
            web_boilerplate: Regex::new(
                r"(?s)<style amp-boilerplate>.*?</style>(?:\s*<noscript>\s*<style amp-boilerplate>.*?</style>\s*</noscript>)?",
            )
            .expect("Invalid boilerplate regex"),
            moved_elements,
            options,
        }
    }

    /// The default dialect behind an `Arc`, ready to hand to a parser.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The line classifier built from the configured tag lists.
    pub fn scanner(&self) -> &TagScanner {
        &self.scanner
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

/// Greedy multi-line pattern matching a whole element with its content.
fn element_pattern(tag: &str) -> Regex {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?is)<{tag}(?:\s.*)?>.+</{tag}>")).expect("Invalid element regex")
}
