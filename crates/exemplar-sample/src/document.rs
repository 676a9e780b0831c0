//! The parsed sample.

use std::sync::Arc;

use serde::Serialize;

use crate::dialect::Dialect;
use crate::markdown;
use crate::metadata::Metadata;
use crate::section::CodeSection;
use crate::text::{decode_entities, first_sentence};

/// Which flavour of AMP a sample is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmpVariant {
    #[default]
    Web,
    Ads,
    Email,
    Story,
}

impl AmpVariant {
    /// Build format name used by `@filter` directives and metadata.
    pub fn format(&self) -> &'static str {
        match self {
            AmpVariant::Web => "websites",
            AmpVariant::Ads => "ads",
            AmpVariant::Email => "email",
            AmpVariant::Story => "stories",
        }
    }
}

/// A sample parsed into sections, plus what was collected from its head.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(skip)]
    dialect: Arc<Dialect>,
    sections: Vec<CodeSection>,
    pub head: String,
    pub styles: String,
    pub title: String,
    pub metadata: Metadata,
    pub lang: String,
    pub variant: AmpVariant,
    /// The opening `<body ...>` tag
    pub body: String,
    pub elements_after_body: String,
    pub first_image: String,
}

impl Document {
    pub fn new(dialect: Arc<Dialect>) -> Self {
        let first_image = dialect.options().default_image.clone();
        Self {
            dialect,
            sections: Vec::new(),
            head: String::new(),
            styles: String::new(),
            title: String::new(),
            metadata: Metadata::default(),
            lang: "en".to_string(),
            variant: AmpVariant::Web,
            body: String::new(),
            elements_after_body: String::new(),
            first_image,
        }
    }

    /// Append a section, numbering it and fixing the first/last flags.
    pub fn add_section(&mut self, mut section: CodeSection) {
        section.id = self.sections.len();
        match self.sections.last_mut() {
            Some(previous) => previous.is_last_section = false,
            None => section.is_first_section = true,
        }
        section.is_last_section = true;
        self.sections.push(section);
    }

    pub(crate) fn dialect(&self) -> &Arc<Dialect> {
        &self.dialect
    }

    pub fn sections(&self) -> &[CodeSection] {
        &self.sections
    }

    pub(crate) fn sections_mut(&mut self) -> &mut [CodeSection] {
        &mut self.sections
    }

    pub fn append_head(&mut self, line: &str) {
        self.head.push_str(line);
        self.head.push('\n');
    }

    pub fn append_styles(&mut self, line: &str) {
        self.styles.push_str(line);
        self.styles.push('\n');
    }

    pub(crate) fn set_metadata(&mut self, metadata: Metadata) {
        if let Some(image) = &metadata.image {
            self.first_image = image.clone();
        }
        self.metadata = metadata;
    }

    /// First sentence of the first documented section that has one, as
    /// plain text.
    pub fn description(&self) -> String {
        self.sections
            .iter()
            .filter(|s| !s.doc().trim().is_empty())
            .map(|s| self.extract_description(s.doc()))
            .find(|d| !d.is_empty())
            .unwrap_or_default()
    }

    fn extract_description(&self, doc: &str) -> String {
        let html = markdown::render(doc, None);
        let Some(paragraph) = self.dialect.paragraph.captures(&html) else {
            return String::new();
        };
        let text = self.dialect.markup.replace_all(&paragraph[1], "");
        decode_entities(first_sentence(&text).trim())
    }

    pub fn has_canonical(&self) -> bool {
        self.head.contains(&self.dialect.options().canonical_marker)
    }

    /// Whether the head loads the extension script of `component`.
    pub fn imports_component(&self, component: &str) -> bool {
        self.head
            .contains(&format!("custom-element=\"{}\"", component))
    }

    pub fn includes_link(&self, rel: &str) -> bool {
        self.head.contains(&format!("rel=\"{}\"", rel))
    }

    /// Formats this sample builds for: the ones declared in its metadata,
    /// else the one of its variant.
    pub fn formats(&self) -> Vec<String> {
        if self.metadata.formats.is_empty() {
            vec![self.variant.format().to_string()]
        } else {
            self.metadata.formats.clone()
        }
    }

    pub fn is_amp_web(&self) -> bool {
        self.variant == AmpVariant::Web
    }

    pub fn is_amp_ads(&self) -> bool {
        self.variant == AmpVariant::Ads
    }

    pub fn is_amp_email(&self) -> bool {
        self.variant == AmpVariant::Email
    }

    pub fn is_amp_story(&self) -> bool {
        self.variant == AmpVariant::Story
    }
}
