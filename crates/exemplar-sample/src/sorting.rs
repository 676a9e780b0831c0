//! Moves elements that must follow `<body>` directly out of the previews.

use crate::document::Document;

/// Relocates the dialect's `elements_after_body` from section previews to
/// [`Document::elements_after_body`].
///
/// Tags are handled in their configured order, every section in turn. A
/// match runs from the first opening tag to the last closing tag of the
/// preview, so repeated elements in one section move as one block together
/// with whatever sits between them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementSorting;

impl ElementSorting {
    pub fn apply(document: &mut Document) {
        let dialect = document.dialect().clone();
        let mut moved = String::new();

        for (tag, pattern) in &dialect.moved_elements {
            for section in document.sections_mut() {
                if let Some(range) = pattern.find(&section.preview).map(|m| m.range()) {
                    tracing::debug!("Moving <{}> out of section {}", tag, section.id());
                    moved.push_str(&section.preview[range.clone()]);
                    section.preview.replace_range(range, "");
                }
            }
        }

        document.elements_after_body.push_str(&moved);
    }
}
