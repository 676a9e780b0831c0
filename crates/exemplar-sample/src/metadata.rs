//! Sample metadata from the `<!--- ... --->` block.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::text::normalize_indentation;

/// Parsed metadata of a sample.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Metadata {
    /// Experiments the sample needs enabled
    #[serde(default)]
    pub experiments: Vec<String>,

    /// Component this sample demonstrates
    #[serde(default)]
    pub component: Option<String>,

    /// Build formats the sample supports (websites, ads, email, stories)
    #[serde(default)]
    pub formats: Vec<String>,

    /// Thumbnail override
    #[serde(default)]
    pub image: Option<String>,

    /// Any other keys, kept for the templates
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Strip the metadata delimiters from one line of the block.
pub(crate) fn strip_markers(line: &str) -> String {
    line.replace("<!---", "").replace("--->", "")
}

/// Parse the accumulated block text. JSON blocks parse as YAML flow mappings.
pub fn parse_metadata(block: &str) -> Result<Metadata, serde_yaml::Error> {
    let text = normalize_indentation(block, false);
    if text.trim().is_empty() {
        return Ok(Metadata::default());
    }
    serde_yaml::from_str(&text)
}
