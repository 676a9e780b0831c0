//! Naming of sample files and the pages built from them.
//!
//! Sample files are named after their title (`What's_up_100%25?.html`) and
//! grouped in category directories ordered by a number prefix
//! (`10_Introduction/`). Output paths use lower-case slugs of both.

use std::path::{Path, PathBuf};

/// A sample file, addressed relative to the samples directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile {
    relative: PathBuf,
}

impl SampleFile {
    pub fn new(relative: impl Into<PathBuf>) -> Self {
        Self {
            relative: relative.into(),
        }
    }

    /// Path relative to the samples directory.
    pub fn relative_path(&self) -> &Path {
        &self.relative
    }

    pub fn file_name(&self) -> &str {
        self.relative
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// File name without extension.
    pub fn name(&self) -> &str {
        self.relative
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// Human readable title; an `index` file takes its category's title.
    pub fn title(&self) -> String {
        if self.name() == "index" {
            return self.category().unwrap_or_default();
        }
        display_name(self.name())
    }

    /// Title of the directory the sample lives in, if it is not at the root.
    pub fn category(&self) -> Option<String> {
        self.directories()
            .last()
            .map(|dir| display_name(strip_number_prefix(dir)))
    }

    /// URL of the section the category belongs to (`/` outside sections).
    pub fn section_url(&self) -> String {
        let dirs = self.directories();
        let section = &dirs[..dirs.len().saturating_sub(1)];
        if section.is_empty() {
            return "/".to_string();
        }
        let slugs: Vec<String> = section.iter().map(|d| slug(d)).collect();
        format!("/{}", slugs.join("/"))
    }

    /// Output path of the sample page, relative to the output directory.
    pub fn target_path(&self) -> PathBuf {
        self.target_dir().join("index.html")
    }

    /// Output path of the standalone preview page.
    pub fn target_preview_path(&self) -> PathBuf {
        self.target_dir().join("preview").join("index.html")
    }

    pub fn url(&self) -> String {
        let segments: Vec<String> = self
            .target_dir()
            .iter()
            .filter_map(|s| s.to_str())
            .map(str::to_string)
            .collect();
        format!("/{}/", segments.join("/"))
    }

    pub fn url_preview(&self) -> String {
        format!("{}preview/", self.url())
    }

    fn directories(&self) -> Vec<&str> {
        self.relative
            .parent()
            .map(|p| p.iter().filter_map(|s| s.to_str()).collect())
            .unwrap_or_default()
    }

    fn target_dir(&self) -> PathBuf {
        let mut dir: PathBuf = self.directories().into_iter().map(slug).collect();
        dir.push(slug(self.name()));
        dir
    }
}

/// `10_Getting_Started` -> `Getting_Started`
fn strip_number_prefix(name: &str) -> &str {
    let digits = name.len() - name.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    match name[digits..].strip_prefix('_') {
        Some(rest) if digits > 0 => rest,
        _ => name,
    }
}

/// Decode a file name part into display text.
fn display_name(name: &str) -> String {
    percent_decode(name).replace('_', " ").trim().to_string()
}

/// Lower-case URL slug made of `[a-z0-9_-]`, without number prefix or
/// leading and trailing underscores.
fn slug(name: &str) -> String {
    let decoded = percent_decode(strip_number_prefix(name)).to_lowercase();
    let mut slug = String::with_capacity(decoded.len());
    for c in decoded.chars() {
        let c = if c.is_whitespace() { '_' } else { c };
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            continue;
        }
        if c == '_' && slug.ends_with('_') {
            continue;
        }
        slug.push(c);
    }
    slug.trim_matches('_').to_string()
}

/// Decode `%XX` escapes. Malformed escapes are kept as they are.
fn percent_decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = &bytes[i + 1..i + 3];
            let byte = hex
                .iter()
                .all(u8::is_ascii_hexdigit)
                .then(|| std::str::from_utf8(hex).ok())
                .flatten()
                .and_then(|h| u8::from_str_radix(h, 16).ok());
            if let Some(byte) = byte {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file() -> SampleFile {
        SampleFile::new("10_Hello-world's/What's_up_100%25?.html")
    }

    #[test]
    fn extracts_title() {
        assert_eq!(file().title(), "What's up 100%?");
        assert_eq!(
            SampleFile::new("Samples_%26_Templates/index.html").title(),
            "Samples & Templates"
        );
    }

    #[test]
    fn extracts_category() {
        assert_eq!(file().category(), Some("Hello-world's".to_string()));
        assert_eq!(SampleFile::new("offline.html").category(), None);
    }

    #[test]
    fn builds_target_paths() {
        assert_eq!(
            file().target_path(),
            PathBuf::from("hello-worlds/whats_up_100/index.html")
        );
        assert_eq!(
            file().target_preview_path(),
            PathBuf::from("hello-worlds/whats_up_100/preview/index.html")
        );
        assert_eq!(
            SampleFile::new("10_Hello-world/_Hello.html").target_path(),
            PathBuf::from("hello-world/hello/index.html")
        );
        assert_eq!(
            SampleFile::new("offline.html").target_path(),
            PathBuf::from("offline/index.html")
        );
    }

    #[test]
    fn builds_urls() {
        assert_eq!(file().url(), "/hello-worlds/whats_up_100/");
        assert_eq!(file().url_preview(), "/hello-worlds/whats_up_100/preview/");
        assert_eq!(
            SampleFile::new("50_Samples_%26_Templates/Test.html").url(),
            "/samples_templates/test/"
        );
        assert_eq!(
            SampleFile::new("amp-ads/10_introduction/hello.html").url(),
            "/amp-ads/introduction/hello/"
        );
    }

    #[test]
    fn finds_section() {
        assert_eq!(
            SampleFile::new("amp-ads/10_introduction/hello.html").section_url(),
            "/amp-ads"
        );
        assert_eq!(SampleFile::new("10_introduction/hello.html").section_url(), "/");
        assert_eq!(SampleFile::new("hello.html").section_url(), "/");
    }

    #[test]
    fn keeps_malformed_escapes() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("a%zzb"), "a%zzb");
        assert_eq!(percent_decode("%27s"), "'s");
    }
}
