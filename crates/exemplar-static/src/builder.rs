//! Static site builder.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use exemplar_sample::{parse_sample, AmpVariant, Document, Highlighter, ParseError};

use crate::assets::AssetPipeline;
use crate::sample_file::SampleFile;
use crate::templates::{
    IndexContext, NavItem, OutlineEntry, PreviewContext, SampleContext, SectionView,
    TemplateEngine,
};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the annotated HTML samples
    pub samples_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify the site stylesheet and the samples' custom styles
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            samples_dir: PathBuf::from("samples"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Samples".to_string(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of sample pages generated
    pub pages: usize,

    /// Number of sections across all samples
    pub sections: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read samples: {0}")]
    ReadError(String),

    #[error("Failed to parse {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A parsed sample waiting to be rendered.
#[derive(Debug)]
struct SamplePage {
    file: SampleFile,
    document: Document,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
    highlighter: Highlighter,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
            highlighter: Highlighter::new(),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let files = self.discover_samples()?;
        tracing::info!("Found {} samples in {}", files.len(), self.config.samples_dir.display());

        // A failing sample fails the build
        let pages: Vec<SamplePage> = files
            .into_par_iter()
            .map(|file| self.parse_page(file))
            .collect::<Result<_, _>>()?;

        let nav = self.build_navigation(&pages);

        pages
            .par_iter()
            .enumerate()
            .map(|(index, page)| self.build_page(page, self.next_page(&pages, index), &nav))
            .collect::<Result<Vec<()>, BuildError>>()?;

        self.generate_assets()?;
        self.generate_index(&nav)?;
        self.generate_search_index(&pages)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            sections: pages.iter().map(|p| p.document.sections().len()).sum(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Find all `.html` samples, in path order.
    fn discover_samples(&self) -> Result<Vec<SampleFile>, BuildError> {
        if !self.config.samples_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Samples directory not found: {}",
                self.config.samples_dir.display()
            )));
        }

        let mut files: Vec<SampleFile> = WalkDir::new(&self.config.samples_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("html"))
            .map(|e| {
                let relative = e
                    .path()
                    .strip_prefix(&self.config.samples_dir)
                    .unwrap_or(e.path())
                    .to_path_buf();
                SampleFile::new(relative)
            })
            .collect();

        files.sort_by(|a, b| a.relative_path().cmp(b.relative_path()));
        Ok(files)
    }

    fn parse_page(&self, file: SampleFile) -> Result<SamplePage, BuildError> {
        let path = self.config.samples_dir.join(file.relative_path());
        let content = fs::read_to_string(&path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

        let document = parse_sample(&content, Some(&path))
            .map_err(|source| BuildError::ParseError { path: path.clone(), source })?;

        tracing::debug!(
            "Parsed {} into {} sections",
            path.display(),
            document.sections().len()
        );
        Ok(SamplePage { file, document })
    }

    /// Navigation grouped by category directory; root samples come first.
    fn build_navigation(&self, pages: &[SamplePage]) -> Vec<NavItem> {
        let mut nav = Vec::new();
        let mut categories: BTreeMap<PathBuf, (String, Vec<NavItem>)> = BTreeMap::new();

        for page in pages {
            let item = NavItem {
                title: page.file.title(),
                path: self.url(&page.file.url()),
                children: Vec::new(),
                active: false,
            };

            match page.file.category() {
                Some(category) => {
                    let dir = page
                        .file
                        .relative_path()
                        .parent()
                        .unwrap_or(Path::new(""))
                        .to_path_buf();
                    categories
                        .entry(dir)
                        .or_insert_with(|| (category, Vec::new()))
                        .1
                        .push(item);
                }
                None => nav.push(item),
            }
        }

        for (_, (title, children)) in categories {
            let path = children
                .first()
                .map(|c| c.path.clone())
                .unwrap_or_else(|| self.config.base_url.clone());
            nav.push(NavItem {
                title,
                path,
                children,
                active: false,
            });
        }

        nav
    }

    /// The sample after `index` in the same directory.
    fn next_page<'a>(&self, pages: &'a [SamplePage], index: usize) -> Option<&'a SamplePage> {
        let current = pages[index].file.relative_path().parent();
        pages
            .get(index + 1)
            .filter(|next| next.file.relative_path().parent() == current)
    }

    /// Section URL below the base URL, with a trailing slash.
    fn section_url(&self, file: &SampleFile) -> String {
        let section = file.section_url();
        let base = self.config.base_url.trim_end_matches('/');
        if section == "/" {
            format!("{}/", base)
        } else {
            format!("{}{}/", base, section)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Render the sample page and its standalone preview.
    fn build_page(
        &self,
        page: &SamplePage,
        next: Option<&SamplePage>,
        nav: &[NavItem],
    ) -> Result<(), BuildError> {
        let document = &page.document;
        let page_url = self.url(&page.file.url());

        let sections = document
            .sections()
            .iter()
            .map(|s| SectionView {
                id: s.id(),
                doc: s.marked_doc(&self.highlighter).to_string(),
                code: s.escaped_code(&self.highlighter),
                preview: s.preview().to_string(),
                show_preview: s.show_preview(),
                hide_columns: s.hide_columns(),
                hide_doc_on_mobile: s.hide_doc_on_mobile(),
                hide_code_on_mobile: s.hide_code_on_mobile(),
                hide_preview_on_mobile: s.hide_preview_on_mobile(),
                story_page_id: s.story_page_variable_id(),
            })
            .collect();

        let outline = document
            .sections()
            .iter()
            .flat_map(|s| s.headings())
            .map(|h| OutlineEntry {
                title: h.name.clone(),
                id: h.id.clone(),
            })
            .collect();

        let nav = mark_active(nav, &page_url);

        let context = SampleContext {
            title: if document.title.is_empty() {
                page.file.title()
            } else {
                document.title.clone()
            },
            site_title: self.config.title.clone(),
            description: document.description(),
            category: page.file.category(),
            section_url: self.section_url(&page.file),
            base_url: self.config.base_url.clone(),
            nav,
            outline,
            sections,
            preview_url: self.url(&page.file.url_preview()),
            next: next.map(|n| NavItem {
                title: n.file.title(),
                path: self.url(&n.file.url()),
                children: Vec::new(),
                active: false,
            }),
            formats: document.formats(),
            first_image: document.first_image.clone(),
        };

        let html = self
            .templates
            .render_page("sample.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;
        self.write(&page.file.target_path(), &html)?;

        let preview = self.preview_context(document);
        let html = self
            .templates
            .render_page("preview.html", &preview)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;
        self.write(&page.file.target_preview_path(), &html)
    }

    fn preview_context(&self, document: &Document) -> PreviewContext {
        let marker = match document.variant {
            AmpVariant::Ads => "⚡4ads",
            AmpVariant::Email => "⚡4email",
            AmpVariant::Web | AmpVariant::Story => "⚡",
        };

        let styles = if self.config.minify && !document.styles.trim().is_empty() {
            AssetPipeline::minify_css(&document.styles).unwrap_or_else(|e| {
                tracing::warn!("Keeping unminified styles: {}", e);
                document.styles.clone()
            })
        } else {
            document.styles.clone()
        };

        PreviewContext {
            html_attributes: format!("{} lang=\"{}\"", marker, document.lang),
            head: document.head.clone(),
            styles,
            body: if document.body.is_empty() {
                "<body>".to_string()
            } else {
                document.body.clone()
            },
            elements_after_body: document.elements_after_body.clone(),
            previews: document
                .sections()
                .iter()
                .filter(|s| s.in_body())
                .map(|s| s.preview().to_string())
                .collect(),
        }
    }

    /// Write `content` to `relative` below the output directory.
    fn write(&self, relative: &Path, content: &str) -> Result<(), BuildError> {
        let path = self.config.output_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::write(&path, content)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        self.write(Path::new("assets/main.css"), &css)?;
        self.write(Path::new("assets/main.js"), &AssetPipeline::generate_js())
    }

    fn generate_index(&self, nav: &[NavItem]) -> Result<(), BuildError> {
        let context = IndexContext {
            site_title: self.config.title.clone(),
            base_url: self.config.base_url.clone(),
            nav: nav.to_vec(),
        };
        let html = self
            .templates
            .render_page("index.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;
        self.write(Path::new("index.html"), &html)
    }

    /// Generate the sample index used for search.
    fn generate_search_index(&self, pages: &[SamplePage]) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = pages
            .iter()
            .map(|page| {
                serde_json::json!({
                    "title": page.file.title(),
                    "description": page.document.description(),
                    "category": page.file.category(),
                    "url": self.url(&page.file.url()),
                    "formats": page.document.formats(),
                    "component": page.document.metadata.component,
                    "image": page.document.first_image,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;
        self.write(Path::new("search-index.json"), &json)
    }
}

/// Copy of `nav` with the item pointing at `url` marked active.
fn mark_active(nav: &[NavItem], url: &str) -> Vec<NavItem> {
    nav.iter()
        .map(|item| NavItem {
            active: item.path == url && item.children.is_empty(),
            children: mark_active(&item.children, url),
            ..item.clone()
        })
        .collect()
}
