//! Stylesheet and script shipped with the generated site.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// The site stylesheet: page layout, section columns, hints and the
    /// classes emitted by the highlighter.
    pub fn generate_css() -> String {
        format!("{SITE_CSS}\n{HIGHLIGHT_CSS}")
    }

    /// The site script.
    pub fn generate_js() -> String {
        SITE_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const SITE_CSS: &str = r#"/* exemplar site theme */
:root {
  --nav-width: 260px;
  --border: #e2e2e2;
  --muted: #f6f6f6;
  --text: #1c1c1c;
  --link: #005af0;
  --hint: #fffbe0;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  color: var(--text);
  line-height: 1.5;
}

.layout {
  display: grid;
  grid-template-columns: var(--nav-width) 1fr;
  min-height: 100vh;
}

.nav {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
}

.nav-list,
.nav-children {
  list-style: none;
  margin: 0;
  padding: 0;
}

.nav-children {
  margin-left: 1rem;
}

.nav-item a {
  display: block;
  padding: 0.25rem 0.5rem;
  color: var(--text);
  text-decoration: none;
}

.nav-item.active > a {
  color: var(--link);
  font-weight: 600;
}

.sample-header {
  padding: 1.5rem 2rem;
  border-bottom: 1px solid var(--border);
}

.sample-header .description {
  color: #555;
}

/* One row per section: doc, code and preview columns */
.section {
  display: grid;
  grid-template-columns: 1fr 1fr 1fr;
  border-bottom: 1px solid var(--border);
}

.section > div {
  padding: 1rem;
  min-width: 0;
}

.section.hide-columns {
  grid-template-columns: 1fr;
}

.section.hide-columns .doc,
.section.hide-columns .preview {
  display: none;
}

.code pre {
  margin: 0;
  overflow-x: auto;
  font-size: 0.8125rem;
}

.preview {
  background: var(--muted);
}

.www-heading a {
  color: inherit;
}

/* Hints: a checkbox toggles the tooltip above the hinted element */
.has-hint {
  position: relative;
  display: block;
  cursor: pointer;
}

.has-hint .show-hint {
  display: none;
}

.has-hint .hint {
  display: none;
  position: absolute;
  top: -0.25rem;
  left: 0;
  right: 0;
  transform: translateY(-100%);
  padding: 0.5rem;
  background: var(--hint);
  border: 1px solid var(--border);
  font-family: system-ui, sans-serif;
  white-space: normal;
}

.has-hint .show-hint:checked + .hint {
  display: block;
}

.footer-nav {
  display: flex;
  justify-content: flex-end;
  padding: 1rem 2rem;
}

@media (max-width: 768px) {
  .layout,
  .section {
    grid-template-columns: 1fr;
  }

  .hide-doc-on-mobile,
  .hide-code-on-mobile,
  .hide-preview-on-mobile {
    display: none;
  }
}
"#;

/// Colors for the `hljs-` scope classes.
const HIGHLIGHT_CSS: &str = r#".hljs-comment {
  color: #8e908c;
}

.hljs-entity.hljs-name.hljs-tag {
  color: #c82829;
}

.hljs-entity.hljs-other.hljs-attribute-name {
  color: #f5871f;
}

.hljs-string {
  color: #718c00;
}

.hljs-punctuation.hljs-definition.hljs-tag {
  color: #4d4d4c;
}
"#;

const SITE_JS: &str = r#"(function() {
  'use strict';

  // Highlight current nav item
  const currentPath = window.location.pathname;
  document.querySelectorAll('.nav-item a').forEach(link => {
    if (link.getAttribute('href') === currentPath) {
      link.parentElement.classList.add('active');
    }
  });

  // Keep at most one hint open
  document.querySelectorAll('.show-hint').forEach(toggle => {
    toggle.addEventListener('change', () => {
      if (!toggle.checked) return;
      document.querySelectorAll('.show-hint:checked').forEach(other => {
        if (other !== toggle) other.checked = false;
      });
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(".section"));
        assert!(css.contains(".has-hint"));
        assert!(css.contains(".hljs-string"));
    }

    #[test]
    fn generates_js() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains("show-hint"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.button {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".button"));
    }

    #[test]
    fn minifies_site_css() {
        let minified = AssetPipeline::minify_css(&AssetPipeline::generate_css()).unwrap();
        assert!(minified.len() < AssetPipeline::generate_css().len());
    }
}
