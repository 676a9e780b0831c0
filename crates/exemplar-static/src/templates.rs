//! Template engine for rendering sample pages.

use minijinja::Environment;
use serde::Serialize;

/// A navigation item.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// A heading linked from the page outline.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineEntry {
    pub title: String,
    pub id: String,
}

/// One section of a sample page, ready for the template.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub id: usize,
    /// Rendered documentation
    pub doc: String,
    /// Highlighted code with hints
    pub code: String,
    pub preview: String,
    pub show_preview: bool,
    pub hide_columns: bool,
    pub hide_doc_on_mobile: bool,
    pub hide_code_on_mobile: bool,
    pub hide_preview_on_mobile: bool,
    /// Story page the section shows, as an identifier usable in bindings
    pub story_page_id: String,
}

/// Context for rendering a sample page.
#[derive(Debug, Clone, Serialize)]
pub struct SampleContext {
    /// Sample title
    pub title: String,
    /// Site title
    pub site_title: String,
    pub description: String,
    pub category: Option<String>,
    /// URL of the site section holding the category
    pub section_url: String,
    /// Base URL
    pub base_url: String,
    pub nav: Vec<NavItem>,
    pub outline: Vec<OutlineEntry>,
    pub sections: Vec<SectionView>,
    pub preview_url: String,
    pub next: Option<NavItem>,
    pub formats: Vec<String>,
    pub first_image: String,
}

/// Context for rendering the standalone preview of a sample.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewContext {
    /// Attributes of `<html>`, e.g. `⚡4email lang="en"`
    pub html_attributes: String,
    pub head: String,
    pub styles: String,
    /// The sample's own `<body ...>` tag
    pub body: String,
    pub elements_after_body: String,
    pub previews: Vec<String>,
}

/// Context for rendering the site index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    pub site_title: String,
    pub base_url: String,
    pub nav: Vec<NavItem>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("nav.html", NAV_TEMPLATE),
            ("sample.html", SAMPLE_TEMPLATE),
            ("preview.html", PREVIEW_TEMPLATE),
            ("index.html", INDEX_TEMPLATE),
        ] {
            env.add_template(name, source)
                .expect("Failed to add built-in template");
        }

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page<C: Serialize>(
        &self,
        template: &str,
        context: &C,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% block title %}{{ site_title }}{% endblock %}</title>
  {% block meta %}{% endblock %}
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <div class="layout">
    <nav class="nav">
      {% include "nav.html" %}
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <script src="{{ base_url }}assets/main.js"></script>
</body>
</html>"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
</div>
<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
    {% if item.children %}
    <ul class="nav-children">
      {% for child in item.children %}
      <li class="nav-item{% if child.active %} active{% endif %}">
        <a href="{{ child.path }}">{{ child.title }}</a>
      </li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

const SAMPLE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}{{ title }} - {{ site_title }}{% endblock %}

{% block meta %}
  <meta name="description" content="{{ description }}">
  <meta property="og:image" content="{{ first_image }}">
{% endblock %}

{% block content %}
<header class="sample-header">
  {% if category %}<div class="category">{% if section_url != base_url %}<a href="{{ section_url }}">{{ category }}</a>{% else %}{{ category }}{% endif %}</div>{% endif %}
  <h1>{{ title }}</h1>
  <p class="description">{{ description }}</p>
  <a class="preview-link" href="{{ preview_url }}">Open preview</a>
  {% if formats %}<span class="formats">{{ formats | join(", ") }}</span>{% endif %}
</header>

{% if outline %}
<ul class="outline">
{% for entry in outline %}
  <li><a href="#{{ entry.id }}">{{ entry.title }}</a></li>
{% endfor %}
</ul>
{% endif %}

{% for section in sections %}
<div class="section{% if section.hide_columns %} hide-columns{% endif %}" id="section-{{ section.id }}"{% if section.story_page_id %} data-story-page="{{ section.story_page_id }}"{% endif %}>
  <div class="doc{% if section.hide_doc_on_mobile %} hide-doc-on-mobile{% endif %}">{{ section.doc | safe }}</div>
  <div class="code{% if section.hide_code_on_mobile %} hide-code-on-mobile{% endif %}"><pre><code class="language-html">{{ section.code | safe }}</code></pre></div>
  <div class="preview{% if section.hide_preview_on_mobile %} hide-preview-on-mobile{% endif %}">{% if section.show_preview %}{{ section.preview | safe }}{% endif %}</div>
</div>
{% endfor %}

{% if next %}
<nav class="footer-nav">
  <a href="{{ next.path }}">Next: {{ next.title }}</a>
</nav>
{% endif %}
{% endblock %}"##;

const PREVIEW_TEMPLATE: &str = r##"<!doctype html>
<html {{ html_attributes | safe }}>
<head>
{{ head | safe }}{% if styles %}<style amp-custom>{{ styles | safe }}</style>
{% endif %}</head>
{{ body | safe }}
{{ elements_after_body | safe }}
{% for preview in previews %}{{ preview | safe }}{% endfor %}
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="index">
  <h1>{{ site_title }}</h1>
  {% for item in nav %}
  <section>
    <h2><a href="{{ item.path }}">{{ item.title }}</a></h2>
    {% if item.children %}
    <ul>
      {% for child in item.children %}
      <li><a href="{{ child.path }}">{{ child.title }}</a></li>
      {% endfor %}
    </ul>
    {% endif %}
  </section>
  {% endfor %}
</article>
{% endblock %}"##;
