//! Class-based syntax highlighting.

use syntect::html::{line_tokens_to_classed_spans, ClassStyle};
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::text::escape_html;

/// Spans carry `hljs-` prefixed scope classes so existing stylesheets keep working.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hljs-" };

/// Syntax highlighter producing HTML with classed spans.
///
/// Loading the syntax definitions is not cheap: build one and share it.
pub struct Highlighter {
    syntaxes: SyntaxSet,
}

impl Highlighter {
    /// Create a highlighter with the bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Highlight `code` written in `lang` (plain text when unknown).
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        self.highlight_with(code, lang, |_| None)
    }

    /// Highlight `code`, letting `splice` replace whole lines.
    ///
    /// Lines for which `splice` returns markup are emitted verbatim (without
    /// their newline) and skipped by the highlighter, whose parse state
    /// carries on across them. Open scope spans are closed before spliced
    /// markup and reopened on the next highlighted line, so the output
    /// stays properly nested.
    pub fn highlight_with<F>(&self, code: &str, lang: Option<&str>, mut splice: F) -> String
    where
        F: FnMut(&str) -> Option<String>,
    {
        let syntax = lang
            .and_then(|l| self.syntaxes.find_syntax_by_token(l))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());

        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut open_spans: isize = 0;
        let mut suspended = false;
        let mut html = String::with_capacity(code.len() * 2);

        for line in LinesWithEndings::from(code) {
            if let Some(markup) = splice(line.trim_end_matches(['\r', '\n'])) {
                for _ in 0..open_spans.max(0) {
                    html.push_str("</span>");
                }
                open_spans = 0;
                suspended = true;
                html.push_str(&markup);
                continue;
            }

            if suspended {
                for scope in stack.as_slice() {
                    html.push_str(&format!("<span class=\"{}\">", scope_classes(*scope)));
                    open_spans += 1;
                }
                suspended = false;
            }

            let highlighted = state
                .parse_line(line, &self.syntaxes)
                .map_err(|e| e.to_string())
                .and_then(|ops| {
                    line_tokens_to_classed_spans(line, &ops, CLASS_STYLE, &mut stack)
                        .map_err(|e| e.to_string())
                });

            match highlighted {
                Ok((spans, delta)) => {
                    html.push_str(&spans);
                    open_spans += delta;
                }
                Err(e) => {
                    tracing::warn!("Highlighting failed, emitting plain line: {}", e);
                    html.push_str(&escape_html(line));
                }
            }
        }

        for _ in 0..open_spans.max(0) {
            html.push_str("</span>");
        }
        html
    }
}

/// Class attribute of a scope, matching [`CLASS_STYLE`].
fn scope_classes(scope: Scope) -> String {
    scope
        .build_string()
        .split('.')
        .map(|atom| format!("hljs-{atom}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .finish()
    }
}
