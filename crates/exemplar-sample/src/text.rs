//! Whitespace and text helpers shared by sections and documents.

/// Columns a tab counts for in indentation math.
const TAB_WIDTH: usize = 2;

/// Replace the tabs in a line's leading whitespace with spaces.
pub fn expand_leading_tabs(line: &str) -> String {
    let body = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - body.len()];
    let mut expanded = String::with_capacity(line.len() + indent.len());
    for c in indent.chars() {
        if c == '\t' {
            expanded.push_str(&" ".repeat(TAB_WIDTH));
        } else {
            expanded.push(c);
        }
    }
    expanded.push_str(body);
    expanded
}

/// Number of leading spaces.
pub fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Subtract the minimum indentation of the non-blank lines from every line.
///
/// Blank lines become empty. With `dedent_headings`, markdown heading lines
/// lose all of their indentation. A trailing newline is preserved.
pub fn normalize_indentation(text: &str, dedent_headings: bool) -> String {
    let lines: Vec<String> = text.lines().map(expand_leading_tabs).collect();
    let min = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_spaces(l))
        .min()
        .unwrap_or(0);

    let mut result = lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else if dedent_headings && l.trim_start().starts_with('#') {
                l.trim_start()
            } else {
                &l[min..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    if text.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Heading anchor: lower-cased, with runs of non-word characters replaced by `-`.
pub fn anchor(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut in_gap = false;
    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            id.push(c);
            in_gap = false;
        } else if !in_gap {
            id.push('-');
            in_gap = true;
        }
    }
    id
}

/// Collapse all whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for use inside HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decode the entities produced by [`escape_html`] and the markdown renderer.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// The first sentence of a text, with line breaks turned into spaces.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace.
pub fn first_sentence(text: &str) -> String {
    let mut sentence = String::new();
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if matches!(prev, Some('.' | '!' | '?')) && c.is_whitespace() {
            break;
        }
        if c != '\r' && c != '\n' {
            sentence.push(c);
        }
        if prev != Some('\n') && c == '\n' {
            sentence.push(' ');
        }
        prev = Some(c);
    }
    sentence
}
