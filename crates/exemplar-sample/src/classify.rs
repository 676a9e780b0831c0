//! Line classification for pretty-printed HTML.
//!
//! The parser never builds a DOM. It expects one tag-opening construct per
//! line and inspects each line with the string scanners in this module.

/// Classifies single lines of pretty-printed HTML.
///
/// The parser only talks to this trait, so a tolerant tokenizer can replace
/// [`TagScanner`] if the input stops being pretty-printed.
pub trait LineClassifier: Send + Sync {
    /// Name of the first tag opened on the line.
    fn open_tag<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Name of a tag opened as a bare `<name` that ends the line, its
    /// attributes wrapped onto the following lines.
    fn wrapped_tag<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Name of the first tag closed on the line.
    fn close_tag<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Whether the line holds a tag that always ends the element being tracked.
    fn is_single_line(&self, line: &str) -> bool;

    /// Whether `tag` is a void element that ends at the first `>`.
    fn is_void(&self, tag: &str) -> bool;
}

/// String-scanning classifier for pretty-printed input.
#[derive(Debug, Clone)]
pub struct TagScanner {
    single_line_tags: Vec<String>,
    void_tags: Vec<String>,
}

impl TagScanner {
    /// Create a scanner from the configured tag lists.
    pub fn new(single_line_tags: &[String], void_tags: &[String]) -> Self {
        Self {
            single_line_tags: single_line_tags.to_vec(),
            void_tags: void_tags.to_vec(),
        }
    }
}

impl LineClassifier for TagScanner {
    fn open_tag<'a>(&self, line: &'a str) -> Option<&'a str> {
        let start = line.find('<')?;
        let rest = &line[start + 1..];
        if rest.starts_with('/') || rest.starts_with('!') {
            return None;
        }

        let end = match (rest.find('>'), rest.find(' ')) {
            (Some(bracket), Some(space)) => bracket.min(space),
            (Some(bracket), None) => bracket,
            (None, Some(space)) => space,
            (None, None) => return None,
        };

        let name = &rest[..end];
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    fn wrapped_tag<'a>(&self, line: &'a str) -> Option<&'a str> {
        let name = line.trim().strip_prefix('<')?;
        let is_name = name.starts_with(|c: char| c.is_ascii_alphabetic())
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        is_name.then_some(name)
    }

    fn close_tag<'a>(&self, line: &'a str) -> Option<&'a str> {
        let start = line.find("</")? + 2;
        let end = line[start..].find('>')? + start;
        let name = &line[start..end];
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    fn is_single_line(&self, line: &str) -> bool {
        if line
            .trim_start()
            .get(..9)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!doctype"))
        {
            return true;
        }
        match self.open_tag(line) {
            Some(tag) => self
                .single_line_tags
                .iter()
                .any(|t| t.eq_ignore_ascii_case(tag)),
            None => false,
        }
    }

    fn is_void(&self, tag: &str) -> bool {
        self.void_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// The opening `<tag ...>` text up to and including its `>`.
///
/// Returns `None` while the tag's attributes are still wrapped onto
/// following lines.
pub fn tag_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let start = line.find(&format!("<{}", tag))?;
    let end = line[start..].find('>')? + start + 1;
    Some(&line[start..end])
}

/// Value of a double-quoted attribute, e.g. `lang` in `<html lang="de">`.
pub fn attribute<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    for (index, _) in line.match_indices(&needle) {
        let preceded_by_boundary = line[..index]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || c == '<');
        if !preceded_by_boundary {
            continue;
        }
        let value_start = index + needle.len();
        let value_end = line[value_start..].find('"')? + value_start;
        return Some(&line[value_start..value_end]);
    }
    None
}

/// Text of a `<title>...</title>` pair on a single line.
pub fn title(line: &str) -> Option<&str> {
    let start = line.find("<title>")? + "<title>".len();
    let end = line[start..].find("</title>")? + start;
    Some(&line[start..end])
}
