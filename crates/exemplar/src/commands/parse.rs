//! Parse a single sample and print what the parser made of it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use exemplar_sample::{parse_sample, Document};

/// Run the parse command.
pub fn run(file: &Path, json: bool) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let document = parse_sample(&content, Some(file))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{}", summary(&document));
    }

    Ok(())
}

fn summary(document: &Document) -> String {
    let mut out = String::new();
    out.push_str(&format!("title:    {}\n", document.title));
    out.push_str(&format!("lang:     {}\n", document.lang));
    out.push_str(&format!("formats:  {}\n", document.formats().join(", ")));
    out.push_str(&format!("sections: {}\n", document.sections().len()));

    for section in document.sections() {
        let doc = section.doc().lines().find(|l| !l.trim().is_empty());
        let flags = [
            (section.in_body(), "body"),
            (section.show_preview(), "preview"),
            (section.hide_columns(), "hidden"),
            (!section.hints().is_empty(), "hints"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(",");

        out.push_str(&format!(
            "  #{:<3} {:>3} lines [{}] {}\n",
            section.id(),
            section.code().lines().count(),
            flags,
            doc.unwrap_or("").trim()
        ));
    }

    if !document.elements_after_body.is_empty() {
        out.push_str("elements after body:\n");
        out.push_str(&document.elements_after_body);
        out.push('\n');
    }

    out
}
