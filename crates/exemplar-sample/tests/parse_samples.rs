use std::path::Path;

use exemplar_sample::{parse_sample, CodeSection, Dialect, Document, DocumentParser, ElementSorting, ParseError};
use pretty_assertions::assert_eq;

const HEAD: &str = "<head>";
const HEAD_END: &str = "</head>";
const BODY: &str = "<body>";
const BODY_END: &str = "</body>";
const TAG: &str = "<h1>hello</h1>";
const ANOTHER_TAG: &str = "<h1>world</h1>";
const COMMENT: &str = "<!--comment-->";
const TITLE: &str = "  <title>hello</title>";
const LINK: &str = " <link href=\"Hello World\" />";
const META: &str = " <meta href=\"Hello World\" />";
const BASE: &str = " <base href=\"/\">";

fn parse(lines: &[&str]) -> Document {
    DocumentParser::default()
        .parse(&lines.join("\n"), None)
        .expect("sample should parse")
}

fn summary(document: &Document) -> Vec<(String, String, bool, bool)> {
    document
        .sections()
        .iter()
        .map(|s| {
            (
                s.doc().to_string(),
                s.code().to_string(),
                s.is_first_section(),
                s.is_last_section(),
            )
        })
        .collect()
}

fn section(doc: &str, code: &str, first: bool, last: bool) -> (String, String, bool, bool) {
    (doc.to_string(), code.to_string(), first, last)
}

#[test]
fn comment_with_single_tag_is_one_section() {
    let document = parse(&[COMMENT, TAG]);
    assert_eq!(
        summary(&document),
        vec![section("comment\n", "<h1>hello</h1>\n", true, true)]
    );
}

#[test]
fn strips_whitespace_before_headings() {
    let document = parse(&["<!--", "   # heading", "", "comment-->", TAG]);
    assert_eq!(document.sections()[0].doc(), "\n# heading\n\ncomment\n");
}

#[test]
fn supports_wrapped_attributes() {
    let wrapped = "<h1\n    class=\"test\">\n    hello\n    </h1>";
    let document = parse(&[COMMENT, wrapped, ANOTHER_TAG]);
    assert_eq!(document.sections()[0].code(), format!("{wrapped}\n"));
    assert_eq!(document.sections().len(), 2);
}

#[test]
fn element_after_comment_ends_section() {
    let document = parse(&[COMMENT, TAG, ANOTHER_TAG]);
    assert_eq!(
        summary(&document),
        vec![
            section("comment\n", "<h1>hello</h1>\n", true, false),
            section("", "<h1>world</h1>\n", false, true),
        ]
    );
}

#[test]
fn nested_elements_stay_in_section() {
    let nested = "<div>\n  <h1>hello</h1>\n</div>";
    let document = parse(&[COMMENT, nested, ANOTHER_TAG]);
    assert_eq!(
        summary(&document),
        vec![
            section("comment\n", &format!("{nested}\n"), true, false),
            section("", "<h1>world</h1>\n", false, true),
        ]
    );
}

#[test]
fn nested_same_tags_close_at_depth_zero() {
    let document = parse(&["<!--c-->", "<div>", "<div>x</div>", "</div>", "<h1>next</h1>"]);
    assert_eq!(
        summary(&document),
        vec![
            section("c\n", "<div>\n<div>x</div>\n</div>\n", true, false),
            section("", "<h1>next</h1>\n", false, true),
        ]
    );
}

#[test]
fn ignores_empty_lines_before_tag() {
    let document = parse(&[COMMENT, "", TAG, ANOTHER_TAG]);
    assert_eq!(
        summary(&document),
        vec![
            section("comment\n", "\n<h1>hello</h1>\n", true, false),
            section("", "<h1>world</h1>\n", false, true),
        ]
    );
}

#[test]
fn single_line_tags_end_sections() {
    assert_eq!(parse(&[HEAD, COMMENT, META, LINK, HEAD_END]).sections().len(), 3);
    assert_eq!(parse(&[HEAD, COMMENT, LINK, TITLE, HEAD_END]).sections().len(), 3);
    assert_eq!(parse(&[HEAD, COMMENT, META, TITLE, HEAD_END]).sections().len(), 3);
}

#[test]
fn single_line_tags_end_nested_elements() {
    let document = parse(&[COMMENT, "<div>", "  <meta name=\"x\">", "</div>"]);
    assert_eq!(document.sections().len(), 2);
    assert_eq!(document.sections()[0].code(), "<div>\n  <meta name=\"x\">\n");
}

#[test]
fn void_tags_end_sections() {
    assert_eq!(parse(&[HEAD, COMMENT, BASE, TITLE, HEAD_END]).sections().len(), 3);
}

#[test]
fn mirrors_body_into_preview() {
    let document = parse(&[HEAD, HEAD_END, BODY, TAG, BODY_END]);
    assert_eq!(document.sections()[0].preview(), format!("{TAG}\n"));
    assert_eq!(document.sections().len(), 2);
    assert_eq!(document.sections()[1].code(), "</body>\n");
    assert_eq!(document.body, BODY);
}

#[test]
fn marks_sections_in_body() {
    let document = parse(&[HEAD, HEAD_END, BODY, COMMENT, TAG, BODY_END]);
    assert!(!document.sections()[0].in_body());
    assert!(document.sections()[1].in_body());
    assert!(document.sections()[1].show_preview());
}

#[test]
fn captures_head_and_title() {
    let document = parse(&[HEAD, ANOTHER_TAG, HEAD_END, BODY, TAG, BODY_END]);
    assert_eq!(document.head, format!("{ANOTHER_TAG}\n"));

    let document = parse(&[HEAD, TITLE, "  <title>second</title>", HEAD_END]);
    assert_eq!(document.title, "hello");
}

#[test]
fn metadata_after_comment() {
    let metadata = "<!---\n    experiments:\n      - amp-accordion\n  --->";
    let document = parse(&[COMMENT, metadata, HEAD, TITLE, HEAD_END, BODY, COMMENT, BODY_END]);
    assert_eq!(document.metadata.experiments, vec!["amp-accordion".to_string()]);
    assert_eq!(document.sections().len(), 3);
}

#[test]
fn json_metadata_does_not_leak_into_docs() {
    let document = parse(&["<!---{\"experiments\":[\"x\"]}--->", COMMENT, TAG]);
    assert_eq!(document.metadata.experiments, vec!["x".to_string()]);
    for section in document.sections() {
        assert!(!section.doc().contains("experiments"));
        assert!(!section.code().contains("experiments"));
    }
}

#[test]
fn invalid_metadata_reports_path_and_line() {
    let input = [
        COMMENT,
        "<!---",
        "    experiment: true,",
        "    component: amp-accordion",
        "  }}--->",
        HEAD,
    ]
    .join("\n");
    let err = DocumentParser::default()
        .parse(&input, Some(Path::new("src/10_Components/amp-accordion.html")))
        .unwrap_err();

    assert!(matches!(err, ParseError::MetadataSyntax { line: 5, .. }));
    let message = err.to_string();
    assert!(message.contains("src/10_Components/amp-accordion.html"));
    assert!(message.contains("line 5"));
}

#[test]
fn parses_lang() {
    assert_eq!(parse(&["<html>"]).lang, "en");
    assert_eq!(parse(&["<html ⚡ lang=\"de\">"]).lang, "de");
    assert_eq!(parse(&["<!-- -->", "<html ⚡ lang=\"de\">"]).lang, "de");
}

#[test]
fn parses_variants() {
    let web = parse(&["<html ⚡>", BODY, BODY_END]);
    assert!(web.is_amp_web() && !web.is_amp_ads() && !web.is_amp_email() && !web.is_amp_story());

    let email = parse(&["<html ⚡4email>", BODY, BODY_END]);
    assert!(email.is_amp_email() && !email.is_amp_web());

    let ads = parse(&["<html ⚡4ads>", BODY, BODY_END]);
    assert!(ads.is_amp_ads() && !ads.is_amp_web());

    let story = parse(&["<html ⚡>", BODY, "<amp-story standalone>", "</amp-story>", BODY_END]);
    assert!(story.is_amp_story());
    assert!(!story.is_amp_web());
    assert_eq!(story.formats(), vec!["stories".to_string()]);
}

#[test]
fn captures_story_page_id() {
    let document = parse(&[
        BODY,
        "<amp-story standalone>",
        "<amp-story-page id=\"story-id\">",
        "</amp-story-page>",
        "</amp-story>",
        BODY_END,
    ]);
    assert_eq!(document.sections()[0].story_page_id(), "story-id");
    assert_eq!(document.sections()[0].story_page_variable_id(), "storyid");
}

#[test]
fn describes_from_first_paragraph() {
    let document = parse(&["<!--", "## Title", "Hello world. More text", "-->", TAG]);
    assert_eq!(document.description(), "Hello world.");
    assert_eq!(document.sections()[0].headings()[0].id, "title");
}

#[test]
fn docs_never_contain_comment_delimiters() {
    let document = parse(&["<!-- one -->", TAG, "  <!--", "  two", "  -->", ANOTHER_TAG]);
    for section in document.sections() {
        assert!(!section.doc().contains("<!--"));
        assert!(!section.doc().contains("-->"));
        assert!(!section.code().contains("<!--"));
    }
}

#[test]
fn snippet_keeps_content_div_and_strips_wrapper() {
    let document = parse(&["<!--x-->", "  <div>", "    <p>x</p>", "  </div>"]);
    assert_eq!(document.sections()[0].code_snippet(), "<div>\n  <p>x</p>\n</div>");

    let document = parse(&["<!--x-->", "<div>", "<p>x</p>", "</div>"]);
    assert_eq!(document.sections()[0].code_snippet(), "<p>x</p>");
}

#[test]
fn element_sorting_moves_single_sidebar() {
    let dialect = Dialect::shared();
    let mut document = Document::new(dialect.clone());
    for preview in ["<body><div></div>", "<amp-sidebar><child/></amp-sidebar>"] {
        let mut section = CodeSection::new(dialect.clone());
        section.append_preview(preview);
        document.add_section(section);
    }

    ElementSorting::apply(&mut document);

    assert_eq!(document.elements_after_body, "<amp-sidebar><child/></amp-sidebar>");
    assert!(!document.sections()[1].preview().contains("amp-sidebar"));
    assert_eq!(document.sections()[0].preview(), "<body><div></div>\n");
}

#[test]
fn element_sorting_moves_every_occurrence() {
    let input = [
        "<html ⚡>",
        BODY,
        "<!-- A menu -->",
        "<amp-sidebar id=\"one\" layout=\"nodisplay\">",
        "  <p>one</p>",
        "</amp-sidebar>",
        "<!-- A banner -->",
        "<amp-app-banner id=\"banner\">",
        "  <p>banner</p>",
        "</amp-app-banner>",
        "<!-- Another menu -->",
        "<amp-sidebar id=\"two\" layout=\"nodisplay\">",
        "  <p>two</p>",
        "</amp-sidebar>",
        "<p>content</p>",
        BODY_END,
    ]
    .join("\n");

    let document = parse_sample(&input, None).unwrap();

    let moved = &document.elements_after_body;
    let one = moved.find("id=\"one\"").unwrap();
    let two = moved.find("id=\"two\"").unwrap();
    let banner = moved.find("id=\"banner\"").unwrap();
    assert!(one < two && two < banner);
    for section in document.sections() {
        assert!(!section.preview().contains("<amp-sidebar"));
        assert!(!section.preview().contains("<amp-app-banner"));
    }
    assert!(document
        .sections()
        .iter()
        .any(|s| s.preview().contains("<p>content</p>")));
}

#[test]
fn serializes_documents() {
    let document = parse_sample(&[COMMENT, TAG].join("\n"), None).unwrap();
    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json["variant"], "web");
    assert_eq!(json["sections"][0]["doc"], "comment\n");
    assert_eq!(json["lang"], "en");
}
