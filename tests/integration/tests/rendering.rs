//! End-to-end rendering through the markly entry points.

use markly::{Config, Document, Extensions, ParseOptions, RenderOptions};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_render_html() {
    let html = markly::render_html("Hi *there*", &ParseOptions::default(), &RenderOptions::default())
        .unwrap();

    assert_eq!(html, "<p>Hi <em>there</em></p>\n");
}

#[test]
fn test_smart_quotes_and_hard_breaks() {
    let config = Config::from_json(r#"{ "parse": { "smart": true }, "render": { "hard_breaks": true } }"#)
        .unwrap();

    assert_eq!(
        markly::render_html_with_config("\"foo\"\nbaz", &config).unwrap(),
        "<p>“foo”<br />\nbaz</p>\n"
    );
}

#[rstest]
#[case::dashes("a -- b --- c", "<p>a – b — c</p>\n")]
#[case::ellipsis("wait...", "<p>wait…</p>\n")]
#[case::single_quotes("'quoted'", "<p>‘quoted’</p>\n")]
fn test_smart_punctuation(#[case] source: &str, #[case] expected: &str) {
    let options = ParseOptions {
        smart: true,
        ..ParseOptions::default()
    };

    assert_eq!(
        markly::render_html(source, &options, &RenderOptions::default()).unwrap(),
        expected
    );
}

#[test]
fn test_unknown_extension_is_an_error() {
    let result = Config::new().with_extension_names(["table", "emoji"]);

    assert!(matches!(result, Err(markly::Error::Parse(_))));
}

#[test]
fn test_gfm_document() {
    let options = ParseOptions::gfm();
    let render = RenderOptions {
        extensions: Extensions::gfm(),
        ..RenderOptions::default()
    };
    let doc = Document::parse(
        "Visit https://example.com\n\n| a |\n| - |\n| ~~b~~ |\n",
        &options,
    )
    .unwrap();

    let html = doc.to_html(&render);

    assert!(html.starts_with(
        "<p>Visit <a href=\"https://example.com\">https://example.com</a></p>\n<table>"
    ));
    assert!(html.contains("<td><del>b</del></td>"));
}

#[test]
fn test_headings_and_ids_agree() {
    let doc = Document::parse(
        "# Deployment\n\n## Deployment\n\n### Deployment\n",
        &ParseOptions::default(),
    )
    .unwrap();

    let anchors: Vec<String> = doc
        .headings(1, 6)
        .into_iter()
        .map(|heading| heading.anchor)
        .collect();
    assert_eq!(anchors, ["deployment", "deployment-2", "deployment-3"]);

    let html = doc.to_html(&RenderOptions {
        ids: true,
        ..RenderOptions::default()
    });
    assert_eq!(
        html,
        "<section id=\"deployment\"><h1>Deployment</h1>\n\
         <section id=\"deployment-2\"><h2>Deployment</h2>\n\
         <section id=\"deployment-3\"><h3>Deployment</h3>\n\
         </section></section></section>"
    );
}

#[test]
fn test_commonmark_reparses_to_same_html() {
    let source = "# Title\n\n> quoted *text*\n\n1. one\n2. two\n\nDone.\n\n```sh\necho hi\n```\n";
    let doc = Document::parse(source, &ParseOptions::default()).unwrap();

    let markdown = doc.to_commonmark(&RenderOptions::default());
    let reparsed = Document::parse(&markdown, &ParseOptions::default()).unwrap();

    assert_eq!(
        reparsed.to_html(&RenderOptions::default()),
        doc.to_html(&RenderOptions::default())
    );
}

#[test]
fn test_json_view() {
    let doc = Document::parse("# Hi\n", &ParseOptions::default()).unwrap();

    let json = serde_json::to_value(doc.view()).unwrap();

    assert_eq!(json["type"], "document");
    assert_eq!(json["children"][0]["type"], "header");
    assert_eq!(json["children"][0]["data"]["level"], 1);
    assert_eq!(json["children"][0]["children"][0]["literal"], "Hi");
}
