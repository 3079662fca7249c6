//! Integration tests for editing parsed documents.
//!
//! Each test parses a document, changes it through the arena and checks the
//! rendered HTML.

use markly::{
    AttributeError, Document, HtmlRenderer, ListType, Node, NodeId, NodeType, ParseOptions,
    RenderOptions,
};

fn document(text: &str) -> Document {
    markly::parse(text, &ParseOptions::default()).expect("Failed to parse")
}

fn html(doc: &Document) -> String {
    doc.to_html(&RenderOptions::default())
}

fn first_of(doc: &Document, node_type: NodeType) -> NodeId {
    doc.arena()
        .descendants(doc.root())
        .find(|&node| doc.arena().node_type(node) == node_type)
        .expect("node not found")
}

mod attributes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_type_can_change() {
        let mut doc = document("- Bullet\n- Bullet\n");
        let list = first_of(&doc, NodeType::List);

        doc.arena_mut().set_list_type(list, ListType::Ordered).unwrap();

        assert_eq!(doc.arena().list_type(list), Some(ListType::Ordered));
        assert_eq!(
            html(&doc),
            "<ol start=\"0\">\n<li>Bullet</li>\n<li>Bullet</li>\n</ol>\n"
        );
    }

    #[test]
    fn loosening_a_list_wraps_items_in_paragraphs() {
        let mut doc = document("- Bullet\n- Bullet\n");
        let list = first_of(&doc, NodeType::List);
        assert_eq!(doc.arena().list_tight(list), Some(true));

        doc.arena_mut().set_list_tight(list, false).unwrap();

        assert_eq!(
            html(&doc),
            "<ul>\n<li>\n<p>Bullet</p>\n</li>\n<li>\n<p>Bullet</p>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn fence_info_can_change() {
        let mut doc = document("``` ruby\nputs 'wow'\n```\n");
        let code = first_of(&doc, NodeType::CodeBlock);
        assert_eq!(doc.arena().fence_info(code), Some("ruby"));

        doc.arena_mut().set_fence_info(code, "perl").unwrap();

        assert_eq!(
            html(&doc),
            "<pre><code class=\"language-perl\">puts 'wow'\n</code></pre>\n"
        );
    }

    #[test]
    fn image_url_and_title_can_change() {
        let mut doc = document("![alt text](https://example.com/a.png)\n");
        let image = first_of(&doc, NodeType::Image);

        let arena = doc.arena_mut();
        arena.set_url(image, "https://github.com/favicon.ico").unwrap();
        arena.set_title(image, "Google").unwrap();

        assert!(html(&doc).contains(
            "<img src=\"https://github.com/favicon.ico\" alt=\"alt text\" title=\"Google\" />"
        ));
    }

    #[test]
    fn literal_can_change() {
        let mut doc = document("Hi *there*\n");
        let text = first_of(&doc, NodeType::Text);

        doc.arena_mut().set_literal(text, "Bye ").unwrap();

        assert_eq!(html(&doc), "<p>Bye <em>there</em></p>\n");
    }

    #[test]
    fn header_level_out_of_range_is_rejected() {
        let mut doc = document("## Title\n");
        let header = first_of(&doc, NodeType::Header);

        for level in [0, 7] {
            let result = doc.arena_mut().set_header_level(header, level);
            assert!(matches!(result, Err(AttributeError::OutOfRange { .. })));
        }
        assert_eq!(doc.arena().header_level(header), Some(2));
        assert_eq!(html(&doc), "<h2>Title</h2>\n");
    }

    #[test]
    fn negative_list_start_is_rejected() {
        let mut doc = document("3. one\n");
        let list = first_of(&doc, NodeType::List);

        let result = doc.arena_mut().set_list_start(list, -1);

        assert!(matches!(result, Err(AttributeError::OutOfRange { .. })));
        assert_eq!(doc.arena().list_start(list), Some(3));
    }

    #[test]
    fn attribute_on_wrong_node_type_is_rejected() {
        let mut doc = document("Just text\n");
        let para = first_of(&doc, NodeType::Paragraph);

        let result = doc.arena_mut().set_url(para, "https://example.com");

        assert!(matches!(result, Err(AttributeError::WrongType { .. })));
        assert_eq!(doc.arena().url(para), None);
    }
}

mod structure {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_before_root_fails() {
        let mut doc = document("Hi *there*\n");
        let root = doc.root();
        let para = doc.arena_mut().new_node(NodeType::Paragraph);

        assert!(!doc.arena_mut().insert_before(root, para));
        assert_eq!(html(&doc), "<p>Hi <em>there</em></p>\n");
    }

    #[test]
    fn insert_empty_paragraph_before() {
        let mut doc = document("Hi *there*\n");
        let para = first_of(&doc, NodeType::Paragraph);
        let empty = doc.arena_mut().new_node(NodeType::Paragraph);

        assert!(doc.arena_mut().insert_before(para, empty));

        assert_eq!(html(&doc), "<p></p>\n<p>Hi <em>there</em></p>\n");
    }

    #[test]
    fn prepend_and_append_children() {
        let mut doc = document("Hi *there*!\n");
        let para = first_of(&doc, NodeType::Paragraph);

        let arena = doc.arena_mut();
        let code = arena.alloc(Node::new(NodeType::Code).with_literal(""));
        let strong = arena.new_node(NodeType::Strong);
        assert!(arena.prepend_child(para, code));
        assert!(arena.append_child(para, strong));

        assert_eq!(
            html(&doc),
            "<p><code></code>Hi <em>there</em>!<strong></strong></p>\n"
        );
    }

    #[test]
    fn block_cannot_go_inside_paragraph() {
        let mut doc = document("Hi\n");
        let para = first_of(&doc, NodeType::Paragraph);
        let quote = doc.arena_mut().new_node(NodeType::BlockQuote);

        assert!(!doc.arena_mut().append_child(para, quote));
        assert_eq!(html(&doc), "<p>Hi</p>\n");
    }

    #[test]
    fn extract_children_of_header() {
        let mut doc = document("# Hello `World`\n");
        let header = first_of(&doc, NodeType::Header);

        let fragment = doc.arena_mut().extract_children(header);

        assert_eq!(doc.arena().node_type(fragment), NodeType::CustomInline);
        assert_eq!(doc.arena().first_child(header), None);
        assert_eq!(
            doc.render_node(fragment, &HtmlRenderer::new()),
            "Hello <code>World</code>"
        );
        assert_eq!(
            doc.render_node(fragment, &markly::CommonMarkRenderer::new()),
            "Hello `World`"
        );
    }

    #[test]
    fn append_fragment_before() {
        let mut doc = document("# Hello\n\nWorld\n");
        let header = doc.find_header("Hello").unwrap();
        let fragment = doc.parse_fragment("Goodbye").unwrap();

        assert!(doc.arena_mut().append_before(header, fragment));

        assert_eq!(html(&doc), "<p>Goodbye</p>\n<h1>Hello</h1>\n<p>World</p>\n");
    }

    #[test]
    fn append_fragment_after() {
        let mut doc = document("# Hello\n\nWorld\n");
        let header = doc.find_header("Hello").unwrap();
        let fragment = doc.parse_fragment("Goodbye").unwrap();

        assert!(doc.arena_mut().append_after(header, fragment));

        assert_eq!(html(&doc), "<h1>Hello</h1>\n<p>Goodbye</p>\n<p>World</p>\n");
    }

    #[test]
    fn find_missing_header() {
        let doc = document("# Hello\n");

        assert_eq!(doc.find_header("Goodbye"), None);
    }
}

mod sections {
    use super::*;
    use pretty_assertions::assert_eq;

    fn new_heading(doc: &mut Document) -> NodeId {
        let fragment = doc.parse_fragment("### New Heading").unwrap();
        doc.arena().first_child(fragment).unwrap()
    }

    #[test]
    fn replace_section_dropping_subsections() {
        let mut doc = document("# Hello\n\nWorld\n\n## Subheading\n");
        let header = doc.find_header("Hello").unwrap();
        let replacement = new_heading(&mut doc);

        assert!(doc.arena_mut().replace_section(header, replacement, true));

        assert_eq!(html(&doc), "<h3>New Heading</h3>\n");
    }

    #[test]
    fn replace_section_keeping_subsections() {
        let mut doc = document("# Hello\n\nWorld\n\n## Subheading\n");
        let header = doc.find_header("Hello").unwrap();
        let replacement = new_heading(&mut doc);

        assert!(doc.arena_mut().replace_section(header, replacement, false));

        assert_eq!(html(&doc), "<h3>New Heading</h3>\n<h2>Subheading</h2>\n");
    }

    #[test]
    fn replace_section_stops_at_sibling_section() {
        let mut doc = document("## One\n\ntext\n\n## Two\n\nmore\n");
        let header = doc.find_header("One").unwrap();
        let replacement = new_heading(&mut doc);

        assert!(doc.arena_mut().replace_section(header, replacement, true));

        assert_eq!(
            html(&doc),
            "<h3>New Heading</h3>\n<h2>Two</h2>\n<p>more</p>\n"
        );
    }

    #[test]
    fn replace_section_needs_a_header() {
        let mut doc = document("text\n");
        let para = first_of(&doc, NodeType::Paragraph);
        let replacement = new_heading(&mut doc);

        assert!(!doc.arena_mut().replace_section(para, replacement, true));
        assert_eq!(html(&doc), "<p>text</p>\n");
    }
}

mod copies {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dup_renders_identically() {
        let mut doc = document("Hi *there*\n");
        let para = first_of(&doc, NodeType::Paragraph);

        let copy = doc.arena_mut().dup(para);

        assert_ne!(copy, para);
        assert_eq!(doc.arena().parent(copy), None);
        assert_eq!(
            doc.render_node(copy, &HtmlRenderer::new()),
            doc.render_node(para, &HtmlRenderer::new())
        );
    }

    #[test]
    fn dup_is_isolated_from_original() {
        let mut doc = document("Hi *there*\n");
        let para = first_of(&doc, NodeType::Paragraph);
        let copy = doc.arena_mut().dup(para);

        let copied_text = doc.arena().first_child(copy).unwrap();
        doc.arena_mut().set_literal(copied_text, "Bye ").unwrap();

        assert_eq!(html(&doc), "<p>Hi <em>there</em></p>\n");
        assert_eq!(
            doc.render_node(copy, &HtmlRenderer::new()),
            "<p>Bye <em>there</em></p>\n"
        );
    }

    #[test]
    fn import_between_documents() {
        let mut target = document("# Target\n");
        let source = document("Imported *text*\n");
        let para = source.arena().first_child(source.root()).unwrap();

        let copy = target.import(&source, para);
        let root = target.root();
        assert!(target.arena_mut().append_child(root, copy));

        assert_eq!(
            html(&target),
            "<h1>Target</h1>\n<p>Imported <em>text</em></p>\n"
        );
        assert_eq!(html(&source), "<p>Imported <em>text</em></p>\n");
    }
}
