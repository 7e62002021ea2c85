#[cfg(test)]
mod verify {
    use pretty_assertions::assert_eq;

    use htmlfmt::language::*;
    use htmlfmt::parsing::parse;
    use htmlfmt::parsing::parser::Parser;

    fn element<'a, 'i>(node: &'a Node<'i>) -> &'a Element<'i> {
        match node {
            Node::Element(element) => element,
            _ => panic!("expected an element, got {:?}", node),
        }
    }

    #[test]
    fn elements_and_text() {
        let document = parse("<div class=\"a\">hello <b>world</b></div>").unwrap();

        assert_eq!(
            document
                .children
                .len(),
            1
        );
        let div = element(&document.children[0]);
        assert_eq!(div.name, "div");
        assert_eq!(div.id, 0);
        assert_eq!(div.span, Span::new(0, 39));
        assert_eq!(div.open, Span::new(0, 15));
        assert_eq!(
            div.end_tag
                .as_ref()
                .map(|tag| tag.raw),
            Some("</div>")
        );

        let class = div
            .attribute("CLASS")
            .unwrap();
        assert_eq!(
            class
                .value
                .as_ref()
                .map(|value| (value.raw, value.quote)),
            Some(("a", Some('"')))
        );

        assert_eq!(
            div.children
                .len(),
            2
        );
        match &div.children[0] {
            Node::Text(text) => {
                assert_eq!(text.raw, "hello ");
                assert_eq!(
                    text.fragments,
                    vec![Fragment::Characters("hello"), Fragment::Whitespace(" ")]
                );
            }
            node => panic!("expected text, got {:?}", node),
        }

        let b = element(&div.children[1]);
        assert_eq!(b.name, "b");
        assert_eq!(b.id, 2);
        assert_eq!(document.count, 4);
    }

    #[test]
    fn attribute_forms() {
        let document = parse("<input type=checkbox checked value = 'x' data-a=\"\">").unwrap();
        let input = element(&document.children[0]);

        let summary: Vec<(&str, Option<&str>, Option<char>)> = input
            .attributes
            .iter()
            .map(|attribute| {
                (
                    attribute.name,
                    attribute
                        .value
                        .as_ref()
                        .map(|value| value.raw),
                    attribute
                        .value
                        .as_ref()
                        .and_then(|value| value.quote),
                )
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("type", Some("checkbox"), None),
                ("checked", None, None),
                ("value", Some("x"), Some('\'')),
                ("data-a", Some(""), Some('"')),
            ]
        );
        assert_eq!(
            input.attributes[2]
                .value
                .as_ref()
                .map(|value| value.before),
            Some(" = ")
        );
        assert!(input.end_tag.is_none());
    }

    #[test]
    fn void_and_self_closing() {
        let document = parse("<p>a<br>b<x/>c</p>").unwrap();
        let p = element(&document.children[0]);

        let br = element(&p.children[1]);
        assert_eq!(br.ending, Ending::Open);
        assert!(br.is_empty());

        let x = element(&p.children[3]);
        assert_eq!(x.ending, Ending::SelfClosing);
        assert!(x.end_tag.is_none());
    }

    #[test]
    fn raw_text_is_not_parsed() {
        let document = parse("<script>if (a<b) { document.write('</p>'); }</script>").unwrap();
        let script = element(&document.children[0]);

        match &script.children[..] {
            [Node::Verbatim(verbatim)] => {
                assert_eq!(verbatim.raw, "if (a<b) { document.write('</p>'); }");
            }
            children => panic!("expected verbatim content, got {:?}", children),
        }
        assert!(script
            .end_tag
            .is_some());
    }

    #[test]
    fn comments_doctype_and_cdata() {
        let document = parse("<!DOCTYPE html><!-- c --><![CDATA[ x < y ]]><?xml version=\"1.0\"?>").unwrap();

        let kinds: Vec<&str> = document
            .children
            .iter()
            .map(|node| match node {
                Node::Doctype(_) => "doctype",
                Node::Comment(_) => "comment",
                Node::Verbatim(_) => "verbatim",
                Node::Element(_) => "element",
                Node::Text(_) => "text",
            })
            .collect();

        assert_eq!(kinds, vec!["doctype", "comment", "verbatim", "doctype"]);
    }

    #[test]
    fn implied_end_tags() {
        let document = parse("<ul><li>one<li>two</ul><p>a<div>b</div>").unwrap();

        let ul = element(&document.children[0]);
        assert_eq!(
            ul.children
                .len(),
            2
        );
        let first = element(&ul.children[0]);
        assert!(first
            .end_tag
            .is_none());
        assert_eq!(first.span, Span::new(4, 11));

        // <div> closes the open paragraph
        let p = element(&document.children[1]);
        assert_eq!(
            p.children
                .len(),
            1
        );
        let div = element(&document.children[2]);
        assert_eq!(div.name, "div");
    }

    #[test]
    fn entities_in_text() {
        let document = parse("a&amp;b &#x41; &#65; & c").unwrap();

        match &document.children[0] {
            Node::Text(text) => {
                assert_eq!(
                    text.fragments,
                    vec![
                        Fragment::Characters("a"),
                        Fragment::Entity("&amp;"),
                        Fragment::Characters("b"),
                        Fragment::Whitespace(" "),
                        Fragment::Entity("&#x41;"),
                        Fragment::Whitespace(" "),
                        Fragment::Entity("&#65;"),
                        Fragment::Whitespace(" "),
                        Fragment::Characters("&"),
                        Fragment::Whitespace(" "),
                        Fragment::Characters("c"),
                    ]
                );
            }
            node => panic!("expected text, got {:?}", node),
        }
    }

    #[test]
    fn parser_can_be_reused() {
        let mut input = Parser::new();

        input.initialize("<p>one</p>");
        let first = input
            .read_document()
            .unwrap();
        assert_eq!(first.count, 2);

        input.initialize("text");
        let second = input
            .read_document()
            .unwrap();
        assert_eq!(second.count, 1);
    }
}
