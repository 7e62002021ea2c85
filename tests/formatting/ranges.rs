#[cfg(test)]
mod verify {
    use pretty_assertions::assert_eq;

    use htmlfmt::config::Configuration;
    use htmlfmt::{format, reformat_range};

    const PAGE: &str = "<html>\n  <head><title>Simple jsp page</title></head>\n  <body>\n<p>Place your co</p>\n<p>ntent here</p>\n</body>\n</html>";

    fn body(text: &str) -> (usize, usize) {
        let start = text
            .find("<body>")
            .unwrap();
        let end = text
            .find("</body>")
            .unwrap()
            + "</body>".len();
        (start, end)
    }

    #[test]
    fn reformat_body_of_page() {
        let config = Configuration::default();
        let (start, end) = body(PAGE);

        let result = reformat_range(PAGE, &config, start, end).unwrap();
        assert_eq!(
            result,
            "<html>\n  <head><title>Simple jsp page</title></head>\n<body>\n<p>Place your co</p>\n<p>ntent here</p>\n</body>\n</html>"
        );
    }

    #[test]
    fn head_untouched_by_body_reformat() {
        let config = Configuration::default();
        let (start, end) = body(PAGE);

        let result = reformat_range(PAGE, &config, start, end).unwrap();
        let head = "<html>\n  <head><title>Simple jsp page</title></head>\n";
        assert!(result.starts_with(head));
        assert!(result.ends_with("\n</html>"));
    }

    #[test]
    fn reversed_range_is_the_same_range() {
        let config = Configuration::default();
        let (start, end) = body(PAGE);

        assert_eq!(
            reformat_range(PAGE, &config, end, start).unwrap(),
            reformat_range(PAGE, &config, start, end).unwrap()
        );
    }

    #[test]
    fn caret_inside_text() {
        let config = Configuration::default();
        let text = "<div>\n<p>aaa   bbb</p>\n<p>ccc   ddd</p>\n</div>";
        let caret = text
            .find("aaa")
            .unwrap()
            + 1;

        assert_eq!(
            reformat_range(text, &config, caret, caret).unwrap(),
            "<div>\n<p>aaa bbb</p>\n<p>ccc   ddd</p>\n</div>"
        );
    }

    #[test]
    fn sibling_run_indented_from_container() {
        let config = Configuration::default();
        let text = "<div>\n  <p>a</p>\n<p>b   c</p>\n<p>c   d</p>\n</div>";
        let start = text
            .find("<p>a")
            .unwrap();
        let end = text
            .find("<p>b")
            .unwrap()
            + 2;

        assert_eq!(
            reformat_range(text, &config, start, end).unwrap(),
            "<div>\n    <p>a</p>\n    <p>b c</p>\n<p>c   d</p>\n</div>"
        );
    }

    #[test]
    fn run_starting_its_line_is_reindented() {
        let config = Configuration::default();
        let text = "<div>\n<p>one</p>\n<p>two</p>\n</div>";

        assert_eq!(
            reformat_range(text, &config, 6, 9).unwrap(),
            "<div>\n    <p>one</p>\n<p>two</p>\n</div>"
        );
        assert_eq!(
            reformat_range(text, &config, 7, 20).unwrap(),
            "<div>\n    <p>one</p>\n    <p>two</p>\n</div>"
        );
    }

    #[test]
    fn text_before_the_run_line_is_untouched() {
        let config = Configuration::default();
        let text = "<div>lead   words\n   <p>one</p>\n</div>";
        let start = text
            .find("<p>")
            .unwrap();

        assert_eq!(
            reformat_range(text, &config, start, start + 3).unwrap(),
            "<div>lead   words\n    <p>one</p>\n</div>"
        );
    }

    #[test]
    fn run_sharing_its_line_keeps_its_place() {
        let config = Configuration::default();
        let text = "<div>\n  x <b>one   two</b>\n</div>";
        let start = text
            .find("<b>")
            .unwrap();

        assert_eq!(
            reformat_range(text, &config, start, start + 3).unwrap(),
            "<div>\n  x <b>one two</b>\n</div>"
        );
    }

    #[test]
    fn range_inside_preformatted_content() {
        let config = Configuration::default();
        let text = "<div>\n<pre>\n  keep    this\n</pre>\n</div>";
        let start = text
            .find("keep")
            .unwrap();

        assert_eq!(reformat_range(text, &config, start, start + 8).unwrap(), text);
    }

    #[test]
    fn range_outside_document() {
        let config = Configuration::default();
        let text = "<p>a   b</p>";

        assert_eq!(reformat_range(text, &config, 100, 200).unwrap(), text);
    }

    #[test]
    fn whole_document_range_matches_full_format() {
        let config = Configuration::default();
        let text = "<div><p>a</p>\n<p>b   c</p></div>\n";

        assert_eq!(
            reformat_range(text, &config, 0, text.len()).unwrap(),
            format(text, &config).unwrap()
        );
    }
}
