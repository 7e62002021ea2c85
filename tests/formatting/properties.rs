#[cfg(test)]
mod verify {
    use pretty_assertions::assert_eq;

    use htmlfmt::config::{Configuration, QuoteStyle, WrapMode};
    use htmlfmt::format;

    const SAMPLES: &[&str] = &[
        "<div> text <div/> text <div> text </div> </div>",
        "<div>Re\nSharper </div>",
        "<html><body><table></table> text</body></html>",
        "<!DOCTYPE html>\n<html>\n<head>\n<title>T</title>\n</head>\n<body>\n<h1 id=\"x\">Heading</h1>\n<p>Some <b>bold</b> and <i>italic</i> text that goes on for a while so that narrow margins have something to wrap.</p>\n<ul><li>one<li>two</ul>\n</body>\n</html>\n",
        "<p><b>aaaa bbbb <i>cccc</i></b></p>",
        "<form action=\"/submit\" method=\"post\" class=\"form\" id=\"main\">\n<input type=text name=q>\n</form>",
        "<div><!-- a comment --><span> x </span>&nbsp;&amp;<br>tail</div>",
    ];

    fn configurations() -> Vec<Configuration> {
        let mut result = vec![];
        for margin in [20, 80, 120] {
            for keep in [true, false] {
                result.push(Configuration {
                    right_margin: margin,
                    keep_line_breaks: keep,
                    keep_line_breaks_in_text: keep,
                    ..Configuration::default()
                });
            }
        }
        result
    }

    #[test]
    fn formatting_is_idempotent() {
        for config in configurations() {
            for sample in SAMPLES {
                let once = format(sample, &config).unwrap();
                let twice = format(&once, &config).unwrap();
                assert_eq!(twice, once, "sample {:?} at margin {}", sample, config.right_margin);
            }
        }
    }

    #[test]
    fn verbatim_content_survives() {
        let code = "<code class=\"language-javascript\">function test(i) {\n    if (i===1) {\n        console.log('output');\n    }\n}</code></pre>";
        let script = "\n  var  a = 1;\n    if (a < 2) {}\n</script>";
        let input = format!(
            "<div>\n<pre>{}\n<p>a</p>\n<script>{}\n</div>",
            code, script
        );

        for config in configurations() {
            let result = format(&input, &config).unwrap();
            assert!(result.contains(code), "pre content changed in {:?}", result);
            assert!(result.contains(script), "script content changed in {:?}", result);
        }
    }

    #[test]
    fn entities_are_never_split() {
        let config = Configuration {
            right_margin: 2,
            ..Configuration::default()
        };
        let result = format("<html><a>&aelig;</a></html>", &config).unwrap();

        assert!(result
            .lines()
            .any(|line| line.contains("&aelig;")));
    }

    #[test]
    fn unclosed_preserved_elements_are_stable() {
        let config = Configuration::default();

        for (input, expected) in [
            ("<div>\n<p>x</p>\n<span>a\n</div>", "<div>\n    <p>x</p>\n    <span>a\n</div>"),
            ("<div><pre>a\n</div>", "<div>\n    <pre>a\n</div>"),
            ("<div><pre>a</div>", "<div>\n    <pre>a\n</div>"),
            ("<section>\n<script>var a;\n\n", "<section>\n    <script>var a;\n"),
        ] {
            let once = format(input, &config).unwrap();
            assert_eq!(once, expected);

            let twice = format(&once, &config).unwrap();
            assert_eq!(twice, once);

            let thrice = format(&twice, &config).unwrap();
            assert_eq!(thrice, once);
        }
    }

    #[test]
    fn blank_lines_collapse() {
        let config = Configuration {
            keep_blank_lines: 0,
            ..Configuration::default()
        };
        assert_eq!(
            format("<root>\n\n<a/></root>", &config).unwrap(),
            "<root>\n    <a/></root>"
        );

        let config = Configuration {
            keep_blank_lines: 0,
            do_not_indent_children_of: vec!["root".to_string()],
            ..Configuration::default()
        };
        assert_eq!(
            format("<root>\n\n<a/></root>", &config).unwrap(),
            "<root>\n<a/></root>"
        );

        let input = "<div>\n<p>a</p>\n\n\n\n<p>b</p>\n</div>";
        let config = Configuration {
            keep_blank_lines: 0,
            ..Configuration::default()
        };
        assert_eq!(
            format(input, &config).unwrap(),
            "<div>\n    <p>a</p>\n    <p>b</p>\n</div>"
        );

        let config = Configuration {
            keep_blank_lines: 1,
            ..Configuration::default()
        };
        assert_eq!(
            format(input, &config).unwrap(),
            "<div>\n    <p>a</p>\n\n    <p>b</p>\n</div>"
        );
    }

    #[test]
    fn quote_enforcement() {
        let config = Configuration {
            quote_style: QuoteStyle::Single,
            enforce_quotes: true,
            ..Configuration::default()
        };
        assert_eq!(
            format("<div class=\"x\">", &config).unwrap(),
            "<div class='x'>"
        );

        let config = Configuration {
            enforce_quotes: false,
            ..config
        };
        assert_eq!(
            format("<div class=\"x\">", &config).unwrap(),
            "<div class=\"x\">"
        );

        let config = Configuration {
            quote_style: QuoteStyle::AsIs,
            enforce_quotes: true,
            ..Configuration::default()
        };
        assert_eq!(
            format("<div class='x' id=y>", &config).unwrap(),
            "<div class='x' id=y>"
        );
    }

    #[test]
    fn attributes_not_wrapped() {
        let config = Configuration {
            right_margin: 10,
            attribute_wrap: WrapMode::DoNotWrap,
            text_wrap: WrapMode::DoNotWrap,
            ..Configuration::default()
        };
        let input = "<div id=\"a\"\n     class=\"b\" title=\"c\">x</div>";
        assert_eq!(format(input, &config).unwrap(), input);

        let config = Configuration {
            keep_line_breaks: false,
            ..config
        };
        assert_eq!(format(input, &config).unwrap(), input);

        let input = "<div id=\"a\" class=\"b\" title=\"c\">x</div>";
        assert_eq!(format(input, &config).unwrap(), input);
    }

    #[test]
    fn narrow_tables_keep_short_rows_indented() {
        let config = Configuration {
            do_not_align_children_of_min_lines: 3,
            ..Configuration::default()
        };
        let result = format(
            "<table>\n<tr>\n<td>1</td>\n<td>2</td>\n</tr>\n<tr>\n<td>3</td>\n</tr>\n</table>",
            &config,
        )
        .unwrap();

        assert_eq!(
            result,
            "<table>\n<tr>\n<td>1</td>\n<td>2</td>\n</tr>\n<tr>\n    <td>3</td>\n</tr>\n</table>"
        );
        assert_eq!(format(&result, &config).unwrap(), result);

        let result = format("<div><p>a</p><p>b</p></div>", &config).unwrap();
        assert_eq!(result, "<div>\n<p>a</p>\n<p>b</p>\n</div>");
        assert_eq!(format(&result, &config).unwrap(), result);
    }
}
