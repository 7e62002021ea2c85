//! Fixed knowledge about HTML elements, independent of any configuration.

/// Elements that never have content or an end tag.
const VOID: &[&str] = &[
    "area", "base", "basefont", "br", "col", "embed", "frame", "hr", "img", "input", "keygen",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT: &[&str] = &["script", "style", "textarea", "title", "xmp"];

/// Start tags that implicitly close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "details",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

fn listed(list: &[&str], name: &str) -> bool {
    list.iter()
        .any(|entry| entry.eq_ignore_ascii_case(name))
}

pub fn is_void(name: &str) -> bool {
    listed(VOID, name)
}

pub fn is_raw_text(name: &str) -> bool {
    listed(RAW_TEXT, name)
}

/// Whether the start of a `next` element ends an open `current` element
/// whose end tag is optional.
pub fn is_implied_end(current: &str, next: &str) -> bool {
    let is = |name: &str| current.eq_ignore_ascii_case(name);

    if is("p") {
        listed(CLOSES_PARAGRAPH, next)
    } else if is("li") {
        next.eq_ignore_ascii_case("li")
    } else if is("dt") || is("dd") {
        listed(&["dt", "dd"], next)
    } else if is("tr") {
        listed(&["tr", "tbody", "thead", "tfoot"], next)
    } else if is("td") || is("th") {
        listed(&["td", "th", "tr", "tbody", "thead", "tfoot"], next)
    } else if is("option") {
        listed(&["option", "optgroup"], next)
    } else if is("thead") || is("tbody") {
        listed(&["tbody", "tfoot"], next)
    } else {
        false
    }
}
