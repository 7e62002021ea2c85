//! Types representing the syntax tree of an HTML document

/// A half-open range of byte offsets into the source text.
#[derive(Eq, Debug, PartialEq, Clone, Copy, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether any part of this span lies within `[start, end)`. An empty
    /// query range is treated as a caret and overlaps the span it sits in.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        if start == end {
            self.start <= start && start < self.end
        } else {
            self.start < end && start < self.end
        }
    }

    pub fn contains(&self, start: usize, end: usize) -> bool {
        self.start <= start && end <= self.end
    }
}

#[derive(Eq, Debug, PartialEq)]
pub struct Document<'i> {
    pub source: &'i str,
    pub children: Vec<Node<'i>>,
    /// Number of nodes in the tree; node ids are `0..count`.
    pub count: usize,
}

#[derive(Eq, Debug, PartialEq)]
pub enum Node<'i> {
    Element(Element<'i>),
    Text(Text<'i>),
    Comment(Comment<'i>),
    Verbatim(Verbatim<'i>),
    Doctype(Doctype<'i>),
}

impl<'i> Node<'i> {
    pub fn id(&self) -> usize {
        match self {
            Node::Element(element) => element.id,
            Node::Text(text) => text.id,
            Node::Comment(comment) => comment.id,
            Node::Verbatim(verbatim) => verbatim.id,
            Node::Doctype(doctype) => doctype.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Element(element) => element.span,
            Node::Text(text) => text.span,
            Node::Comment(comment) => comment.span,
            Node::Verbatim(verbatim) => verbatim.span,
            Node::Doctype(doctype) => doctype.span,
        }
    }
}

/// How the start tag of an element was terminated.
#[derive(Eq, Debug, PartialEq, Clone, Copy)]
pub enum Ending {
    Open,        // >
    SelfClosing, // />
}

#[derive(Eq, Debug, PartialEq)]
pub struct Element<'i> {
    pub id: usize,
    pub name: &'i str,
    pub attributes: Vec<Attribute<'i>>,
    /// Whitespace between the last attribute (or the name) and the `>`.
    pub trailing: &'i str,
    pub ending: Ending,
    pub children: Vec<Node<'i>>,
    pub end_tag: Option<EndTag<'i>>,
    /// The whole element, from the `<` of the start tag to the end of the
    /// end tag (or of its last child when there is no end tag).
    pub span: Span,
    /// The start tag alone.
    pub open: Span,
}

impl<'i> Element<'i> {
    pub fn is(&self, name: &str) -> bool {
        self.name
            .eq_ignore_ascii_case(name)
    }

    /// Look up an attribute by name. Duplicates are kept in the tree; the
    /// first one wins here, as it does in browsers.
    pub fn attribute(&self, name: &str) -> Option<&Attribute<'i>> {
        self.attributes
            .iter()
            .find(|attribute| {
                attribute
                    .name
                    .eq_ignore_ascii_case(name)
            })
    }

    /// Span of everything between the start tag and the end tag.
    pub fn content(&self) -> Span {
        let end = match &self.end_tag {
            Some(tag) => tag
                .span
                .start,
            None => self
                .span
                .end,
        };
        Span::new(self.open.end, end)
    }

    pub fn is_empty(&self) -> bool {
        self.children
            .is_empty()
    }

    /// End of the source copied through when the content is preserved. An
    /// element closed implicitly leaves its trailing whitespace to whatever
    /// follows it.
    pub fn preserved_end(&self, source: &str) -> usize {
        match self.end_tag {
            Some(_) => self.span.end,
            None => {
                let content = &source[self.open.end..self.span.end];
                self.open.end
                    + content
                        .trim_end_matches(is_whitespace)
                        .len()
            }
        }
    }
}

#[derive(Eq, Debug, PartialEq)]
pub struct Attribute<'i> {
    /// Whitespace preceding the attribute name.
    pub gap: &'i str,
    pub name: &'i str,
    pub value: Option<AttributeValue<'i>>,
    pub span: Span,
}

#[derive(Eq, Debug, PartialEq)]
pub struct AttributeValue<'i> {
    /// Literal text between the name and the value: `=` and any whitespace
    /// around it.
    pub before: &'i str,
    /// The value without its quotes.
    pub raw: &'i str,
    pub quote: Option<char>,
}

#[derive(Eq, Debug, PartialEq)]
pub struct EndTag<'i> {
    pub name: &'i str,
    pub raw: &'i str,
    pub span: Span,
}

#[derive(Eq, Debug, PartialEq)]
pub struct Text<'i> {
    pub id: usize,
    pub raw: &'i str,
    pub fragments: Vec<Fragment<'i>>,
    pub span: Span,
}

/// Pieces of a text run. They partition the raw text exactly.
#[derive(Eq, Debug, PartialEq, Clone, Copy)]
pub enum Fragment<'i> {
    Whitespace(&'i str),
    Characters(&'i str),
    Entity(&'i str),
}

impl<'i> Fragment<'i> {
    pub fn as_str(&self) -> &'i str {
        match self {
            Fragment::Whitespace(s) => *s,
            Fragment::Characters(s) => *s,
            Fragment::Entity(s) => *s,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Fragment::Whitespace(_))
    }
}

/// A maximal run of non-whitespace fragments; the unit of line wrapping.
#[derive(Eq, Debug, PartialEq, Clone, Copy)]
pub struct Word<'a, 'i> {
    pub fragments: &'a [Fragment<'i>],
}

impl<'a, 'i> Word<'a, 'i> {
    pub fn width(&self) -> usize {
        self.fragments
            .iter()
            .map(|fragment| {
                fragment
                    .as_str()
                    .chars()
                    .count()
            })
            .sum()
    }
}

/// A text node split into leading whitespace, words with the whitespace
/// between them, and trailing whitespace.
#[derive(Eq, Debug, PartialEq)]
pub struct Run<'a, 'i> {
    pub leading: &'i str,
    pub words: Vec<Word<'a, 'i>>,
    /// `gaps[k]` is the whitespace between `words[k]` and `words[k + 1]`.
    pub gaps: Vec<&'i str>,
    pub trailing: &'i str,
}

impl<'i> Text<'i> {
    pub fn is_whitespace(&self) -> bool {
        self.fragments
            .iter()
            .all(Fragment::is_whitespace)
    }

    pub fn run(&self) -> Run<'_, 'i> {
        let mut leading = "";
        let mut trailing = "";
        let mut words = Vec::new();
        let mut gaps = Vec::new();

        let mut start = None;
        for (i, fragment) in self
            .fragments
            .iter()
            .enumerate()
        {
            match fragment {
                Fragment::Whitespace(ws) => {
                    if let Some(first) = start.take() {
                        words.push(Word {
                            fragments: &self.fragments[first..i],
                        });
                        trailing = *ws;
                    } else if words.is_empty() {
                        leading = *ws;
                    }
                }
                _ => {
                    if start.is_none() {
                        if !words.is_empty() {
                            gaps.push(trailing);
                        }
                        trailing = "";
                        start = Some(i);
                    }
                }
            }
        }
        if let Some(first) = start {
            words.push(Word {
                fragments: &self.fragments[first..],
            });
        }

        Run {
            leading,
            words,
            gaps,
            trailing,
        }
    }
}

#[derive(Eq, Debug, PartialEq)]
pub struct Comment<'i> {
    pub id: usize,
    pub raw: &'i str,
    pub span: Span,
}

/// Raw content that is never reformatted: CDATA sections and the bodies of
/// raw text elements such as `<script>` and `<style>`.
#[derive(Eq, Debug, PartialEq)]
pub struct Verbatim<'i> {
    pub id: usize,
    pub raw: &'i str,
    pub span: Span,
}

/// Markup declarations (`<!DOCTYPE html>`) and processing instructions
/// (`<?xml version="1.0"?>`).
#[derive(Eq, Debug, PartialEq)]
pub struct Doctype<'i> {
    pub id: usize,
    pub raw: &'i str,
    pub span: Span,
}

/// Whitespace as HTML defines it. Notably excludes U+00A0.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

pub fn count_newlines(text: &str) -> usize {
    text.bytes()
        .filter(|&b| b == b'\n')
        .count()
}
