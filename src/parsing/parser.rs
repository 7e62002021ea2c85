use tracing::{debug, warn};

use crate::config::tags;
use crate::language::*;
use crate::parsing::scope::{Open, Scope};

/// Nesting beyond this is treated as unreadable input rather than markup.
pub const MAXIMUM_DEPTH: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("elements nested more than {max} deep", max = MAXIMUM_DEPTH)]
    TooDeep { offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::TooDeep { offset } => *offset,
        }
    }
}

pub fn parse_document(content: &str) -> Result<Document<'_>, ParseError> {
    let mut input = Parser::new();
    input.initialize(content);
    input.read_document()
}

/// The parts of a start tag, before we know whether it opens an element
/// with content.
struct StartTag<'i> {
    name: &'i str,
    attributes: Vec<Attribute<'i>>,
    trailing: &'i str,
    ending: Ending,
    span: Span,
}

#[derive(Debug)]
pub struct Parser<'i> {
    original: &'i str,
    offset: usize,
    next: usize,
    text: Option<usize>,
    scope: Scope<'i>,
}

impl<'i> Parser<'i> {
    pub fn new() -> Parser<'i> {
        Parser {
            original: "",
            offset: 0,
            next: 0,
            text: None,
            scope: Scope::new(),
        }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.original = content;
        self.offset = 0;
        self.next = 0;
        self.text = None;
        self.scope = Scope::new();
    }

    /// Read the whole input into a Document. Malformed markup is recovered
    /// from by treating it as text, so the only failure is input nested too
    /// deeply to be sensible.
    pub fn read_document(&mut self) -> Result<Document<'i>, ParseError> {
        let source = self.original;

        while self.offset < source.len() {
            let rest = &source[self.offset..];
            let position = match rest.find('<') {
                Some(i) => self.offset + i,
                None => {
                    self.mark_text(self.offset);
                    self.offset = source.len();
                    break;
                }
            };
            if position > self.offset {
                self.mark_text(self.offset);
            }

            self.read_markup(position)?;
        }

        self.flush_text(source.len());

        let scope = std::mem::replace(&mut self.scope, Scope::new());
        let children = scope.finish(source.len());

        Ok(Document {
            source,
            children,
            count: self.next,
        })
    }

    fn identifier(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }

    fn mark_text(&mut self, start: usize) {
        if self
            .text
            .is_none()
        {
            self.text = Some(start);
        }
    }

    fn flush_text(&mut self, end: usize) {
        if let Some(start) = self
            .text
            .take()
        {
            if start < end {
                let raw = &self.original[start..end];
                let id = self.identifier();
                self.scope
                    .append(Node::Text(Text {
                        id,
                        raw,
                        fragments: fragments(raw),
                        span: Span::new(start, end),
                    }));
            }
        }
    }

    /// Give up on a construct that never terminates; the remainder of the
    /// input becomes text in whatever element is currently open.
    fn recover(&mut self, position: usize, problem: &str) {
        warn!(offset = position, "{}; keeping the rest as text", problem);
        self.mark_text(position);
        self.offset = self
            .original
            .len();
    }

    fn read_markup(&mut self, position: usize) -> Result<(), ParseError> {
        let source = self.original;
        let rest = &source[position..];
        let bytes = rest.as_bytes();

        if rest.starts_with("<!--") {
            match rest[4..].find("-->") {
                Some(i) => {
                    let end = position + 4 + i + 3;
                    self.flush_text(position);
                    let id = self.identifier();
                    self.scope
                        .append(Node::Comment(Comment {
                            id,
                            raw: &source[position..end],
                            span: Span::new(position, end),
                        }));
                    self.offset = end;
                }
                None => self.recover(position, "unterminated comment"),
            }
        } else if rest.starts_with("<![CDATA[") {
            match rest.find("]]>") {
                Some(i) => {
                    let end = position + i + 3;
                    self.flush_text(position);
                    let id = self.identifier();
                    self.scope
                        .append(Node::Verbatim(Verbatim {
                            id,
                            raw: &source[position..end],
                            span: Span::new(position, end),
                        }));
                    self.offset = end;
                }
                None => self.recover(position, "unterminated CDATA section"),
            }
        } else if matches!(bytes.get(1), Some(b'!') | Some(b'?')) {
            match rest.find('>') {
                Some(i) => {
                    let end = position + i + 1;
                    self.flush_text(position);
                    let id = self.identifier();
                    self.scope
                        .append(Node::Doctype(Doctype {
                            id,
                            raw: &source[position..end],
                            span: Span::new(position, end),
                        }));
                    self.offset = end;
                }
                None => self.recover(position, "unterminated declaration"),
            }
        } else if bytes.get(1) == Some(&b'/')
            && bytes
                .get(2)
                .is_some_and(u8::is_ascii_alphabetic)
        {
            self.read_end_tag(position);
        } else if bytes
            .get(1)
            .is_some_and(u8::is_ascii_alphabetic)
        {
            self.read_element(position)?;
        } else {
            // a bare '<' in running text
            self.mark_text(position);
            self.offset = position + 1;
        }

        Ok(())
    }

    fn read_end_tag(&mut self, position: usize) {
        let source = self.original;
        let end = match source[position..].find('>') {
            Some(i) => position + i + 1,
            None => {
                self.recover(position, "unterminated end tag");
                return;
            }
        };

        let raw = &source[position..end];
        let name = end_tag_name(raw);

        match self
            .scope
            .find(name)
        {
            Some(index) => {
                self.flush_text(position);
                while self
                    .scope
                    .depth()
                    > index + 1
                {
                    self.scope
                        .pop(position, None);
                }
                self.scope
                    .pop(
                        end,
                        Some(EndTag {
                            name,
                            raw,
                            span: Span::new(position, end),
                        }),
                    );
            }
            None => {
                debug!(offset = position, "stray end tag {}", raw);
                self.mark_text(position);
            }
        }

        self.offset = end;
    }

    fn read_element(&mut self, position: usize) -> Result<(), ParseError> {
        let tag = match self.read_start_tag(position) {
            Some(tag) => tag,
            None => {
                self.recover(position, "unterminated start tag");
                return Ok(());
            }
        };

        self.flush_text(position);

        while let Some(current) = self
            .scope
            .current()
        {
            if tags::is_implied_end(current, tag.name) {
                self.scope
                    .pop(position, None);
            } else {
                break;
            }
        }

        if self
            .scope
            .depth()
            >= MAXIMUM_DEPTH
        {
            return Err(ParseError::TooDeep { offset: position });
        }

        let id = self.identifier();

        if tag.ending == Ending::SelfClosing || tags::is_void(tag.name) {
            self.scope
                .append(Node::Element(Element {
                    id,
                    name: tag.name,
                    attributes: tag.attributes,
                    trailing: tag.trailing,
                    ending: tag.ending,
                    children: vec![],
                    end_tag: None,
                    span: tag.span,
                    open: tag.span,
                }));
            self.offset = tag
                .span
                .end;
        } else if tags::is_raw_text(tag.name) {
            self.read_raw_text(id, tag);
        } else {
            self.offset = tag
                .span
                .end;
            self.scope
                .push(Open {
                    id,
                    name: tag.name,
                    attributes: tag.attributes,
                    trailing: tag.trailing,
                    open: tag.span,
                    children: vec![],
                });
        }

        Ok(())
    }

    /// Content of script, style and friends runs to the matching end tag
    /// without being looked at.
    fn read_raw_text(&mut self, id: usize, tag: StartTag<'i>) {
        let source = self.original;
        let start = tag
            .span
            .end;

        let close = find_end_tag(source, start, tag.name).and_then(|position| {
            source[position..]
                .find('>')
                .map(|i| (position, position + i + 1))
        });
        let content_end = match close {
            Some((position, _)) => position,
            None => source.len(),
        };

        let mut children = vec![];
        if content_end > start {
            children.push(Node::Verbatim(Verbatim {
                id: self.identifier(),
                raw: &source[start..content_end],
                span: Span::new(start, content_end),
            }));
        }

        let (end_tag, end) = match close {
            Some((position, end)) => {
                let raw = &source[position..end];
                (
                    Some(EndTag {
                        name: end_tag_name(raw),
                        raw,
                        span: Span::new(position, end),
                    }),
                    end,
                )
            }
            None => {
                debug!(offset = start, "unclosed <{}> runs to end of input", tag.name);
                (None, source.len())
            }
        };

        self.scope
            .append(Node::Element(Element {
                id,
                name: tag.name,
                attributes: tag.attributes,
                trailing: tag.trailing,
                ending: tag.ending,
                children,
                end_tag,
                span: Span::new(
                    tag.span
                        .start,
                    end,
                ),
                open: tag.span,
            }));
        self.offset = end;
    }

    /// Read `<name attr="value" ...>` starting at the '<'. Returns None if
    /// the tag never terminates, including because of an unmatched quote.
    fn read_start_tag(&self, position: usize) -> Option<StartTag<'i>> {
        let source = self.original;
        let bytes = source.as_bytes();
        let length = bytes.len();

        let mut i = position + 1;
        while i < length && !is_whitespace_byte(bytes[i]) && bytes[i] != b'>' && bytes[i] != b'/'
        {
            i += 1;
        }
        let name = &source[position + 1..i];

        let mut attributes = vec![];
        loop {
            let start = i;
            while i < length && is_whitespace_byte(bytes[i]) {
                i += 1;
            }
            let gap = &source[start..i];

            if i >= length {
                return None;
            }
            if bytes[i] == b'>' {
                return Some(StartTag {
                    name,
                    attributes,
                    trailing: gap,
                    ending: Ending::Open,
                    span: Span::new(position, i + 1),
                });
            }
            if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>') {
                return Some(StartTag {
                    name,
                    attributes,
                    trailing: gap,
                    ending: Ending::SelfClosing,
                    span: Span::new(position, i + 2),
                });
            }

            let begin = i;
            while i < length {
                let b = bytes[i];
                if is_whitespace_byte(b)
                    || b == b'='
                    || b == b'>'
                    || (b == b'/' && bytes.get(i + 1) == Some(&b'>'))
                {
                    break;
                }
                i += 1;
            }
            if i == begin {
                // a lone '=' where a name should be
                i += 1;
            }
            let name = &source[begin..i];

            let mut j = i;
            while j < length && is_whitespace_byte(bytes[j]) {
                j += 1;
            }

            let value = if j < length && bytes[j] == b'=' && name != "=" {
                j += 1;
                while j < length && is_whitespace_byte(bytes[j]) {
                    j += 1;
                }
                if j >= length {
                    return None;
                }
                let before = &source[i..j];

                match bytes[j] {
                    quote @ (b'"' | b'\'') => {
                        let close = source[j + 1..].find(quote as char)?;
                        let raw = &source[j + 1..j + 1 + close];
                        i = j + 1 + close + 1;
                        Some(AttributeValue {
                            before,
                            raw,
                            quote: Some(quote as char),
                        })
                    }
                    _ => {
                        let begin = j;
                        while j < length && !is_whitespace_byte(bytes[j]) && bytes[j] != b'>' {
                            j += 1;
                        }
                        i = j;
                        Some(AttributeValue {
                            before,
                            raw: &source[begin..j],
                            quote: None,
                        })
                    }
                }
            } else {
                None
            };

            attributes.push(Attribute {
                gap,
                name,
                value,
                span: Span::new(begin, i),
            });
        }
    }
}

fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
}

fn end_tag_name(raw: &str) -> &str {
    let name = &raw[2..];
    let end = name
        .find(|c: char| is_whitespace(c) || c == '>' || c == '/')
        .unwrap_or(name.len());
    &name[..end]
}

/// Find `</name` (case insensitively) at or after `from`, as the end of a
/// raw text element.
fn find_end_tag(source: &str, from: usize, name: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = from;

    while let Some(j) = source[i..].find("</") {
        let position = i + j;
        let start = position + 2;
        let end = start + name.len();

        if end <= bytes.len()
            && bytes[start..end].eq_ignore_ascii_case(name.as_bytes())
            && match bytes.get(end) {
                None => true,
                Some(&b) => is_whitespace_byte(b) || b == b'>' || b == b'/',
            }
        {
            return Some(position);
        }
        i = start;
    }

    None
}

/// Split a text run into whitespace, entity references and everything else.
pub(crate) fn fragments(raw: &str) -> Vec<Fragment<'_>> {
    let bytes = raw.as_bytes();
    let length = bytes.len();
    let mut result = Vec::new();

    let mut start = 0;
    let mut i = 0;
    while i < length {
        let b = bytes[i];
        if is_whitespace_byte(b) {
            if start < i {
                result.push(Fragment::Characters(&raw[start..i]));
            }
            let begin = i;
            while i < length && is_whitespace_byte(bytes[i]) {
                i += 1;
            }
            result.push(Fragment::Whitespace(&raw[begin..i]));
            start = i;
        } else if b == b'&' {
            match entity_length(&bytes[i..]) {
                Some(width) => {
                    if start < i {
                        result.push(Fragment::Characters(&raw[start..i]));
                    }
                    result.push(Fragment::Entity(&raw[i..i + width]));
                    i += width;
                    start = i;
                }
                None => i += 1,
            }
        } else {
            i += 1;
        }
    }
    if start < length {
        result.push(Fragment::Characters(&raw[start..]));
    }

    result
}

/// Length of the character reference at the start of `bytes`, which begins
/// with '&', if it is one.
fn entity_length(bytes: &[u8]) -> Option<usize> {
    let length = bytes.len();
    let mut i = 1;

    if bytes.get(1) == Some(&b'#') {
        let hex = matches!(bytes.get(2), Some(b'x') | Some(b'X'));
        i = if hex { 3 } else { 2 };
        let digit = |b: u8| {
            if hex {
                b.is_ascii_hexdigit()
            } else {
                b.is_ascii_digit()
            }
        };
        let digits = i;
        while i < length && digit(bytes[i]) {
            i += 1;
        }
        if i == digits {
            return None;
        }
    } else {
        if !bytes
            .get(1)
            .is_some_and(u8::is_ascii_alphabetic)
        {
            return None;
        }
        while i < length && bytes[i].is_ascii_alphanumeric() {
            i += 1;
        }
    }

    if bytes.get(i) == Some(&b';') {
        Some(i + 1)
    } else {
        None
    }
}
