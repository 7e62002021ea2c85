//! Deciding where line breaks, indentation and spaces go
//!
//! The planner walks the tree in document order keeping track of the output
//! column. Whitespace in the source is never copied through directly;
//! instead, the whitespace found between two items is handed along as
//! "pending" and the decision made for the following item replaces it.

use tracing::debug;

use crate::config::{tags, Configuration, WrapMode};
use crate::formatting::range::{locate, Range, Target};
use crate::formatting::wrapper::wrap;
use crate::language::*;

/// How far to look into an inline element's content when measuring how much
/// of it is glued to its start tag.
const LOOKAHEAD: usize = 8;

/// What to emit in place of the source whitespace in front of something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gap<'i> {
    None,
    Space,
    Break { newlines: usize, indent: usize },
    Keep(&'i str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeLayout<'i> {
    pub gap: Gap<'i>,
    pub quote: Option<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Void or self-closing; nothing follows the start tag.
    Empty,
    Formatted,
    /// Content and end tag are copied from the source unchanged.
    Verbatim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout<'i> {
    Text {
        gaps: Vec<Gap<'i>>,
    },
    Element {
        attributes: Vec<AttributeLayout<'i>>,
        tag_end: Gap<'i>,
        content: Content,
        end_tag: Gap<'i>,
    },
    Atom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision<'i> {
    pub before: Gap<'i>,
    pub after: Gap<'i>,
    pub indent: usize,
    pub layout: Layout<'i>,
}

/// The decisions for one formatting pass, indexed by node id. Nodes without
/// a decision are reproduced from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan<'i> {
    decisions: Vec<Option<Decision<'i>>>,
    end: Gap<'i>,
}

impl<'i> Plan<'i> {
    pub fn empty(count: usize) -> Plan<'i> {
        Plan {
            decisions: vec![None; count],
            end: Gap::None,
        }
    }

    pub fn get(&self, id: usize) -> Option<&Decision<'i>> {
        self.decisions
            .get(id)
            .and_then(Option::as_ref)
    }

    /// What goes after the last node of the document.
    pub fn end(&self) -> &Gap<'i> {
        &self.end
    }

    /// Number of nodes that received a decision.
    pub fn decided(&self) -> usize {
        self.decisions
            .iter()
            .filter(|decision| decision.is_some())
            .count()
    }
}

/// Annotate the document with formatting decisions. Without a range every
/// node is planned; with one, only the nodes covering it are.
pub fn plan<'i>(
    document: &Document<'i>,
    config: &Configuration,
    range: Option<Range>,
) -> Result<Plan<'i>, FormattingError> {
    config.check()?;

    let mut planner = Planner::new(document.source, document.count, config);

    match range {
        None => planner.plan_document(document)?,
        Some(range) => {
            let range = range.normalize(document.source);
            match locate(document, config, range) {
                Some(target) => planner.plan_target(&target)?,
                None => debug!(?range, "range covers nothing that can be formatted"),
            }
        }
    }

    debug!(
        "Planned {} of {} node{}",
        planner
            .plan
            .decided(),
        document.count,
        if document.count == 1 { "" } else { "s" }
    );

    Ok(planner.plan)
}

/// Source whitespace waiting to be replaced by a separator.
#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    span: Option<Span>,
}

impl Pending {
    fn at(start: usize, end: usize) -> Pending {
        Pending::default().extend(start, end)
    }

    /// Adjacent whitespace from two sources (the end of an element without
    /// an end tag and the start of what follows) is contiguous in the source.
    fn extend(self, start: usize, end: usize) -> Pending {
        if start == end {
            return self;
        }
        match self.span {
            None => Pending {
                span: Some(Span::new(start, end)),
            },
            Some(span) => Pending {
                span: Some(Span::new(span.start.min(start), span.end.max(end))),
            },
        }
    }

    fn text<'i>(&self, source: &'i str) -> &'i str {
        match self.span {
            Some(span) => &source[span.start..span.end],
            None => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start { block: bool },
    Block,
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Block,
    Inline,
    Comment,
}

/// State of the sequence of children being laid out.
#[derive(Debug)]
struct Flow {
    indent: usize,
    prev: Prev,
    /// A line break was introduced inside this content, by wrapping or by a
    /// line break within text.
    broken: bool,
    /// A block element appeared in this content.
    blocks: bool,
}

impl Flow {
    fn new(indent: usize, prev: Prev) -> Flow {
        Flow {
            indent,
            prev,
            broken: false,
            blocks: false,
        }
    }
}

/// How an element's content was laid out.
struct Laid<'i> {
    end_tag: Gap<'i>,
    /// Whitespace left over when there is no end tag.
    after: Pending,
    broken: bool,
}

/// Position of the planner, to return to when content is laid out again.
#[derive(Debug, Clone, Copy)]
struct Mark {
    column: usize,
    blank: bool,
    fresh: bool,
    anchored: bool,
    lines: usize,
}

struct Planner<'a, 'i> {
    config: &'a Configuration,
    source: &'i str,
    plan: Plan<'i>,
    column: usize,
    /// Nothing but indentation on the current line.
    blank: bool,
    /// Nothing emitted at all yet.
    fresh: bool,
    /// The next separator must reproduce the source.
    anchored: bool,
    /// Line breaks emitted so far.
    lines: usize,
    /// Per element id, whether it fit within the line threshold with its
    /// children indented.
    measured: Vec<Option<bool>>,
}

impl<'a, 'i> Planner<'a, 'i> {
    fn new(source: &'i str, count: usize, config: &'a Configuration) -> Planner<'a, 'i> {
        Planner {
            config,
            source,
            plan: Plan::empty(count),
            column: 0,
            blank: true,
            fresh: true,
            anchored: false,
            lines: 0,
            measured: vec![None; count],
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            column: self.column,
            blank: self.blank,
            fresh: self.fresh,
            anchored: self.anchored,
            lines: self.lines,
        }
    }

    fn reset(&mut self, mark: Mark) {
        self.column = mark.column;
        self.blank = mark.blank;
        self.fresh = mark.fresh;
        self.anchored = mark.anchored;
        self.lines = mark.lines;
    }

    fn decide(&mut self, id: usize, decision: Decision<'i>) -> Result<(), FormattingError> {
        match self
            .plan
            .decisions
            .get_mut(id)
        {
            Some(slot) => {
                *slot = Some(decision);
                Ok(())
            }
            None => Err(FormattingError::Internal {
                offset: 0,
                problem: "node id outside of the document",
            }),
        }
    }

    fn plan_document(&mut self, document: &Document<'i>) -> Result<(), FormattingError> {
        let mut flow = Flow::new(0, Prev::Start { block: false });
        let pending = self.plan_children(&mut flow, &document.children, Pending::default())?;

        let trailing = pending.text(self.source);
        self.plan.end = if self
            .config
            .keep_whitespaces
            && !trailing.is_empty()
        {
            Gap::Keep(trailing)
        } else if trailing.contains('\n') {
            Gap::Break {
                newlines: 1,
                indent: 0,
            }
        } else {
            Gap::None
        };

        Ok(())
    }

    /// Plan a run of sibling nodes in place. The source before the line the
    /// run starts on, and the whitespace after it, are left exactly as they
    /// are; a run starting its own line is indented as its container's
    /// children are.
    fn plan_target(&mut self, target: &Target<'_, 'i>) -> Result<(), FormattingError> {
        let (first, last) = match (
            target
                .nodes
                .first(),
            target
                .nodes
                .last(),
        ) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(()),
        };

        let start = first
            .span()
            .start;
        let line = self.source[..start]
            .rfind('\n')
            .map_or(0, |i| i + 1);
        let prefix = &self.source[line..start];

        self.column = prefix
            .chars()
            .count();
        self.blank = prefix
            .chars()
            .all(is_whitespace);
        self.fresh = false;
        self.anchored = true;

        let nested = match target.container {
            Some(element) => {
                let base = self.line_indent(
                    element
                        .span
                        .start,
                );
                if self.steps_children(element) {
                    base + self
                        .config
                        .indent_size
                } else {
                    base
                }
            }
            None => 0,
        };

        // the text holding the line break in front of the run
        let lead = match target.before {
            Some(Node::Text(text))
                if self.blank
                    && text
                        .span
                        .end
                        == start
                    && line
                        > text
                            .span
                            .start =>
            {
                Some(text)
            }
            _ => None,
        };

        let indent = match (self.blank, lead, target.container) {
            (true, Some(_), _) => nested,
            (true, None, _) => self.column,
            (false, _, Some(_)) => nested,
            (false, _, None) => self.line_indent(start),
        };
        if lead.is_some() {
            self.column = indent;
        }

        debug!(
            offset = start,
            column = self.column,
            indent,
            "Planning {} node{} in place",
            target
                .nodes
                .len(),
            if target
                .nodes
                .len()
                == 1
            {
                ""
            } else {
                "s"
            }
        );

        let mut flow = Flow::new(indent, Prev::Inline);
        let pending = self.plan_children(&mut flow, target.nodes, Pending::default())?;

        let trailing = pending.text(self.source);
        if !trailing.is_empty() {
            if let Some(decision) = self
                .plan
                .decisions
                .get_mut(last.id())
                .and_then(Option::as_mut)
            {
                decision.after = Gap::Keep(trailing);
            }
        }

        if let Some(text) = lead {
            self.keep_text(text, line - 1)?;
            if let Some(decision) = self
                .plan
                .decisions
                .get_mut(first.id())
                .and_then(Option::as_mut)
            {
                decision.before = Gap::Break { newlines: 1, indent };
            }
        }

        Ok(())
    }

    /// Reproduce a text node as it is in the source up to `end`, leaving
    /// out what follows.
    fn keep_text(&mut self, text: &Text<'i>, end: usize) -> Result<(), FormattingError> {
        let source = self.source;
        let kept = |from: usize, to: usize| {
            if from < to {
                Gap::Keep(&source[from..to])
            } else {
                Gap::None
            }
        };

        let begin = text
            .span
            .start;
        let run = text.run();

        let decision = if run
            .words
            .is_empty()
        {
            Decision {
                before: kept(begin, end),
                after: Gap::None,
                indent: 0,
                layout: Layout::Text { gaps: vec![] },
            }
        } else {
            let trailing = text
                .span
                .end
                - run
                    .trailing
                    .len();
            Decision {
                before: kept(
                    begin,
                    begin
                        + run
                            .leading
                            .len(),
                ),
                after: kept(trailing, end),
                indent: 0,
                layout: Layout::Text {
                    gaps: run
                        .gaps
                        .iter()
                        .map(|ws| Gap::Keep(*ws))
                        .collect(),
                },
            }
        };

        self.decide(text.id, decision)
    }

    fn plan_children(
        &mut self,
        flow: &mut Flow,
        children: &[Node<'i>],
        mut pending: Pending,
    ) -> Result<Pending, FormattingError> {
        for child in children {
            pending = match child {
                Node::Text(text) => self.plan_text(flow, text, pending)?,
                Node::Element(element) => self.plan_element(flow, element, pending)?,
                Node::Comment(comment) => {
                    self.plan_atom(flow, comment.id, comment.raw, pending, Next::Comment)?
                }
                Node::Verbatim(verbatim) => {
                    self.plan_atom(flow, verbatim.id, verbatim.raw, pending, Next::Inline)?
                }
                Node::Doctype(doctype) => {
                    self.plan_atom(flow, doctype.id, doctype.raw, pending, Next::Block)?
                }
            };
        }
        Ok(pending)
    }

    // -- separators --------------------------------------------------------

    fn line_break(&self, lines: usize, indent: usize) -> Gap<'i> {
        let newlines = lines
            .min(
                self.config
                    .keep_blank_lines
                    + 1,
            )
            .max(1);
        Gap::Break { newlines, indent }
    }

    /// Decide what goes between the previous item in the flow and the next
    /// one, given the whitespace the source had there and the width of the
    /// leading part of the next item.
    fn separate(&mut self, flow: &mut Flow, pending: Pending, next: Next, width: usize) -> Gap<'i> {
        let ws = pending.text(self.source);

        if self.fresh {
            return Gap::None;
        }
        if self.anchored || self
            .config
            .keep_whitespaces
        {
            self.anchored = false;
            return if ws.is_empty() {
                Gap::None
            } else {
                Gap::Keep(ws)
            };
        }

        let lines = count_newlines(ws);
        let glued = next == Next::Comment && ws.is_empty();

        if next == Next::Block || (flow.prev == Prev::Block && !glued) {
            return self.line_break(lines, flow.indent);
        }
        if lines > 0
            && self
                .config
                .keep_line_breaks
        {
            return self.line_break(lines, flow.indent);
        }

        let spaced = !ws.is_empty();
        let opportunity = spaced || flow.prev == Prev::Start { block: true };
        if opportunity
            && self
                .config
                .wraps_text()
            && !self.blank
            && self.column + usize::from(spaced) + width
                > self
                    .config
                    .right_margin
        {
            flow.broken = true;
            return Gap::Break {
                newlines: 1,
                indent: flow.indent,
            };
        }

        if spaced {
            Gap::Space
        } else {
            Gap::None
        }
    }

    /// Decide what goes in front of an end tag.
    fn close(&self, inner: &Flow, pending: Pending, indent: usize, own_line: bool, block: bool) -> Gap<'i> {
        let ws = pending.text(self.source);

        if self
            .config
            .keep_whitespaces
        {
            return if ws.is_empty() {
                Gap::None
            } else {
                Gap::Keep(ws)
            };
        }

        let lines = count_newlines(ws);
        if own_line && (inner.blocks || inner.broken) {
            return self.line_break(lines, indent);
        }
        if lines > 0
            && self
                .config
                .keep_line_breaks
        {
            return self.line_break(lines, indent);
        }
        if !ws.is_empty() && !block {
            return Gap::Space;
        }
        Gap::None
    }

    // -- column tracking ---------------------------------------------------

    fn apply(&mut self, gap: &Gap<'i>) {
        match gap {
            Gap::None => {}
            Gap::Space => self.column += 1,
            Gap::Break { newlines, indent } => {
                self.column = *indent;
                self.blank = true;
                self.lines += *newlines;
            }
            Gap::Keep(ws) => match ws.rfind('\n') {
                Some(i) => {
                    self.column = ws[i + 1..]
                        .chars()
                        .count();
                    self.blank = true;
                    self.lines += count_newlines(ws);
                }
                None => {
                    self.column += ws
                        .chars()
                        .count()
                }
            },
        }
    }

    fn place(&mut self, width: usize) {
        self.column += width;
        self.blank = false;
        self.fresh = false;
    }

    /// Account for literal content, which may span lines.
    fn emit(&mut self, content: &str) {
        if content.is_empty() {
            return;
        }
        match content.rfind('\n') {
            Some(i) => {
                self.column = content[i + 1..]
                    .chars()
                    .count();
                self.lines += count_newlines(content);
            }
            None => {
                self.column += content
                    .chars()
                    .count()
            }
        }
        self.blank = false;
        self.fresh = false;
    }

    fn line_indent(&self, offset: usize) -> usize {
        let line = self.source[..offset]
            .rfind('\n')
            .map_or(0, |i| i + 1);
        self.source[line..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count()
    }

    // -- nodes -------------------------------------------------------------

    fn plan_atom(
        &mut self,
        flow: &mut Flow,
        id: usize,
        raw: &'i str,
        pending: Pending,
        next: Next,
    ) -> Result<Pending, FormattingError> {
        let width = raw
            .lines()
            .next()
            .map_or(0, |line| {
                line.chars()
                    .count()
            });
        let before = self.separate(flow, pending, next, width);
        self.apply(&before);
        let indent = self.column;
        self.emit(raw);

        flow.prev = if next == Next::Block {
            flow.blocks = true;
            Prev::Block
        } else {
            Prev::Inline
        };

        self.decide(
            id,
            Decision {
                before,
                after: Gap::None,
                indent,
                layout: Layout::Atom,
            },
        )?;
        Ok(Pending::default())
    }

    fn plan_text(&mut self, flow: &mut Flow, text: &Text<'i>, pending: Pending) -> Result<Pending, FormattingError> {
        let run = text.run();
        let start = text
            .span
            .start;
        let end = text
            .span
            .end;
        let pending = pending.extend(
            start,
            start
                + run
                    .leading
                    .len(),
        );

        if run
            .words
            .is_empty()
        {
            self.decide(
                text.id,
                Decision {
                    before: Gap::None,
                    after: Gap::None,
                    indent: flow.indent,
                    layout: Layout::Text { gaps: vec![] },
                },
            )?;
            return Ok(pending);
        }

        let widths: Vec<usize> = run
            .words
            .iter()
            .map(Word::width)
            .collect();

        let before = self.separate(flow, pending, Next::Inline, widths[0]);
        self.apply(&before);

        let continuation = if self
            .config
            .align_text
        {
            self.column
        } else {
            flow.indent
        };
        let margin = if self
            .config
            .wraps_text()
        {
            self.config
                .right_margin
        } else {
            usize::MAX
        };

        let mut gaps = Vec::with_capacity(
            run.gaps
                .len(),
        );
        let mut first = 0;
        loop {
            // extend the segment across gaps that wrapping may change
            let mut last = first;
            while last + 1 < widths.len() && self.is_soft(run.gaps[last]) {
                last += 1;
            }

            let breaks = wrap(&widths[first..=last], self.column, margin, continuation);
            let mut breaks = breaks
                .into_iter()
                .peekable();

            for (k, width) in widths[first..=last]
                .iter()
                .enumerate()
            {
                if k > 0 {
                    let gap = if breaks.next_if_eq(&k).is_some() {
                        flow.broken = true;
                        Gap::Break {
                            newlines: 1,
                            indent: continuation,
                        }
                    } else {
                        Gap::Space
                    };
                    self.apply(&gap);
                    gaps.push(gap);
                }
                self.place(*width);
            }

            if last + 1 >= widths.len() {
                break;
            }

            let ws = run.gaps[last];
            let gap = if self
                .config
                .keep_whitespaces
            {
                Gap::Keep(ws)
            } else {
                flow.broken = true;
                self.line_break(count_newlines(ws), continuation)
            };
            self.apply(&gap);
            gaps.push(gap);
            first = last + 1;
        }

        flow.prev = Prev::Inline;

        self.decide(
            text.id,
            Decision {
                before,
                after: Gap::None,
                indent: flow.indent,
                layout: Layout::Text { gaps },
            },
        )?;

        Ok(Pending::at(
            end - run
                .trailing
                .len(),
            end,
        ))
    }

    /// Whether the whitespace between two words is subject to wrapping, as
    /// opposed to being reproduced as a line break or kept outright.
    fn is_soft(&self, ws: &str) -> bool {
        !self
            .config
            .keep_whitespaces
            && !(self
                .config
                .keep_line_breaks_in_text
                && count_newlines(ws) > 0)
    }

    fn plan_element(
        &mut self,
        flow: &mut Flow,
        element: &Element<'i>,
        pending: Pending,
    ) -> Result<Pending, FormattingError> {
        let block = !self
            .config
            .is_inline(element.name);

        let (next, width) = if block {
            (Next::Block, 0)
        } else {
            (Next::Inline, self.leading_width(element, 0))
        };
        let before = self.separate(flow, pending, next, width);
        self.apply(&before);

        let own_line = self.blank;
        let indent = if own_line { self.column } else { flow.indent };

        let top = self.lines;
        let (attributes, tag_end) = self.plan_start_tag(element, indent);

        let mut after = Pending::default();
        let (content, end_tag) = if element.ending == Ending::SelfClosing || tags::is_void(element.name) {
            (Content::Empty, Gap::None)
        } else if self.preserves(element) {
            let source = self.source;
            let end = element.preserved_end(source);
            self.emit(&source[element.open.end..end]);
            after = Pending::at(end, element.span.end);
            (Content::Verbatim, Gap::None)
        } else {
            let step = self
                .config
                .indent_size;
            let stepped = (own_line || block) && self.indents_children(element);

            let laid = if !stepped {
                self.plan_content(element, indent, indent, own_line, block)?
            } else {
                match self.fits_lines(element) {
                    Some(true) => self.plan_content(element, indent, indent + step, own_line, block)?,
                    Some(false) => self.plan_content(element, indent, indent, own_line, block)?,
                    None => {
                        // lay out indented, and start over flush if the
                        // result is taller than the threshold allows
                        let mark = self.mark();
                        let laid = self.plan_content(element, indent, indent + step, own_line, block)?;
                        let fits = self.lines - top < self
                            .config
                            .do_not_align_children_of_min_lines;
                        if let Some(slot) = self
                            .measured
                            .get_mut(element.id)
                        {
                            *slot = Some(fits);
                        }

                        if fits {
                            laid
                        } else {
                            self.reset(mark);
                            self.plan_content(element, indent, indent, own_line, block)?
                        }
                    }
                }
            };

            if !block && laid.broken {
                flow.broken = true;
            }
            after = laid.after;
            (Content::Formatted, laid.end_tag)
        };

        if block {
            flow.blocks = true;
            flow.prev = Prev::Block;
        } else {
            flow.prev = Prev::Inline;
        }

        self.decide(
            element.id,
            Decision {
                before,
                after: Gap::None,
                indent,
                layout: Layout::Element {
                    attributes,
                    tag_end,
                    content,
                    end_tag,
                },
            },
        )?;

        Ok(after)
    }

    /// Lay out the children and end tag of an element whose content is
    /// formatted.
    fn plan_content(
        &mut self,
        element: &Element<'i>,
        indent: usize,
        child_indent: usize,
        own_line: bool,
        block: bool,
    ) -> Result<Laid<'i>, FormattingError> {
        let mut inner = Flow::new(child_indent, Prev::Start { block });
        let pending = self.plan_children(&mut inner, &element.children, Pending::default())?;

        let (end_tag, after) = match &element.end_tag {
            Some(tag) => {
                let gap = self.close(&inner, pending, indent, own_line || block, block);
                self.apply(&gap);
                self.place(
                    3 + tag
                        .name
                        .chars()
                        .count(),
                );
                (gap, Pending::default())
            }
            None => (Gap::None, pending),
        };

        Ok(Laid {
            end_tag,
            after,
            broken: inner.broken,
        })
    }

    /// Content that must come through untouched.
    fn preserves(&self, element: &Element<'i>) -> bool {
        tags::is_raw_text(element.name)
            || self
                .config
                .keeps_whitespaces_inside(element.name)
    }

    fn indents_children(&self, element: &Element<'i>) -> bool {
        !self
            .config
            .does_not_indent_children_of(element.name)
    }

    /// Whether children of an element already laid out in the source are
    /// indented, judging its height from the source.
    fn steps_children(&self, element: &Element<'i>) -> bool {
        let threshold = self
            .config
            .do_not_align_children_of_min_lines;
        let span = element.span;
        self.indents_children(element)
            && (threshold == 0 || count_newlines(&self.source[span.start..span.end]) < threshold)
    }

    /// Whether an element is short enough in the output for its children
    /// to be indented, if that is known yet. Without a threshold it always
    /// is.
    fn fits_lines(&self, element: &Element<'i>) -> Option<bool> {
        if self
            .config
            .do_not_align_children_of_min_lines
            == 0
        {
            return Some(true);
        }
        self.measured
            .get(element.id)
            .copied()
            .flatten()
    }

    // -- start tags --------------------------------------------------------

    fn quote(&self, attribute: &Attribute<'i>) -> Option<char> {
        let value = attribute
            .value
            .as_ref()?;

        if !self
            .config
            .enforce_quotes
        {
            return value.quote;
        }

        match self
            .config
            .quote_style
            .quote()
        {
            None => value.quote,
            Some(target) if value
                .raw
                .contains(target) =>
            {
                value.quote
            }
            Some(target) => Some(target),
        }
    }

    fn attribute_width(&self, attribute: &Attribute<'i>) -> usize {
        let name = attribute
            .name
            .chars()
            .count();
        match &attribute.value {
            None => name,
            Some(value) => {
                let quotes = if self
                    .quote(attribute)
                    .is_some()
                {
                    2
                } else {
                    0
                };
                name + 1
                    + value
                        .raw
                        .chars()
                        .count()
                    + quotes
            }
        }
    }

    fn closing_width(&self, element: &Element<'i>) -> usize {
        match element.ending {
            Ending::Open => 1,
            Ending::SelfClosing => {
                if self
                    .config
                    .space_inside_empty_tag
                {
                    3
                } else {
                    2
                }
            }
        }
    }

    /// Width of the start tag on one line, plus whatever content is glued
    /// to it with no whitespace in between.
    fn leading_width(&self, element: &Element<'i>, depth: usize) -> usize {
        let mut width = 1
            + element
                .name
                .chars()
                .count()
            + element
                .attributes
                .iter()
                .map(|attribute| 1 + self.attribute_width(attribute))
                .sum::<usize>()
            + self.closing_width(element);

        if depth < LOOKAHEAD && !self.preserves(element) {
            match element
                .children
                .first()
            {
                Some(Node::Text(text)) => {
                    if let Some(fragment) = text
                        .fragments
                        .first()
                    {
                        if !fragment.is_whitespace() {
                            width += text.run().words[0].width();
                        }
                    }
                }
                Some(Node::Element(child))
                    if self
                        .config
                        .is_inline(child.name) =>
                {
                    width += self.leading_width(child, depth + 1);
                }
                _ => {}
            }
        }

        width
    }

    fn plan_start_tag(&mut self, element: &Element<'i>, indent: usize) -> (Vec<AttributeLayout<'i>>, Gap<'i>) {
        let config = self.config;

        self.place(
            1 + element
                .name
                .chars()
                .count(),
        );

        let single = self.column
            + element
                .attributes
                .iter()
                .map(|attribute| 1 + self.attribute_width(attribute))
                .sum::<usize>()
            + self.closing_width(element);
        let overflow = single > config.right_margin;
        let many = element
            .attributes
            .len()
            > 1;

        let mut aligned = indent + config.continuation_indent_size;
        let mut layouts = Vec::with_capacity(
            element
                .attributes
                .len(),
        );

        for (i, attribute) in element
            .attributes
            .iter()
            .enumerate()
        {
            let kept = count_newlines(attribute.gap) > 0
                && (config.keep_line_breaks || config.attribute_wrap == WrapMode::DoNotWrap);
            let wrapped = i > 0
                && match config.attribute_wrap {
                    WrapMode::DoNotWrap => false,
                    WrapMode::WrapAlways => many,
                    WrapMode::WrapAsNeeded => overflow,
                };

            if i == 0 && config.align_attributes && !kept {
                aligned = self.column + 1;
            }

            let gap = if kept || wrapped {
                Gap::Break {
                    newlines: 1,
                    indent: aligned,
                }
            } else {
                Gap::Space
            };
            self.apply(&gap);

            let quote = self.quote(attribute);
            self.emit(attribute.name);
            if let Some(value) = &attribute.value {
                self.place(1);
                if quote.is_some() {
                    self.place(1);
                }
                self.emit(value.raw);
                if quote.is_some() {
                    self.place(1);
                }
            }

            layouts.push(AttributeLayout { gap, quote });
        }

        let tag_end = if count_newlines(element.trailing) > 0
            && (config.keep_line_breaks || config.attribute_wrap == WrapMode::DoNotWrap)
        {
            Gap::Break { newlines: 1, indent }
        } else if element.ending == Ending::SelfClosing && config.space_inside_empty_tag {
            Gap::Space
        } else {
            Gap::None
        };
        self.apply(&tag_end);
        self.place(match element.ending {
            Ending::Open => 1,
            Ending::SelfClosing => 2,
        });

        (layouts, tag_end)
    }
}
