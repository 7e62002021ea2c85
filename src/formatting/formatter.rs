//! Turning a planned document into output fragments

use std::borrow::Cow;

use crate::formatting::planner::{Content, Gap, Layout, Plan};
use crate::formatting::renderer::Syntax;
use crate::language::*;

/// Walk the tree emitting (Syntax, text) pairs. Nodes with a decision in the
/// plan are laid out accordingly; the rest are reproduced from the source.
pub fn format_with_plan<'i>(
    document: &Document<'i>,
    plan: &Plan<'i>,
) -> Result<Vec<(Syntax, Cow<'i, str>)>, FormattingError> {
    let mut output = Formatter::new(document.source);

    for node in &document.children {
        output.append_node(plan, node)?;
    }
    output.append_gap(plan.end());

    Ok(output.fragments)
}

struct Formatter<'i> {
    source: &'i str,
    fragments: Vec<(Syntax, Cow<'i, str>)>,
}

impl<'i> Formatter<'i> {
    fn new(source: &'i str) -> Formatter<'i> {
        Formatter {
            source,
            fragments: Vec::new(),
        }
    }

    fn append(&mut self, syntax: Syntax, content: impl Into<Cow<'i, str>>) {
        let content = content.into();
        if content.is_empty() {
            return;
        }
        self.fragments
            .push((syntax, content));
    }

    fn append_gap(&mut self, gap: &Gap<'i>) {
        match gap {
            Gap::None => {}
            Gap::Space => self.append(Syntax::Neutral, " "),
            Gap::Break { newlines, indent } => {
                self.append(Syntax::Newline, "\n".repeat(*newlines));
                self.append(Syntax::Indent, " ".repeat(*indent));
            }
            Gap::Keep(ws) => self.append(Syntax::Neutral, *ws),
        }
    }

    fn append_node(&mut self, plan: &Plan<'i>, node: &Node<'i>) -> Result<(), FormattingError> {
        let decision = match plan.get(node.id()) {
            Some(decision) => decision,
            None => return self.append_original(plan, node),
        };

        self.append_gap(&decision.before);

        match (node, &decision.layout) {
            (Node::Text(text), Layout::Text { gaps }) => self.append_text(text, gaps)?,
            (
                Node::Element(element),
                Layout::Element {
                    attributes,
                    tag_end,
                    content,
                    end_tag,
                },
            ) => {
                if attributes.len()
                    != element
                        .attributes
                        .len()
                {
                    return Err(FormattingError::Internal {
                        offset: element
                            .span
                            .start,
                        problem: "attribute layout out of step with the start tag",
                    });
                }

                self.append(Syntax::Bracket, "<");
                self.append(Syntax::Tag, element.name);

                for (attribute, layout) in element
                    .attributes
                    .iter()
                    .zip(attributes)
                {
                    self.append_gap(&layout.gap);
                    self.append_attribute(attribute, layout.quote);
                }

                self.append_gap(tag_end);
                match element.ending {
                    Ending::Open => self.append(Syntax::Bracket, ">"),
                    Ending::SelfClosing => self.append(Syntax::Bracket, "/>"),
                }

                match content {
                    Content::Empty => {}
                    Content::Verbatim => {
                        let source = self.source;
                        let end = element.preserved_end(source);
                        self.append(Syntax::Verbatim, &source[element.open.end..end]);
                    }
                    Content::Formatted => {
                        for child in &element.children {
                            self.append_node(plan, child)?;
                        }
                        if let Some(tag) = &element.end_tag {
                            self.append_gap(end_tag);
                            self.append(Syntax::Bracket, "</");
                            self.append(Syntax::Tag, tag.name);
                            self.append(Syntax::Bracket, ">");
                        }
                    }
                }
            }
            (Node::Comment(comment), Layout::Atom) => self.append(Syntax::Comment, comment.raw),
            (Node::Doctype(doctype), Layout::Atom) => self.append(Syntax::Doctype, doctype.raw),
            (Node::Verbatim(verbatim), Layout::Atom) => self.append(Syntax::Verbatim, verbatim.raw),
            _ => {
                return Err(FormattingError::Internal {
                    offset: node
                        .span()
                        .start,
                    problem: "layout does not match the kind of node",
                })
            }
        }

        self.append_gap(&decision.after);
        Ok(())
    }

    fn append_attribute(&mut self, attribute: &Attribute<'i>, quote: Option<char>) {
        self.append(Syntax::AttributeName, attribute.name);

        if let Some(value) = &attribute.value {
            self.append(Syntax::Bracket, "=");
            match quote {
                Some(quote) => {
                    self.append(Syntax::Quote, quote.to_string());
                    self.append(Syntax::AttributeValue, value.raw);
                    self.append(Syntax::Quote, quote.to_string());
                }
                None => self.append(Syntax::AttributeValue, value.raw),
            }
        }
    }

    fn append_text(&mut self, text: &Text<'i>, gaps: &[Gap<'i>]) -> Result<(), FormattingError> {
        let run = text.run();

        let expected = run
            .words
            .len()
            .saturating_sub(1);
        if gaps.len() != expected {
            return Err(FormattingError::Internal {
                offset: text
                    .span
                    .start,
                problem: "text layout out of step with its words",
            });
        }

        for (i, word) in run
            .words
            .iter()
            .enumerate()
        {
            if i > 0 {
                self.append_gap(&gaps[i - 1]);
            }
            for fragment in word.fragments {
                self.append_fragment(fragment);
            }
        }

        Ok(())
    }

    fn append_fragment(&mut self, fragment: &Fragment<'i>) {
        match fragment {
            Fragment::Whitespace(ws) => self.append(Syntax::Neutral, *ws),
            Fragment::Characters(s) => self.append(Syntax::Text, *s),
            Fragment::Entity(s) => self.append(Syntax::Entity, *s),
        }
    }

    /// Reproduce a node exactly as it appears in the source, while still
    /// visiting children that may have been planned.
    fn append_original(&mut self, plan: &Plan<'i>, node: &Node<'i>) -> Result<(), FormattingError> {
        match node {
            Node::Element(element) => {
                let source = self.source;
                let open = element.open;
                self.append(Syntax::Tag, &source[open.start..open.end]);
                for child in &element.children {
                    self.append_node(plan, child)?;
                }
                if let Some(tag) = &element.end_tag {
                    self.append(Syntax::Tag, tag.raw);
                }
            }
            Node::Text(text) => {
                for fragment in &text.fragments {
                    self.append_fragment(fragment);
                }
            }
            Node::Comment(comment) => self.append(Syntax::Comment, comment.raw),
            Node::Doctype(doctype) => self.append(Syntax::Doctype, doctype.raw),
            Node::Verbatim(verbatim) => self.append(Syntax::Verbatim, verbatim.raw),
        }
        Ok(())
    }
}
