use crate::language::*;

/// An element whose start tag has been read but whose content is still
/// being accumulated.
#[derive(Debug)]
pub(crate) struct Open<'i> {
    pub id: usize,
    pub name: &'i str,
    pub attributes: Vec<Attribute<'i>>,
    pub trailing: &'i str,
    pub open: Span,
    pub children: Vec<Node<'i>>,
}

/// The stack of open elements. Nodes are appended to whatever element is
/// innermost, or to the document itself when nothing is open.
#[derive(Debug)]
pub(crate) struct Scope<'i> {
    stack: Vec<Open<'i>>,
    document: Vec<Node<'i>>,
}

impl<'i> Scope<'i> {
    pub(crate) fn new() -> Scope<'i> {
        Scope {
            stack: vec![],
            document: vec![],
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack
            .len()
    }

    /// Name of the innermost open element.
    pub(crate) fn current(&self) -> Option<&'i str> {
        self.stack
            .last()
            .map(|open| open.name)
    }

    pub(crate) fn push(&mut self, open: Open<'i>) {
        self.stack
            .push(open);
    }

    pub(crate) fn append(&mut self, node: Node<'i>) {
        match self
            .stack
            .last_mut()
        {
            Some(open) => open
                .children
                .push(node),
            None => self
                .document
                .push(node),
        }
    }

    /// Position in the stack of the innermost open element with this name.
    pub(crate) fn find(&self, name: &str) -> Option<usize> {
        self.stack
            .iter()
            .rposition(|open| {
                open.name
                    .eq_ignore_ascii_case(name)
            })
    }

    /// Complete the innermost open element, ending at `end`, and attach it
    /// to its parent.
    pub(crate) fn pop(&mut self, end: usize, end_tag: Option<EndTag<'i>>) {
        if let Some(open) = self
            .stack
            .pop()
        {
            let element = Element {
                id: open.id,
                name: open.name,
                attributes: open.attributes,
                trailing: open.trailing,
                ending: Ending::Open,
                children: open.children,
                end_tag,
                span: Span::new(
                    open.open
                        .start,
                    end,
                ),
                open: open.open,
            };
            self.append(Node::Element(element));
        }
    }

    /// Close every open element, as happens at the end of input.
    pub(crate) fn finish(mut self, end: usize) -> Vec<Node<'i>> {
        while !self
            .stack
            .is_empty()
        {
            self.pop(end, None);
        }
        self.document
    }
}
