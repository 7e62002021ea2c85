//! Finding the nodes a partial reformat applies to

use crate::config::{tags, Configuration};
use crate::language::{Document, Element, Node};

/// A byte range of the source selected for reformatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Range {
        Range { start, end }
    }

    /// Clamp to the source, put the ends in order, and widen to character
    /// boundaries.
    pub fn normalize(self, source: &str) -> Range {
        let (mut start, mut end) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };

        start = start.min(source.len());
        end = end.min(source.len());

        while !source.is_char_boundary(start) {
            start -= 1;
        }
        while !source.is_char_boundary(end) {
            end += 1;
        }

        Range { start, end }
    }
}

/// A run of consecutive siblings to be formatted, and the element they are
/// the children of (if they are not at the top level).
#[derive(Debug)]
pub(crate) struct Target<'a, 'i> {
    pub container: Option<&'a Element<'i>>,
    pub nodes: &'a [Node<'i>],
    /// The sibling immediately before the run.
    pub before: Option<&'a Node<'i>>,
}

/// Descend to the innermost element whose content holds the whole range
/// and select the children overlapping it. Returns None when there is
/// nothing to format: the range touches no node, or it lies within content
/// that is always reproduced as is.
pub(crate) fn locate<'a, 'i>(
    document: &'a Document<'i>,
    config: &Configuration,
    range: Range,
) -> Option<Target<'a, 'i>> {
    let mut container = None;
    let mut children: &'a [Node<'i>] = &document.children;

    loop {
        let overlapping = |node: &Node<'i>| {
            node.span()
                .overlaps(range.start, range.end)
        };
        let first = children
            .iter()
            .position(overlapping)?;
        let last = children
            .iter()
            .rposition(overlapping)?;

        if first == last {
            if let Node::Element(element) = &children[first] {
                if element
                    .content()
                    .contains(range.start, range.end)
                {
                    if tags::is_raw_text(element.name) || config.keeps_whitespaces_inside(element.name) {
                        return None;
                    }
                    container = Some(element);
                    children = &element.children;
                    continue;
                }
            }
        }

        return Some(Target {
            container,
            nodes: &children[first..=last],
            before: first
                .checked_sub(1)
                .and_then(|i| children.get(i)),
        });
    }
}
