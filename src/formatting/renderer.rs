//! Renderers for colourizing HTML

use std::borrow::Cow;

use owo_colors::OwoColorize;

use crate::formatting::formatter::format_with_plan;
use crate::formatting::planner::Plan;
use crate::language::{Document, FormattingError};

/// Types of content that can be rendered with different styles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Syntax {
    Neutral, // default
    Indent,
    Newline,
    Tag,
    Bracket,
    AttributeName,
    AttributeValue,
    Quote,
    Text,
    Entity,
    Comment,
    Doctype,
    Verbatim,
}

/// Trait for different rendering backends (the no-op no-markup one, and ANSI
/// escapes for terminal colouring)
pub trait Render {
    /// Apply styling to content with the specified syntax type
    fn style(&self, syntax: Syntax, content: &str) -> String;
}

/// Returns content unchanged, with no markup applied
pub struct Identity;

impl Render for Identity {
    fn style(&self, _syntax: Syntax, content: &str) -> String {
        content.to_string()
    }
}

/// Embellish fragments with ANSI escapes to create syntax highlighting in
/// terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Indent => content.to_string(),
            Syntax::Newline => content.to_string(),
            Syntax::Text => content.to_string(),
            Syntax::Tag => content // entity.name.tag - #3465a4 (blue) bold
                .color(owo_colors::Rgb(52, 101, 164))
                .bold()
                .to_string(),
            Syntax::Bracket => content // punctuation.definition.tag - #999999 (grey)
                .color(owo_colors::Rgb(153, 153, 153))
                .to_string(),
            Syntax::AttributeName => content // entity.other.attribute-name - #8f5902 (brown)
                .color(owo_colors::Rgb(143, 89, 2))
                .to_string(),
            Syntax::AttributeValue => content // string.quoted - #4e9a06 (green)
                .color(owo_colors::Rgb(78, 154, 6))
                .to_string(),
            Syntax::Quote => content // punctuation.definition.string - #4e9a06 (green) bold
                .color(owo_colors::Rgb(78, 154, 6))
                .bold()
                .to_string(),
            Syntax::Entity => content // constant.character.entity - #ad7fa8 (purple) bold
                .color(owo_colors::Rgb(173, 127, 168))
                .bold()
                .to_string(),
            Syntax::Comment => content // comment.block - #999999 (grey)
                .color(owo_colors::Rgb(153, 153, 153))
                .italic()
                .to_string(),
            Syntax::Doctype => content // meta.tag.sgml.doctype - #cc0000 (red)
                .color(owo_colors::Rgb(204, 0, 0))
                .to_string(),
            Syntax::Verbatim => content // source.embedded - #729fcf (light blue)
                .color(owo_colors::Rgb(114, 159, 207))
                .to_string(),
        }
    }
}

/// We do the code formatting in two passes. First we convert from the syntax
/// tree, as annotated by the plan, into a Vec of "fragments" (Syntax tag,
/// text pairs). Then second we apply the specified renderer to each pair to
/// result in an embellished/highlighted String.
pub fn render<'i>(
    renderer: &impl Render,
    document: &Document<'i>,
    plan: &Plan<'i>,
) -> Result<String, FormattingError> {
    // Pass 1: lay out the tree as tagged fragments
    let fragments = format_with_plan(document, plan)?;

    // Pass 2: render tagged fragments to final output
    Ok(render_to_string(renderer, fragments))
}

/// Pass 2: apply markup to fragments via style() and combine.
pub fn render_to_string(renderer: &impl Render, fragments: Vec<(Syntax, Cow<'_, str>)>) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    output
}
