//! Formatter for HTML documents

use tracing::debug;

use crate::config::Configuration;
use crate::language::FormattingError;
use crate::parsing;

mod formatter;
mod planner;
mod range;
mod renderer;
mod wrapper;

pub use formatter::format_with_plan;
pub use planner::{plan, AttributeLayout, Content, Decision, Gap, Layout, Plan};
pub use range::Range;
pub use renderer::*;
pub use wrapper::{wrap, Line};

/// Reformat a whole document. Either the complete result is returned or an
/// error; a failed pass never produces partial output.
pub fn format(text: &str, config: &Configuration) -> Result<String, FormattingError> {
    format_with_renderer(&Identity, text, config, None)
}

/// Reformat only the part of a document covering the byte range
/// `start..end`. Text outside the nodes touching that range comes back
/// exactly as it was.
pub fn reformat_range(
    text: &str,
    config: &Configuration,
    start: usize,
    end: usize,
) -> Result<String, FormattingError> {
    format_with_renderer(&Identity, text, config, Some(Range::new(start, end)))
}

pub fn format_with_renderer(
    renderer: &impl Render,
    text: &str,
    config: &Configuration,
    range: Option<Range>,
) -> Result<String, FormattingError> {
    config.check()?;

    let document = parsing::parse(text)?;
    let plan = plan(&document, config, range)?;
    let result = render(renderer, &document, &plan)?;

    debug!(
        "Formatted {} bytes into {} bytes",
        text.len(),
        result.len()
    );

    Ok(result)
}
