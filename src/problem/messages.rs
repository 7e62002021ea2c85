use htmlfmt::{
    config::ConfigurationError,
    formatting::{Render, Syntax},
    language::FormattingError,
    parsing::{parser::MAXIMUM_DEPTH, ParseError},
};

/// Generate problem and detail messages for a failed formatting pass
pub fn generate_error_message(error: &FormattingError, renderer: &dyn Render) -> (String, String) {
    match error {
        FormattingError::Parse(error) => generate_parse_message(error),
        FormattingError::Configuration(error) => generate_configuration_message(error, renderer),
        FormattingError::Internal { problem, .. } => (
            "Internal formatter error".to_string(),
            format!(
                "The formatter's layout disagreed with the document ({}). This should not have happened! Sorry.",
                problem
            ),
        ),
        _ => (error.to_string(), String::new()),
    }
}

fn generate_parse_message(error: &ParseError) -> (String, String) {
    match error {
        ParseError::TooDeep { .. } => (
            "Elements nested too deeply".to_string(),
            format!(
                r#"
Elements here are nested more than {} levels deep. Documents like this are
almost certainly generated or damaged, and are left for something other
than a formatter to deal with.
                "#,
                MAXIMUM_DEPTH
            )
            .trim_ascii()
            .to_string(),
        ),
        _ => (error.to_string(), String::new()),
    }
}

pub fn generate_configuration_message(error: &ConfigurationError, renderer: &dyn Render) -> (String, String) {
    match error {
        ConfigurationError::ZeroMargin => (
            "Right margin of zero".to_string(),
            "The right-margin setting must be at least one column.".to_string(),
        ),
        ConfigurationError::IndentTooWide { option, width } => (
            format!("Indent too wide in {}", option),
            format!(
                "An indent of {} columns is not something any document can be laid out with.",
                width
            ),
        ),
        ConfigurationError::InvalidTagName { option, name } => (
            format!("Invalid tag name in {}", option),
            format!(
                "The name {} is not a valid tag name; names start with an ASCII letter.",
                renderer.style(Syntax::Tag, name)
            ),
        ),
        ConfigurationError::Unreadable { details } => (
            "Unable to read settings".to_string(),
            details.clone(),
        ),
        _ => (error.to_string(), String::new()),
    }
}
