//! Formatting options

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Columns beyond which an indent can only be a mistake.
const MAXIMUM_INDENT: usize = 1000;

/// Whether long attribute lists or text runs are broken across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapMode {
    DoNotWrap,
    WrapAlways,
    WrapAsNeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteStyle {
    Single,
    Double,
    AsIs,
}

impl QuoteStyle {
    pub fn quote(&self) -> Option<char> {
        match self {
            QuoteStyle::Single => Some('\''),
            QuoteStyle::Double => Some('"'),
            QuoteStyle::AsIs => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("right margin must be at least one column")]
    ZeroMargin,

    #[error("{option} of {width} columns is wider than {max}", max = MAXIMUM_INDENT)]
    IndentTooWide { option: &'static str, width: usize },

    #[error("invalid tag name {name:?} in {option}")]
    InvalidTagName { option: &'static str, name: String },

    #[error("unable to read settings: {details}")]
    Unreadable { details: String },
}

/// A snapshot of every formatting option. Build one, hand it to a formatting
/// pass by reference, and drop it afterwards; nothing in this crate mutates
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Configuration {
    pub right_margin: usize,
    pub indent_size: usize,
    pub continuation_indent_size: usize,
    /// Maximum number of blank lines kept between items. Zero removes them.
    pub keep_blank_lines: usize,
    pub keep_line_breaks: bool,
    pub keep_line_breaks_in_text: bool,
    pub keep_whitespaces: bool,
    pub align_attributes: bool,
    pub align_text: bool,
    pub attribute_wrap: WrapMode,
    pub text_wrap: WrapMode,
    pub quote_style: QuoteStyle,
    pub enforce_quotes: bool,
    /// When non-zero, children of an element spanning more than this many
    /// lines are not indented.
    pub do_not_align_children_of_min_lines: usize,
    pub do_not_indent_children_of: Vec<String>,
    pub inline_elements: Vec<String>,
    pub keep_whitespaces_inside: Vec<String>,
    pub space_inside_empty_tag: bool,
}

fn names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::to_string)
        .collect()
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            right_margin: 120,
            indent_size: 4,
            continuation_indent_size: 8,
            keep_blank_lines: 2,
            keep_line_breaks: true,
            keep_line_breaks_in_text: true,
            keep_whitespaces: false,
            align_attributes: true,
            align_text: false,
            attribute_wrap: WrapMode::WrapAsNeeded,
            text_wrap: WrapMode::WrapAsNeeded,
            quote_style: QuoteStyle::Double,
            enforce_quotes: false,
            do_not_align_children_of_min_lines: 0,
            do_not_indent_children_of: names("html,body,thead,tbody,tfoot"),
            inline_elements: names(
                "a,abbr,acronym,b,basefont,bdo,big,br,cite,code,dfn,em,font,i,img,input,kbd,\
                 label,q,s,samp,select,small,span,strike,strong,sub,sup,textarea,tt,u,var",
            ),
            keep_whitespaces_inside: names("span,pre,textarea"),
            space_inside_empty_tag: false,
        }
    }
}

impl Configuration {
    /// Read a JSON settings file. Options not mentioned keep their default
    /// values. The result is validated before it is returned.
    pub fn load(filename: &Path) -> Result<Configuration, ConfigurationError> {
        let content =
            std::fs::read_to_string(filename).map_err(|error| ConfigurationError::Unreadable {
                details: format!("{}: {}", filename.display(), error.kind()),
            })?;

        let configuration: Configuration =
            serde_json::from_str(&content).map_err(|error| ConfigurationError::Unreadable {
                details: format!("{}: {}", filename.display(), error),
            })?;

        debug!(?configuration);
        configuration.validate()
    }

    /// Reject option combinations that cannot produce sensible output.
    pub fn validate(self) -> Result<Configuration, ConfigurationError> {
        self.check()?;
        Ok(self)
    }

    pub(crate) fn check(&self) -> Result<(), ConfigurationError> {
        if self.right_margin == 0 {
            return Err(ConfigurationError::ZeroMargin);
        }

        for (option, width) in [
            ("indent-size", self.indent_size),
            ("continuation-indent-size", self.continuation_indent_size),
        ] {
            if width > MAXIMUM_INDENT {
                return Err(ConfigurationError::IndentTooWide { option, width });
            }
        }

        for (option, list) in [
            ("do-not-indent-children-of", &self.do_not_indent_children_of),
            ("inline-elements", &self.inline_elements),
            ("keep-whitespaces-inside", &self.keep_whitespaces_inside),
        ] {
            if let Some(name) = list
                .iter()
                .find(|name| !is_valid_tag_name(name))
            {
                return Err(ConfigurationError::InvalidTagName {
                    option,
                    name: name.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn is_inline(&self, name: &str) -> bool {
        contains(&self.inline_elements, name)
    }

    pub fn keeps_whitespaces_inside(&self, name: &str) -> bool {
        contains(&self.keep_whitespaces_inside, name)
    }

    pub fn does_not_indent_children_of(&self, name: &str) -> bool {
        contains(&self.do_not_indent_children_of, name)
    }

    /// Text is filled greedily under both wrapping modes; `WrapAlways`
    /// does not break after every word.
    pub fn wraps_text(&self) -> bool {
        self.text_wrap != WrapMode::DoNotWrap
    }
}

fn contains(list: &[String], name: &str) -> bool {
    list.iter()
        .any(|entry| entry.eq_ignore_ascii_case(name))
}

fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}
