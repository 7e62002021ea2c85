pub mod config;
pub mod formatting;
pub mod language;
pub mod parsing;

pub use config::Configuration;
pub use formatting::{format, reformat_range};
pub use language::FormattingError;
