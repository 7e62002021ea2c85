// Types representing HTML documents and the errors raised handling them

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
