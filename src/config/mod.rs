// Formatting options and element classification

mod settings;
pub mod tags;

// Re-export all public symbols
pub use settings::*;
