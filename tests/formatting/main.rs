mod golden;
mod properties;
mod ranges;
