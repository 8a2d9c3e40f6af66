pub mod logging;

// Snapshot normalization: classification, sorting, sanitizing
pub mod sheet;
