/// Sheetview - TTRPG Sheet Viewer Data Pipeline
///
/// Core library that loads an exported snapshot of player inventories,
/// spells, features, settlement buildings/effects and journals, and reshapes
/// it into sorted, display-ready groupings for a read-only viewer.

pub mod config;
pub mod core;
pub mod ingestion;

pub use crate::config::ViewerConfig;
pub use crate::core::sheet::{LoadError, SheetData};
pub use crate::ingestion::initialize;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
