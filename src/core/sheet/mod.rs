//! Sheet Normalization Pipeline
//!
//! Reshapes an exported snapshot of player inventories, spells, features,
//! settlement buildings/effects and journals into display-ready groupings.
//!
//! # Pipeline
//!
//! ```text
//! RawDocument ──► classifier ──► per-section buckets ──► sorters ──► SheetData
//!                                                                      │
//!                              sanitizer / display helpers ◄───────────┘
//! ```
//!
//! The produced [`SheetData`] is immutable; the renderer looks up items by
//! actor name, [`Section`] tag and journal id.

pub mod classifier;
pub mod collation;
pub mod display;
pub mod error;
pub mod normalizer;
pub mod sanitizer;
pub mod sorters;
pub mod types;

pub use classifier::{ClassificationMode, ClassificationPolicy, UnknownTypePolicy};
pub use error::{LoadError, Result};
pub use normalizer::{normalize, NormalizationReport, Normalizer};
pub use sanitizer::{sanitize, Sanitizer, SanitizerConfig};
pub use types::{
    ActorSheet, Capacity, RawDocument, RawItem, RawJournal, Section, SettlementData, SheetData,
};
