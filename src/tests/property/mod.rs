//! Property-based tests for the sheet pipeline
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `sanitizer_props`: Tests for the description sanitizer
//!   - Idempotent: sanitizing twice equals sanitizing once
//!   - Tag-free text passes through unchanged
//!   - Markup without placeholders only loses style attributes
//!
//! - `sorter_props`: Tests for the section sort orders
//!   - Sorting is a permutation of the input
//!   - Sorting is stable for tied keys
//!   - Sorted output is ordered by the comparator
//!   - Sorting sorted output changes nothing
//!
//! - `normalizer_props`: Tests for the normalizer
//!   - Deterministic for the same document
//!   - Every item lands in exactly one bucket under the default policy
//!   - Drop policy accounts for every item
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod sanitizer_props;
mod sorter_props;
