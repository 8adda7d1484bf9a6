//! File input and output for demand tables.

/// CSV export and re-import of demand tables.
pub mod export;
