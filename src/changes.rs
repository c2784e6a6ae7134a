//! Classified change records and their ordering.

/// The change record and its category enumeration.
pub mod change;

/// Pull request to change conversion.
pub mod factory;

/// Ordering by category, package and release tag.
pub mod sorter;

/// Release tag assignment from merge dates.
pub mod tags;
