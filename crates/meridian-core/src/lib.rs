//! # meridian-core — Foundational Types for Project Meridian
//!
//! The vocabulary every other `meridian-*` crate speaks. It depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for every category.** `Region`, `Crime`,
//!    `JurisdictionBasis` and `Classification` are exhaustive enums. Adding a
//!    variant forces every `match` in the workspace to handle it.
//!
//! 2. **Canonical spellings live here.** Region names, crime labels and the
//!    jurisdiction-basis substring rules are defined once and shared by the
//!    classifier, the aggregator and the chart views.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is always UTC with seconds
//!    precision, matching the snapshot envelope format.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `meridian-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod basis;
pub mod classification;
pub mod crime;
pub mod error;
pub mod identity;
pub mod region;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use basis::{BasisRule, JurisdictionBasis};
pub use classification::Classification;
pub use crime::{Crime, CRIME_COUNT};
pub use error::MeridianError;
pub use identity::IsoCode;
pub use region::Region;
pub use temporal::Timestamp;

/// The `Status` value that admits a record into published statistics.
pub const UN_MEMBER_STATUS: &str = "UN Member State";
