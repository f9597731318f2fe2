//! Partitioned Recipe Store Library
//!
//! This library crate defines the core modules that make up the service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of three layered subsystems:
//!
//! - **`catalog`**: The storage substrate. A concurrent in-memory catalog of
//!   named partitions offering per-document atomicity and nothing across
//!   partitions.
//! - **`category`**: The partition directory. Derives partition names from
//!   category labels, creates partitions lazily, and drops them once empty;
//!   the live category set is whatever partitions currently hold documents.
//! - **`recipe`**: The scatter-gather document store and its HTTP surface.
//!   Writes route to a single resolved partition; category-unaware reads fan
//!   out across every partition and merge into one unordered result set.

pub mod catalog;
pub mod category;
pub mod error;
pub mod recipe;
