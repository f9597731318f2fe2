//! Partition Catalog Module
//!
//! The storage substrate: a concurrent in-memory catalog of named partitions,
//! each holding documents keyed by id.
//!
//! ## Core Concepts
//! - **Partitions**: Documents are grouped into named collections that are
//!   created and dropped at runtime; the catalog itself attaches no meaning
//!   to partition names.
//! - **Atomicity**: Individual document operations are atomic. Nothing spans
//!   two documents or two partitions; callers that need cross-partition
//!   coordination build it on top (and live with the gaps).
//! - **Lifecycle**: Partition creation is idempotent and re-entrant, so a
//!   partition dropped a moment before a writer intended to use it is simply
//!   recreated on the next write.

pub mod memory;

#[cfg(test)]
mod tests;
