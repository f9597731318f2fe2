//! Category Directory Module
//!
//! Tracks which recipe categories currently exist as live partitions.
//!
//! ## Core Concepts
//! - **Naming**: A category label maps to a physical partition name through a
//!   pure normalization (`directory::partition_name`). Labels that differ
//!   only in case or whitespace share one partition.
//! - **Lifecycle**: Partitions are created lazily on first write and dropped
//!   once their last document is removed. Only partitions holding at least
//!   one document count as existing categories.
//! - **Freshness**: The directory is consulted anew on every query; nothing
//!   about the live category set is cached across calls.

pub mod directory;
