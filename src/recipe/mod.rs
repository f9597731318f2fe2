//! Recipe Store Module
//!
//! CRUD and scatter-gather search over recipe documents, partitioned by
//! category.
//!
//! ## Overview
//! This module is the write and query surface of the service. Writes resolve
//! their target partition through the category directory (creating it on
//! demand, dropping it when emptied); category-unaware reads fan the same
//! predicate out across every live partition and merge the results.
//!
//! ## Responsibilities
//! - **CRUD**: create, in-place update, cross-partition move, delete.
//! - **Search**: by title, category, cooking time, ingredient, creator, and
//!   the ANDed advanced combination of those.
//! - **API**: HTTP request handlers for the axum server.
//!
//! ## Submodules
//! - **`store`**: the scatter-gather store itself.
//! - **`handlers`**: HTTP request handlers and DTOs.
//! - **`types`**: the recipe document and store input types.

pub mod handlers;
pub mod store;
pub mod types;
