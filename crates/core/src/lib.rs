//! Domain building blocks shared by every vowreel crate.
//!
//! Nothing in here performs I/O: slug and upload rules, the error taxonomy,
//! content route naming and the client-side asset list operations are all
//! pure functions so the db, storage and api crates can lean on them.

pub mod asset_list;
pub mod content;
pub mod error;
pub mod slug;
pub mod types;
pub mod upload;
pub mod validation;
