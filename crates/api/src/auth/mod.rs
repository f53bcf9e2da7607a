//! Authentication primitives.
//!
//! - [`jwt`] -- verification of the session provider's HS256 bearer tokens.

pub mod jwt;
