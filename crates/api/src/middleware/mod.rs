//! Request extractors guarding the admin area.
//!
//! - [`auth::AuthUser`] -- requires a valid session bearer token.

pub mod auth;
