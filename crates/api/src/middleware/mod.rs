//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the session user and tenant from a JWT Bearer token.

pub mod auth;
