//! Request middleware.
//!
//! Protected route groups are wrapped with [`auth::require_token`], one layer
//! per token domain, so handlers only ever see a verified principal.

pub mod auth;
