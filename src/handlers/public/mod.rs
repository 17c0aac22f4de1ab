//! Public endpoints: no authenticated context is required to call these.

pub mod auth;
