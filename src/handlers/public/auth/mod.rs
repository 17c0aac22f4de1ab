//! Authentication endpoints proxied to the Supabase Auth API.
//!
//! The service never mints or stores tokens itself: login relays the
//! password grant, register relays admin user creation, recover relays
//! the password recovery email. Upstream status and diagnostics are
//! surfaced to the caller.

pub mod login;
pub mod recover;
pub mod register;

pub use login::login;
pub use recover::recover;
pub use register::register;
