//! Clients for the external Supabase platform.

pub mod supabase;

pub use supabase::SupabaseClient;
