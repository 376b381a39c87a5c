//! Client for the hosted relational data/auth/storage provider.

mod client;
mod query;

pub use client::{AuthUser, ProviderClient};
pub use query::Query;
