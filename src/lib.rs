//! Ethiopian Football Content Library
//!
//! This library provides the content layer for an Ethiopian football site:
//! schema-validated leagues, matches, teams, players, top scorers, seasons,
//! users and authors, a typed data-access layer over the same-origin JSON
//! API, and the axum server that implements that API on top of a hosted
//! PostgREST-style provider.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ethio_football::config::Config;
//! use ethio_football::content::models::Team;
//! use ethio_football::content::{ContentApi, HttpSource};
//! use ethio_football::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let api = ContentApi::new(HttpSource::from_config(&config)?)
//!         .with_policy(config.timestamp_policy());
//!
//!     // Also returns teams still tagged with the historical "premier" slug
//!     for team in api.by_league_slug::<Team>("premier-league").await? {
//!         println!("{} ({})", team.name_en, team.slug);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod provider;
pub mod server;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use content::models::{
    Author, League, LeagueCategory, Match, MatchStatus, Player, PlayerPosition, Season, Team,
    TopScorer, User, UserRole,
};
pub use content::{ContentApi, HttpSource, RecordSource, Resource, TimestampPolicy, ValidationError};
pub use error::AppError;
pub use provider::ProviderClient;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
