//! Typed content records.

mod author;
mod common;
mod fixture;
mod league;
mod player;
mod season;
mod team;
mod top_scorer;
mod user;

pub use author::Author;
pub use common::LeagueScoped;
pub use fixture::{Match, MatchStatus};
pub use league::{League, LeagueCategory};
pub use player::{Player, PlayerPosition};
pub use season::Season;
pub use team::Team;
pub use top_scorer::TopScorer;
pub use user::{User, UserRole};
