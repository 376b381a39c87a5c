//! The content collections and their per-endpoint settings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::revalidate;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Leagues,
    Matches,
    Teams,
    Players,
    TopScorers,
    Seasons,
    Users,
    Authors,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Leagues,
        Resource::Matches,
        Resource::Teams,
        Resource::Players,
        Resource::TopScorers,
        Resource::Seasons,
        Resource::Users,
        Resource::Authors,
    ];

    /// Path segment under `/api/`.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Leagues => "leagues",
            Resource::Matches => "matches",
            Resource::Teams => "teams",
            Resource::Players => "players",
            Resource::TopScorers => "top-scorers",
            Resource::Seasons => "seasons",
            Resource::Users => "users",
            Resource::Authors => "authors",
        }
    }

    /// Provider table name.
    pub fn table(&self) -> &'static str {
        match self {
            Resource::TopScorers => "top_scorers",
            other => other.path(),
        }
    }

    /// Singular name used in handler messages.
    pub fn entity(&self) -> &'static str {
        match self {
            Resource::Leagues => "league",
            Resource::Matches => "match",
            Resource::Teams => "team",
            Resource::Players => "player",
            Resource::TopScorers => "top scorer",
            Resource::Seasons => "season",
            Resource::Users => "user",
            Resource::Authors => "author",
        }
    }

    /// How long a successful collection response may be reused.
    pub fn revalidate(&self) -> Duration {
        let seconds = match self {
            Resource::Matches => revalidate::VOLATILE_SECONDS,
            Resource::Users => 0,
            _ => revalidate::STATIC_SECONDS,
        };
        Duration::from_secs(seconds)
    }

    /// Provider ordering for list queries as `(column, ascending)`.
    pub fn order(&self) -> Option<(&'static str, bool)> {
        match self {
            Resource::Matches => Some(("date", true)),
            Resource::TopScorers => Some(("goals", false)),
            Resource::Seasons => Some(("start_date", false)),
            Resource::Leagues | Resource::Teams | Resource::Players => Some(("name_en", true)),
            Resource::Users | Resource::Authors => Some(("created_at", false)),
        }
    }

    /// Users are created by sign-up, never through the content API.
    pub fn accepts_create(&self) -> bool {
        !matches!(self, Resource::Users)
    }

    pub fn admin_only_read(&self) -> bool {
        matches!(self, Resource::Users)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.path() == wanted || r.table() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Resource::ALL.iter().map(|r| r.path()).collect();
                AppError::config_error(format!(
                    "Unknown resource '{s}'. Expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}
