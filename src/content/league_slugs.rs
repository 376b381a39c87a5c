//! League slug aliasing.
//!
//! Older rows tag leagues with historical slugs (`premier`, `league1`, ...).
//! Every league filter in the crate resolves the requested slug through this
//! one table so the accepted set can never drift between entities.

/// Canonical slug and every raw slug accepted for it, canonical first.
pub const LEAGUE_SLUG_ALIASES: &[(&str, &[&str])] = &[
    ("premier-league", &["premier-league", "premier"]),
    ("league-one", &["league-one", "league1"]),
    ("higher-league", &["higher-league", "higher"]),
    (
        "womens-premier-league",
        &["womens-premier-league", "women-premier"],
    ),
    ("ethiopian-cup", &["ethiopian-cup", "cup"]),
];

/// Raw slugs that count as a given league.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptedSlugs<'a> {
    Mapped(&'static [&'static str]),
    /// Slug not in the table; only itself matches.
    Identity(&'a str),
}

impl AcceptedSlugs<'_> {
    pub fn contains(&self, raw: &str) -> bool {
        match self {
            AcceptedSlugs::Mapped(slugs) => slugs.iter().any(|s| *s == raw),
            AcceptedSlugs::Identity(slug) => *slug == raw,
        }
    }
}

/// Resolves a league slug to its accepted set. Never fails: unknown slugs map
/// to themselves.
pub fn accepted_slugs(slug: &str) -> AcceptedSlugs<'_> {
    LEAGUE_SLUG_ALIASES
        .iter()
        .find(|(canonical, _)| *canonical == slug)
        .map(|(_, accepted)| AcceptedSlugs::Mapped(*accepted))
        .unwrap_or(AcceptedSlugs::Identity(slug))
}

/// Maps a raw or historical slug back to its canonical slug.
pub fn canonical_slug(raw: &str) -> &str {
    LEAGUE_SLUG_ALIASES
        .iter()
        .find(|(_, accepted)| accepted.iter().any(|s| *s == raw))
        .map(|(canonical, _)| *canonical)
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premier_league_accepts_alias() {
        let accepted = accepted_slugs("premier-league");
        assert!(accepted.contains("premier-league"));
        assert!(accepted.contains("premier"));
        assert!(!accepted.contains("league-one"));
    }

    #[test]
    fn test_unknown_slug_is_identity() {
        let accepted = accepted_slugs("unknown-slug");
        assert_eq!(accepted, AcceptedSlugs::Identity("unknown-slug"));
        assert!(accepted.contains("unknown-slug"));
        assert!(!accepted.contains("unknown"));
    }

    #[test]
    fn test_alias_is_not_a_canonical_key() {
        // Asking for the historical slug itself only matches that slug.
        let accepted = accepted_slugs("premier");
        assert!(accepted.contains("premier"));
        assert!(!accepted.contains("premier-league"));
    }

    #[test]
    fn test_canonical_slug_reverses_aliases() {
        assert_eq!(canonical_slug("league1"), "league-one");
        assert_eq!(canonical_slug("league-one"), "league-one");
        assert_eq!(canonical_slug("premier"), "premier-league");
        assert_eq!(canonical_slug("regional"), "regional");
    }

    #[test]
    fn test_table_is_consistent() {
        for (canonical, accepted) in LEAGUE_SLUG_ALIASES {
            assert_eq!(accepted.first(), Some(canonical));
            assert!(crate::content::schema::rules::is_slug(canonical));
        }
    }
}
