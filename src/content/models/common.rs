use chrono::{DateTime, Utc};
use serde::Serializer;

use crate::content::normalize::to_iso8601;
use crate::content::schema::SchemaEnum;

/// Serializes timestamps in the same canonical form the normalizer writes.
pub mod iso8601 {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_iso8601(dt))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.serialize_str(&to_iso8601(dt)),
                None => serializer.serialize_none(),
            }
        }
    }
}

/// Serializes a [`SchemaEnum`] by its wire name.
pub fn serialize_variant<T: SchemaEnum, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_str())
}

/// Implemented by records tagged with a league slug.
pub trait LeagueScoped {
    fn league_slug(&self) -> &str;
}
