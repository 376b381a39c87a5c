//! The content layer: entity schemas, normalization, league slug aliasing
//! and typed data access over the content API.

pub mod api;
pub mod cache;
pub mod league_slugs;
pub mod models;
pub mod normalize;
pub mod resource;
pub mod schema;

pub use api::{ContentApi, HttpSource, RecordSource};
pub use league_slugs::{accepted_slugs, canonical_slug};
pub use normalize::{TimestampPolicy, normalize_record, normalize_records};
pub use resource::Resource;
pub use schema::{Schema, ValidationError, Violation, ViolationKind, validate_all};
