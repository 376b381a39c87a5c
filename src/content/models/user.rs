use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::common::{iso8601, serialize_variant};
use crate::content::normalize::DateField;
use crate::content::resource::Resource;
use crate::content::schema::{FieldReader, Schema, SchemaEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl SchemaEnum for UserRole {
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("user", UserRole::User), ("admin", UserRole::Admin)];
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// Profile row mirrored from the auth provider. Rows are created by sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct User {
    pub id: Uuid,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(serialize_with = "serialize_variant")]
    pub role: UserRole,
    #[serde(serialize_with = "iso8601::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "iso8601::serialize")]
    pub updated_at: DateTime<Utc>,
    #[serde(serialize_with = "iso8601::option::serialize")]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl Schema for User {
    const ENTITY: &'static str = "user";
    const RESOURCE: Resource = Resource::Users;
    const DATE_FIELDS: &'static [DateField] = &[
        DateField::timestamp("created_at"),
        DateField::timestamp("updated_at"),
        DateField::date("last_sign_in_at"),
    ];

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            id: reader.uuid("id"),
            email: reader.opt_string("email"),
            role: reader.variant_or("role", UserRole::default()),
            created_at: reader.datetime("created_at"),
            updated_at: reader.datetime("updated_at"),
            last_sign_in_at: reader.opt_datetime("last_sign_in_at"),
        }
    }
}
