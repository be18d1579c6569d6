use serde::Serialize;
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime};

/// Public projection of a user record. The password digest is never selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub birthdate: Date,
}

/// Listing row: the public projection plus the creation timestamp (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub birthdate: Date,
    pub created_at: PrimitiveDateTime,
}
