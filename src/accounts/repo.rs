use sqlx::SqlitePool;
use time::Date;

use super::repo_types::{PublicUser, UserSummary};

/// Insert a new user row. The digest must already be computed.
pub async fn insert_user(
    db: &SqlitePool,
    name: &str,
    birthdate: Date,
    email: &str,
    password_digest: &str,
) -> Result<i64, sqlx::Error> {
    let res = sqlx::query(
        r#"
        INSERT INTO users (name, birthdate, email, password_digest)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(name)
    .bind(birthdate)
    .bind(email)
    .bind(password_digest)
    .execute(db)
    .await?;
    Ok(res.last_insert_rowid())
}

/// Single lookup on the (email, digest) pair.
pub async fn find_by_credentials(
    db: &SqlitePool,
    email: &str,
    password_digest: &str,
) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, name, email, birthdate
        FROM users
        WHERE email = ?1 AND password_digest = ?2
        "#,
    )
    .bind(email)
    .bind(password_digest)
    .fetch_optional(db)
    .await
}

pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, name, email, birthdate
        FROM users
        WHERE email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn list_all(db: &SqlitePool) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, name, email, birthdate, created_at
        FROM users
        ORDER BY name
        "#,
    )
    .fetch_all(db)
    .await
}

/// Apply the supplied fields in one statement; `None` keeps the stored value.
/// Returns the number of rows touched.
pub async fn update_fields(
    db: &SqlitePool,
    email: &str,
    name: Option<&str>,
    birthdate: Option<Date>,
    password_digest: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        r#"
        UPDATE users
           SET name            = COALESCE(?1, name),
               birthdate       = COALESCE(?2, birthdate),
               password_digest = COALESCE(?3, password_digest)
         WHERE email = ?4
        "#,
    )
    .bind(name)
    .bind(birthdate)
    .bind(password_digest)
    .bind(email)
    .execute(db)
    .await?;
    Ok(res.rows_affected())
}

pub async fn delete_by_email(db: &SqlitePool, email: &str) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM users WHERE email = ?1")
        .bind(email)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await
}
