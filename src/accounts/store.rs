use std::sync::Arc;

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::{error, info, instrument, warn};

use super::{
    dto::{Ack, NewUser, UserPatch},
    password::digest_password,
    repo,
    repo_types::{PublicUser, UserSummary},
};
use crate::{
    config::AppConfig,
    db,
    error::{StoreError, StoreResult},
};

const SUPPORTED_HASH_ALGORITHM: &str = "sha256";

/// Owns the `users` table and mediates every credential check.
///
/// Cloning is cheap: clones share the pool and the configuration.
#[derive(Clone)]
pub struct AccountStore {
    db: SqlitePool,
    config: Arc<AppConfig>,
}

fn storage_error(op: &'static str, e: sqlx::Error) -> StoreError {
    error!(error = %e, op, "storage failure");
    StoreError::Storage(e)
}

impl AccountStore {
    /// Open the configured data file and make sure the schema exists.
    ///
    /// This is the only fallible step that is meant to stop the process.
    pub async fn open(config: AppConfig) -> anyhow::Result<Self> {
        if !config
            .security
            .hash_algorithm
            .eq_ignore_ascii_case(SUPPORTED_HASH_ALGORITHM)
        {
            warn!(
                configured = %config.security.hash_algorithm,
                using = SUPPORTED_HASH_ALGORITHM,
                "hash_algorithm is not enforced; passwords are digested with sha256"
            );
        }
        let db = db::connect(&config.database).await?;
        let store = Self::from_parts(db, Arc::new(config));
        store.init().await?;
        Ok(store)
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Idempotent schema setup; existing rows are left untouched.
    pub async fn init(&self) -> anyhow::Result<()> {
        db::migrate(&self.db)
            .await
            .with_context(|| format!("initialise {}", self.config.database.path.display()))?;
        info!(path = %self.config.database.path.display(), "account store ready");
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Close every pooled connection. Later calls fail with a storage error.
    pub async fn close(&self) {
        self.db.close().await;
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: &NewUser) -> StoreResult<Ack> {
        let digest = digest_password(&user.password);
        let msgs = &self.config.messages;
        match repo::insert_user(&self.db, &user.name, user.birthdate, &user.email, &digest).await {
            Ok(id) => {
                info!(user_id = id, "user registered");
                Ok(Ack::new(&msgs.user_registered))
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!("email already registered");
                Err(StoreError::DuplicateEmail(msgs.email_taken.clone()))
            }
            Err(e) => Err(storage_error("register", e)),
        }
    }

    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> StoreResult<PublicUser> {
        let digest = digest_password(password);
        match repo::find_by_credentials(&self.db, email, &digest).await {
            Ok(Some(user)) => {
                info!(user_id = user.id, "user authenticated");
                Ok(user)
            }
            Ok(None) => {
                warn!("authentication failed");
                Err(StoreError::InvalidCredentials(
                    self.config.messages.invalid_credentials.clone(),
                ))
            }
            Err(e) => Err(storage_error("authenticate", e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> StoreResult<PublicUser> {
        match repo::find_by_email(&self.db, email).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(StoreError::NotFound(
                self.config.messages.user_not_found.clone(),
            )),
            Err(e) => Err(storage_error("find_by_email", e)),
        }
    }

    /// All users ordered by name (binary collation), with creation time.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> StoreResult<Vec<UserSummary>> {
        repo::list_all(&self.db)
            .await
            .map_err(|e| storage_error("list_all", e))
    }

    /// Change only the supplied fields of the user identified by `email`,
    /// all in one statement. An empty patch never reaches the database.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, email: &str, patch: UserPatch) -> StoreResult<Ack> {
        let msgs = &self.config.messages;
        let patch = patch.normalized();
        if patch.is_empty() {
            warn!("update without fields");
            return Err(StoreError::NoFieldsProvided(msgs.no_fields.clone()));
        }

        let digest = patch.new_password.as_deref().map(digest_password);
        let touched = repo::update_fields(
            &self.db,
            email,
            patch.name.as_deref(),
            patch.birthdate,
            digest.as_deref(),
        )
        .await
        .map_err(|e| storage_error("update", e))?;

        if touched == 0 {
            warn!("update target not found");
            return Err(StoreError::NotFound(msgs.user_not_found.clone()));
        }
        info!(
            name = patch.name.is_some(),
            birthdate = patch.birthdate.is_some(),
            password = patch.new_password.is_some(),
            "user updated"
        );
        Ok(Ack::new(&msgs.user_updated))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, email: &str) -> StoreResult<Ack> {
        let msgs = &self.config.messages;
        let removed = repo::delete_by_email(&self.db, email)
            .await
            .map_err(|e| storage_error("delete", e))?;
        if removed == 0 {
            warn!("delete target not found");
            return Err(StoreError::NotFound(msgs.user_not_found.clone()));
        }
        info!("user deleted");
        Ok(Ack::new(&msgs.user_deleted))
    }

    pub async fn count(&self) -> StoreResult<i64> {
        repo::count(&self.db)
            .await
            .map_err(|e| storage_error("count", e))
    }
}
