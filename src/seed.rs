//! Demo data bootstrap: registers a fixed set of accounts through the public
//! store operations and runs a quick self check against them.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    accounts::{validate_registration, AccountStore, RegistrationForm, UserSummary},
    error::{StoreError, StoreResult},
};

#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub name: &'static str,
    pub birthdate: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

impl DemoAccount {
    fn form(&self) -> RegistrationForm<'static> {
        RegistrationForm {
            name: self.name,
            birthdate: self.birthdate,
            email: self.email,
            password: self.password,
        }
    }
}

pub fn demo_accounts() -> &'static [DemoAccount] {
    const ACCOUNTS: &[DemoAccount] = &[
        DemoAccount {
            name: "João Silva",
            birthdate: "1990-05-15",
            email: "joao.silva@email.com",
            password: "123456",
        },
        DemoAccount {
            name: "Maria Santos",
            birthdate: "1985-08-22",
            email: "maria.santos@email.com",
            password: "123456",
        },
        DemoAccount {
            name: "Pedro Oliveira",
            birthdate: "1992-03-10",
            email: "pedro.oliveira@email.com",
            password: "123456",
        },
        DemoAccount {
            name: "Ana Costa",
            birthdate: "1988-12-05",
            email: "ana.costa@email.com",
            password: "123456",
        },
        DemoAccount {
            name: "Carlos Ferreira",
            birthdate: "1995-07-18",
            email: "carlos.ferreira@email.com",
            password: "123456",
        },
    ];
    ACCOUNTS
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
    pub rejected: usize,
}

/// Register every account. Already registered emails are skipped so
/// re-seeding is idempotent; storage failures abort.
#[instrument(skip_all, fields(accounts = accounts.len()))]
pub async fn seed_accounts(store: &AccountStore, accounts: &[DemoAccount]) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();
    for account in accounts {
        let user = match validate_registration(&store.config().validation, account.form()) {
            Ok(u) => u,
            Err(e) => {
                warn!(email = account.email, error = %e, "demo account rejected");
                report.rejected += 1;
                continue;
            }
        };
        match store.register(&user).await {
            Ok(_) => {
                info!(email = account.email, "demo account created");
                report.created += 1;
            }
            Err(StoreError::DuplicateEmail(msg)) => {
                warn!(email = account.email, %msg, "demo account already present");
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    info!(?report, "seeding finished");
    Ok(report)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeReport {
    pub found: bool,
    pub login_ok: bool,
    pub bad_login_rejected: bool,
    pub listed: usize,
}

impl SmokeReport {
    pub fn passed(&self) -> bool {
        self.found && self.login_ok && self.bad_login_rejected
    }
}

/// Exercise lookup, a good login, a bad login and the listing for one account.
#[instrument(skip(store, password))]
pub async fn smoke_check(store: &AccountStore, email: &str, password: &str) -> StoreResult<SmokeReport> {
    let found = match store.find_by_email(email).await {
        Ok(_) => true,
        Err(StoreError::NotFound(_)) => false,
        Err(e) => return Err(e),
    };
    let login_ok = match store.authenticate(email, password).await {
        Ok(_) => true,
        Err(StoreError::InvalidCredentials(_)) => false,
        Err(e) => return Err(e),
    };
    let wrong = format!("{password}-wrong");
    let bad_login_rejected = match store.authenticate(email, &wrong).await {
        Ok(_) => false,
        Err(StoreError::InvalidCredentials(_)) => true,
        Err(e) => return Err(e),
    };
    let listed = store.list_all().await?.len();

    Ok(SmokeReport {
        found,
        login_ok,
        bad_login_rejected,
        listed,
    })
}

/// Users per birth month, keyed by month number (1 = January).
pub fn birth_month_stats(users: &[UserSummary]) -> BTreeMap<u8, usize> {
    let mut months = BTreeMap::new();
    for u in users {
        *months.entry(u8::from(u.birthdate.month())).or_insert(0) += 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tempfile::TempDir;

    async fn open_store(dir: &TempDir) -> AccountStore {
        AccountStore::open(AppConfig::with_database_path(dir.path().join("seed.db")))
            .await
            .unwrap()
    }

    #[test]
    fn demo_accounts_pass_policy() {
        let policy = AppConfig::default().validation;
        for account in demo_accounts() {
            validate_registration(&policy, account.form()).expect(account.email);
        }
    }

    #[tokio::test]
    async fn reseeding_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let first = seed_accounts(&store, demo_accounts()).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                created: 5,
                skipped: 0,
                rejected: 0
            }
        );

        let second = seed_accounts(&store, demo_accounts()).await.unwrap();
        assert_eq!(
            second,
            SeedReport {
                created: 0,
                skipped: 5,
                rejected: 0
            }
        );
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn invalid_accounts_are_counted_not_registered() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        let accounts = [
            DemoAccount {
                name: "X",
                birthdate: "2000-01-01",
                email: "x@x.com",
                password: "123456",
            },
            DemoAccount {
                name: "Valid Name",
                birthdate: "2000-01-01",
                email: "valid@x.com",
                password: "123456",
            },
        ];
        let report = seed_accounts(&store, &accounts).await.unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn seeding_aborts_on_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        store.close().await;
        let err = seed_accounts(&store, demo_accounts()).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::StorageError);
    }

    #[tokio::test]
    async fn smoke_check_against_seeded_store() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        seed_accounts(&store, demo_accounts()).await.unwrap();

        let report = smoke_check(&store, "joao.silva@email.com", "123456").await.unwrap();
        assert!(report.passed());
        assert_eq!(report.listed, 5);

        let missing = smoke_check(&store, "nobody@email.com", "123456").await.unwrap();
        assert!(!missing.found);
        assert!(!missing.login_ok);
        assert!(missing.bad_login_rejected);
        assert!(!missing.passed());
    }

    #[tokio::test]
    async fn month_stats_count_seeded_birthdays() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        seed_accounts(&store, demo_accounts()).await.unwrap();

        let stats = birth_month_stats(&store.list_all().await.unwrap());
        let expected: BTreeMap<u8, usize> = [(3, 1), (5, 1), (7, 1), (8, 1), (12, 1)].into_iter().collect();
        assert_eq!(stats, expected);
    }
}
