use anyhow::Context;
use time::Month;

use account_store::{
    seed::{birth_month_stats, demo_accounts, seed_accounts, smoke_check},
    AccountStore, AppConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "account_store=debug,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env().context("load configuration")?;
    tracing::info!(
        app = %config.app.name,
        version = %config.app.version,
        debug = config.app.debug,
        db = %config.database.path.display(),
        "starting bootstrap"
    );

    let store = AccountStore::open(config).await?;

    let accounts = demo_accounts();
    let report = seed_accounts(&store, accounts)
        .await
        .context("seed demo accounts")?;
    tracing::info!(created = report.created, skipped = report.skipped, rejected = report.rejected, "demo accounts");

    if let Some(first) = accounts.first() {
        let smoke = smoke_check(&store, first.email, first.password)
            .await
            .context("smoke check")?;
        if smoke.passed() {
            tracing::info!(listed = smoke.listed, "smoke check passed");
        } else {
            tracing::warn!(?smoke, "smoke check failed");
        }
    }

    let users = store.list_all().await.context("list users")?;
    tracing::info!(total = users.len(), "users in store");
    for (month, count) in birth_month_stats(&users) {
        let month = Month::try_from(month).map(|m| m.to_string()).unwrap_or_default();
        tracing::info!(%month, count, "birthdays");
    }

    println!("{}", serde_json::to_string_pretty(&users)?);

    store.close().await;
    Ok(())
}
