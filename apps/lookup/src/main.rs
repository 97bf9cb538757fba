//! User lookup composition root.
//!
//! Builds the configured user store, seeds it when a seed file is given,
//! and answers one lookup per command-line argument as a JSON line.

#![forbid(unsafe_code)]

mod lookup_config;

use std::env;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use userlookup_application::{UserLookupService, UserSeeder, UserStore};
use userlookup_core::{AppError, AppResult};
use userlookup_domain::{User, UserId};
use userlookup_infrastructure::{InMemoryUserStore, PostgresUserStore};

use crate::lookup_config::{LookupConfig, PostgresRuntimeConfig, UserStoreConfig, init_tracing};

#[derive(Debug, Serialize)]
struct LookupOutcome {
    user_id: UserId,
    exists: bool,
    user: Option<User>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = LookupConfig::load()?;
    let user_ids = parse_user_ids(env::args().skip(1))?;
    if user_ids.is_empty() {
        warn!("no user ids given; nothing to look up");
    }

    let (user_store, user_seeder) = build_user_store(&config.user_store).await?;
    if let Some(seed_path) = config.seed_path.as_deref() {
        let users = load_seed_users(seed_path)?;
        user_seeder.insert_users(&users).await?;
        info!(
            seed_path = %seed_path.display(),
            seeded_count = users.len(),
            "user store seeded"
        );
    }

    let service = UserLookupService::new(user_store);
    for user_id in user_ids {
        let outcome = lookup(&service, user_id).await?;
        let line = serde_json::to_string(&outcome).map_err(|error| {
            AppError::Internal(format!("failed to serialize lookup result: {error}"))
        })?;
        println!("{line}");
    }

    Ok(())
}

async fn build_user_store(
    config: &UserStoreConfig,
) -> AppResult<(Arc<dyn UserStore>, Arc<dyn UserSeeder>)> {
    match config {
        UserStoreConfig::Memory => {
            info!("using in-memory user store");
            let store = Arc::new(InMemoryUserStore::new());
            Ok((store.clone(), store))
        }
        UserStoreConfig::Postgres(postgres) => {
            let pool = connect_pool(postgres).await?;
            info!(
                max_connections = postgres.max_connections,
                acquire_timeout_ms = postgres.acquire_timeout_ms,
                "using postgres user store"
            );
            let store = Arc::new(PostgresUserStore::new(pool));
            Ok((store.clone(), store))
        }
    }
}

async fn connect_pool(config: &PostgresRuntimeConfig) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
        .connect(config.database_url.as_str())
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

async fn lookup(service: &UserLookupService, user_id: UserId) -> AppResult<LookupOutcome> {
    let exists = service.user_exists(user_id).await?;
    let user = service.get_user_by_id(user_id).await?;

    Ok(LookupOutcome {
        user_id,
        exists,
        user,
    })
}

fn parse_user_ids(args: impl IntoIterator<Item = String>) -> AppResult<Vec<UserId>> {
    args.into_iter()
        .map(|arg| {
            arg.trim()
                .parse::<i32>()
                .map(UserId::new)
                .map_err(|error| AppError::Validation(format!("invalid user id '{arg}': {error}")))
        })
        .collect()
}

fn load_seed_users(path: &Path) -> AppResult<Vec<User>> {
    let contents = std::fs::read_to_string(path).map_err(|error| {
        if error.kind() == ErrorKind::NotFound {
            AppError::NotFound(format!("seed file '{}'", path.display()))
        } else {
            AppError::Internal(format!(
                "failed to read seed file '{}': {error}",
                path.display()
            ))
        }
    })?;

    serde_json::from_str::<Vec<User>>(&contents).map_err(|error| {
        AppError::Validation(format!("invalid seed file '{}': {error}", path.display()))
    })
}
