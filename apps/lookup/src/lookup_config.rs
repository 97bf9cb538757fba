use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use userlookup_core::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresRuntimeConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserStoreConfig {
    Memory,
    Postgres(PostgresRuntimeConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub user_store: UserStoreConfig,
    pub seed_path: Option<PathBuf>,
}

impl LookupConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_source(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_source(source: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let user_store = match source("USER_STORE")
            .unwrap_or_else(|| "memory".to_owned())
            .trim()
        {
            "memory" => UserStoreConfig::Memory,
            "postgres" => {
                let database_url = required_non_empty(&source, "DATABASE_URL")?;
                let max_connections = parse_or_default(&source, "DATABASE_MAX_CONNECTIONS", 5_u32)?;
                let acquire_timeout_ms =
                    parse_or_default(&source, "DATABASE_ACQUIRE_TIMEOUT_MS", 5000_u64)?;

                if max_connections == 0 {
                    return Err(AppError::Validation(
                        "DATABASE_MAX_CONNECTIONS must be greater than zero".to_owned(),
                    ));
                }

                if acquire_timeout_ms == 0 {
                    return Err(AppError::Validation(
                        "DATABASE_ACQUIRE_TIMEOUT_MS must be greater than zero".to_owned(),
                    ));
                }

                UserStoreConfig::Postgres(PostgresRuntimeConfig {
                    database_url,
                    max_connections,
                    acquire_timeout_ms,
                })
            }
            other => {
                return Err(AppError::Validation(format!(
                    "USER_STORE must be either 'memory' or 'postgres', got '{other}'"
                )));
            }
        };

        let seed_path = source("USER_SEED_PATH")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            user_store,
            seed_path,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn required_non_empty(
    source: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = source(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parse_or_default<T>(
    source: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match source(name) {
        Some(value) => value.trim().parse::<T>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}
