use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::env;
use std::time::Duration;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 2;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Connection pool settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            min_connections: env_parse("DB_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS),
            connect_timeout: Duration::from_secs(env_parse(
                "DB_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
            idle_timeout: Duration::from_secs(env_parse(
                "DB_IDLE_TIMEOUT_SECS",
                DEFAULT_IDLE_TIMEOUT_SECS,
            )),
        }
    }

    pub async fn connect(self) -> Result<DatabaseConnection, DbErr> {
        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .sqlx_logging(true);

        Database::connect(opt).await
    }
}

pub async fn get_database() -> Result<DatabaseConnection, DbErr> {
    DatabaseConfig::from_env().connect().await
}

fn env_parse<T: std::str::FromStr>(var_name: &str, default: T) -> T {
    match env::var(var_name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {var_name} value '{raw}', using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_falls_back_on_garbage() {
        std::env::set_var("FITIN5_TEST_POOL_SIZE", "not-a-number");
        assert_eq!(env_parse("FITIN5_TEST_POOL_SIZE", 10u32), 10);
        std::env::remove_var("FITIN5_TEST_POOL_SIZE");
    }

    #[test]
    fn env_parse_uses_default_when_unset() {
        assert_eq!(env_parse("FITIN5_TEST_UNSET_VAR", 2u32), 2);
    }
}
