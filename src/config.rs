use std::env;

use thiserror::Error;

/// Names of the two source tables in the database.
pub const GDP_TABLE: &str = "brics_pib";
pub const POPULATION_TABLE: &str = "brics_populacao";

/// Environment variable selecting the offline data directory. When set, the
/// app reads `brics_pib.csv` / `brics_populacao.csv` from that directory
/// instead of connecting to Postgres.
pub const DATA_DIR_VAR: &str = "BRICS_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}

/// Database connection settings read from the environment.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    /// Read `DB_HOST`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: require("DB_HOST")?,
            dbname: require("DB_NAME")?,
            user: require("DB_USER")?,
            password: require("DB_PASSWORD")?,
        })
    }

    /// libpq-style connection string for [`postgres::Client::connect`].
    pub fn connection_string(&self) -> String {
        format!(
            "host={} dbname={} user={} password={}",
            self.host, self.dbname, self.user, self.password
        )
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_string_has_libpq_shape() {
        let cfg = DbConfig {
            host: "127.0.0.1".into(),
            dbname: "brics".into(),
            user: "dash".into(),
            password: "secret".into(),
        };
        assert_eq!(
            cfg.connection_string(),
            "host=127.0.0.1 dbname=brics user=dash password=secret"
        );
    }
}
