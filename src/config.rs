use crate::error::{BadEnvVarSnafu, ParseNumberSnafu, ParsePortSnafu, RosterResult};
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::sync::Arc;

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    server_config: Arc<ServerConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Self::from_lookup(dotenvy::var)
    }

    /// Builds the configuration from an arbitrary variable source, `dotenvy::var` for [`Self::new`].
    pub fn from_lookup(lookup: impl Fn(&'static str) -> dotenvy::Result<String>) -> RosterResult<Self> {
        Ok(Self {
            db_config: Arc::new(DbConfig::from_lookup(&lookup)?),
            server_config: Arc::new(ServerConfig::from_lookup(&lookup)?),
        })
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub fn server_config(&self) -> Arc<ServerConfig> {
        self.server_config.clone()
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    path: String,
    port: u16,
    database: String,
    max_connections: u32,
}

impl DbConfig {
    fn from_lookup(lookup: &impl Fn(&'static str) -> dotenvy::Result<String>) -> RosterResult<Self> {
        let get_env_var = |name| lookup(name).context(BadEnvVarSnafu { name });

        let max_connections = match lookup("DB_MAX_CONNECTIONS").ok() {
            Some(original) => original.parse().context(ParseNumberSnafu {
                name: "DB_MAX_CONNECTIONS",
                original,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            user: get_env_var("DB_USER")?,
            password: SecretString::from(get_env_var("DB_PASSWORD")?),
            path: get_env_var("DB_PATH")?,
            port: get_env_var("DB_PORT")?.parse().context(ParsePortSnafu)?,
            database: get_env_var("DB_NAME")?,
            max_connections,
        })
    }

    pub fn get_db_path(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.path,
            self.port,
            self.database
        )
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }
}

#[derive(Debug)]
pub struct ServerConfig {
    server_ip: String,
    cors_origins: Vec<String>,
    body_limit: usize,
}

impl ServerConfig {
    fn from_lookup(lookup: &impl Fn(&'static str) -> dotenvy::Result<String>) -> RosterResult<Self> {
        let server_ip = lookup("ROSTER_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string());

        let cors_origins = lookup("ROSTER_CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let body_limit = match lookup("ROSTER_BODY_LIMIT").ok() {
            Some(original) => original.parse().context(ParseNumberSnafu {
                name: "ROSTER_BODY_LIMIT",
                original,
            })?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(Self {
            server_ip,
            cors_origins,
            body_limit,
        })
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub const fn body_limit(&self) -> usize {
        self.body_limit
    }
}
