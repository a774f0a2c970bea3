use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://invento.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("APP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|err| anyhow::anyhow!("APP_PORT {raw:?} is not a port: {err}"))?,
            Err(_) => 3000,
        };
        Ok(Self {
            port,
            database_url,
            host,
        })
    }
}
