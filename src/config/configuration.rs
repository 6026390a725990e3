use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub seed_menus: bool,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: usize,
}

#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
}

impl Settings {
    /// Layers defaults, an optional `config.{toml,yaml,json}` file and
    /// `APP_`-prefixed environment variables (`APP_JWT__SECRET`, ...).
    pub fn new() -> Result<Self, ConfigError> {
        let mut s = Config::default();
        s.set_default("application.host", "127.0.0.1")?;
        s.set_default("application.port", 8080_i64)?;
        s.set_default("application.seed_menus", false)?;
        s.set_default("database.max_connections", 10_i64)?;
        s.merge(File::with_name("config").required(false))?;
        s.merge(Environment::with_prefix("APP").separator("__"))?;
        let settings: Settings = s.try_into()?;
        settings.ensure_secret()?;
        Ok(settings)
    }

    fn ensure_secret(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set to a non-empty value".to_string(),
            ));
        }
        Ok(())
    }
}
