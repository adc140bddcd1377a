use config::{Config, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend{
    Postgres,
    Memory
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings{
    pub backend: StoreBackend,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub name: String,
    pub max_connections: u32
}

impl DatabaseSettings {
    // Url of the postgres server, without selecting a database
    pub fn get_database_url(&self) -> String{
        format!(
            "postgres://{}:{}@{}:{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port
        )
    }

    pub fn get_database_table_url(&self) -> String{
        format!("{}/{}", self.get_database_url(), self.name)
    }
}

impl Settings{
    /// Reads `configuration/base.yaml`, then applies `APP__SECTION__KEY`
    /// environment overrides (e.g. `APP__DATABASE__BACKEND=memory`).
    pub fn get() -> Result<Self, config::ConfigError>{
        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
