use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::sqlite::SqliteConnectOptions;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub scraper: ScraperSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct ScraperSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_workers: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_timeout_secs: u64,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    let settings = config::Config::builder()
        .add_source(config::File::from(base_path.join("configuration.yaml")))
        .build()?;

    settings.try_deserialize::<Settings>()
}
