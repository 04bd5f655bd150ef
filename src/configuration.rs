use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub auth_url: String,
    pub redis: RedisSettings,
    pub weather: WeatherSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct WeatherSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CacheSettings {
    pub products_ttl_seconds: u64,
    pub weather_ttl_seconds: u64,
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

impl RedisSettings {
    pub fn connection_string(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Add configuration values from a file named `configuration`
    // with the .yaml extension
    let mut settings = config::Config::default();
    settings.merge(config::File::with_name("configuration"))?; // .json, .toml, .yaml, .yml

    let mut config: Settings = settings.try_deserialize()?;

    // The weather provider key is a secret and comes from the environment,
    // never from the configuration file
    if let Ok(api_key) = std::env::var("WEATHER_API_KEY") {
        config.weather.api_key = api_key;
    }

    Ok(config)
}
