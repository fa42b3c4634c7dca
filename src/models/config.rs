use serde::Deserialize;

/// Configuration options specific to the segmentation service.
///
/// Built once at startup and handed to the components that need it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Interface the HTTP server binds to.
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum number of pooled database connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_database_url() -> String {
    "segments.db".to_string()
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_pool_size() -> u32 {
    8
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            address: default_address(),
            port: default_port(),
            pool_size: default_pool_size(),
        }
    }
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Load configuration from `<dir>/default.yaml`, `<dir>/<APP_ENV>.yaml`
    /// and `APP_*` environment variables, later sources overriding earlier
    /// ones. Missing files are skipped.
    pub fn load(dir: &std::path::Path) -> Result<Self, config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(app_env)).required(false))
            .add_source(config::Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
