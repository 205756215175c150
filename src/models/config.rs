use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration of the notes server.
///
/// Values are layered: built-in defaults, `config/default.yaml`,
/// `config/{APP_ENV}.yaml` and finally `APP_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// SQLite database path or URL.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// Directory holding the tera templates.
    pub templates_dir: String,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Config::builder()
            .set_default("database_url", "notes.db")?
            .set_default("address", "127.0.0.1")?
            .set_default("port", 3001)?
            .set_default("templates_dir", "templates")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    /// Glob handed to tera when loading templates.
    pub fn templates_glob(&self) -> String {
        format!("{}/**/*", self.templates_dir.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_templates_glob_without_double_slash() {
        let config = ServerConfig {
            database_url: "notes.db".into(),
            address: "127.0.0.1".into(),
            port: 3001,
            templates_dir: "templates/".into(),
        };
        assert_eq!(config.templates_glob(), "templates/**/*");
    }
}
