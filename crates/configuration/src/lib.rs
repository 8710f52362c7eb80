use std::env;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{DatabaseSettings, ServerSettings, Settings};

/// Loads the application settings from built-in defaults and the environment.
///
/// Every key has a fixed fallback so the service can start with no
/// configuration at all. The `POSTGRES_USER`, `POSTGRES_PASSWORD`, and
/// `POSTGRES_DB` environment variables override the database credentials.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5432)?
        .set_default("database.user", "qa_user")?
        .set_default("database.password", "qa_password")?
        .set_default("database.name", "qa_db")?
        .set_override_option("database.user", env::var("POSTGRES_USER").ok())?
        .set_override_option("database.password", env::var("POSTGRES_PASSWORD").ok())?
        .set_override_option("database.name", env::var("POSTGRES_DB").ok())?
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_server_field() {
        let settings = load_settings().expect("defaults alone should load");

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
    }
}
