use config::{Config, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: SecretString,
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,

    pub database_name: String,
    pub require_ssl: bool,
}

/// Token signing material. The secret never has a compiled-in default.
#[derive(serde::Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub token_ttl_minutes: i64,
}

#[derive(serde::Deserialize, Default)]
pub struct TelemetrySettings {
    /// OTLP gRPC collector, e.g. `http://localhost:4317`. Span export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl DatabaseSettings {
    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db()
            .database(&self.database_name)
            .log_statements(tracing_log::log::LevelFilter::Trace)
    }

    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn to_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("cannot read current dir: {e}")))?;
    let configuration_directory = base_path.join("configurations");
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")))
        .add_source(File::from(
            configuration_directory.join(environment.to_str()),
        ))
        .add_source(
            // APP_AUTH__JWT_SECRET -> auth.jwt_secret
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

    settings.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert!(matches!(
            Environment::try_from("LOCAL".to_string()),
            Ok(Environment::Local)
        ));
        assert!(matches!(
            Environment::try_from("production".to_string()),
            Ok(Environment::Production)
        ));
        assert!(Environment::try_from("staging".to_string()).is_err());
    }
}
