use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_events::mongodb::DEFAULT_COLLECTION;

pub use core_config::Environment;

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Collection holding the events, `EVENTS_COLLECTION`
    pub events_collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?.with_app_name(env!("CARGO_PKG_NAME"));
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            events_collection: env_or_default("EVENTS_COLLECTION", DEFAULT_COLLECTION),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(
            [
                "APP_ENV",
                "EVENTS_COLLECTION",
                "MONGODB_URL",
                "MONGO_URL",
                "MONGO_URI",
                "MONGODB_DATABASE",
                "MONGO_DATABASE",
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "events_api");
                assert_eq!(config.events_collection, "events");
                assert_eq!(config.mongodb.database(), "events_db");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("events_api"));
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_production_requires_cors_origin() {
        temp_env::with_vars(
            [("APP_ENV", Some("production")), ("CORS_ALLOWED_ORIGIN", None)],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
