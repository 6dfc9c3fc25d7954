//! Database connectors shared by the services in this workspace
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client setup, health check and shutdown
//! - `config` - `core_config::FromEnv` for the connector configs
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "events_db");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_with_backoff};
