//! PostgreSQL connection management, health check and schema sync.

mod config;
mod connector;
mod health;
mod schema;

pub use config::PostgresConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_options,
};
pub use health::check_health;
pub use schema::{reset_schema, sync_schema};

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
