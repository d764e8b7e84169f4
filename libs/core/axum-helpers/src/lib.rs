//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`validation`]**: declarative per-route field rules and their evaluation
//! - **[`extractors`]**: [`Checked`], which runs a route's rules before the handler
//! - **[`envelope`]**: `{data}` and `{error}` response bodies
//! - **[`errors`]**: generic failure responses with error codes
//! - **[`server`]**: router assembly, API docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let config = ServerConfig::default().with_cors_origins(["http://localhost:5173"]);
//! let router = create_router::<ApiDoc>(Router::new(), &config.cors_allowed_origins)?;
//! create_production_app(router, &config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use envelope::{DataBody, ErrorMessageBody};
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{CheckRejection, Checked, RouteInput};
pub use http::{create_cors_layer, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};
pub use validation::{FieldError, RuleSet, ValidationErrorsBody, ValidationFault};
