//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with the OpenAPI document and common middleware
//! - A per-request deadline
//! - Graceful shutdown on SIGINT/SIGTERM
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(api_routes, config.timeout());
//! create_app(router, &config).await?;
//! ```

pub mod app;
pub mod shutdown;
pub mod timeout;

pub use app::{create_app, create_router};
pub use shutdown::shutdown_signal;
pub use timeout::request_timeout;
