//! Custom extractors for Axum handlers.
//!
//! This module provides reusable extractors that reduce boilerplate
//! and standardize error handling across your API.

pub mod payload_json;

pub use payload_json::{INVALID_PAYLOAD, PayloadJson};
