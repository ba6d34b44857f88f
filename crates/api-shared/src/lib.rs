//! # API Shared
//!
//! Shared definitions for burrow's core and REST layers.
//!
//! Contains:
//! - Stored document types (`model` module): users with embedded shop lists and items,
//!   patients, appointments and clinical data
//! - Per-endpoint request schemas and response envelopes (`dto` module)
//! - Shared services like `HealthService`
//!
//! Every type derives `serde` for the wire and `utoipa::ToSchema` for the OpenAPI document.

pub mod dto;
pub mod health;
pub mod model;

pub use dto::*;
pub use health::HealthService;
pub use model::*;
