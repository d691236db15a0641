//! # Atlas Shared
//!
//! Shared configuration, constants, and telemetry for the Atlas tenant registry.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use error::AppError;
