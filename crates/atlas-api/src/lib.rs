//! # Atlas API
//!
//! HTTP handlers, DTOs, and the router for the tenant registry.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
