//! Core library exports for the catalog service.
//!
//! This crate exposes forms, models, repositories, routes and service layers
//! used by the catalog web application.

#[cfg(feature = "server")]
pub mod auth;
pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;

/// Role required to invoke mutating catalog operations.
pub const SERVICE_ACCESS_ROLE: &str = "manager";
