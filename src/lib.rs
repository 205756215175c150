//! Core library exports for the notes service.
//!
//! The `data` feature exposes the persistence layer (`db`, `domain`,
//! `models`, `repository`, `schema`). The `server` feature adds the service
//! layer, HTTP routes, request forms and the API client.

#[cfg(feature = "server")]
pub mod client;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
