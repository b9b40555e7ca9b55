//! Common library for the oliveedge backend
//!
//! This crate provides shared infrastructure used across services,
//! currently PostgreSQL connectivity and the shared error types.

pub mod database;
pub mod error;
