//! Accounts service library
//!
//! User registration, login, and the per-user style profile behind the
//! store's style-assistant widget. The binary in `main.rs` wires these
//! modules to a running PostgreSQL.

pub mod error;
pub mod forms;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
