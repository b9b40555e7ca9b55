//! Repositories for database operations

pub mod profile;
pub mod user;

// Re-export for convenience
pub use profile::StyleProfileRepository;
pub use user::UserRepository;
