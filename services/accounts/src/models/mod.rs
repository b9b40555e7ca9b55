//! Accounts service models

pub mod profile;
pub mod user;

// Re-export for convenience
pub use profile::{
    BodyType, ClothingType, Color, Gender, ProfileData, ProfileDataResponse, SkinTone,
    StyleProfile, StyleProfileInput,
};
pub use user::{NewUser, User};
