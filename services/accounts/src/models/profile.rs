//! Style profile model and the fixed choice sets
//!
//! The enum values here are the wire strings used by both the edit form
//! and the chatbot JSON endpoint, so the serde renames must stay in sync
//! with `as_str`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Skin tone choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkinTone {
    #[serde(rename = "Fair/Light")]
    FairLight,
    Wheatish,
    Dark,
}

impl SkinTone {
    pub const ALL: [SkinTone; 3] = [SkinTone::FairLight, SkinTone::Wheatish, SkinTone::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::FairLight => "Fair/Light",
            SkinTone::Wheatish => "Wheatish",
            SkinTone::Dark => "Dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

/// Body type choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    Slim,
    Fit,
    Fat,
}

impl BodyType {
    pub const ALL: [BodyType; 3] = [BodyType::Slim, BodyType::Fit, BodyType::Fat];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Slim => "Slim",
            BodyType::Fit => "Fit",
            BodyType::Fat => "Fat",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

/// Gender choices (the profile field is optional)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

/// Favourite color choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
    Blue,
    Red,
    Green,
    Brown,
    Navy,
    Olive,
    Maroon,
    Beige,
    Yellow,
    Mustard,
    Teal,
    Pastel,
}

impl Color {
    pub const ALL: [Color; 14] = [
        Color::Black,
        Color::White,
        Color::Blue,
        Color::Red,
        Color::Green,
        Color::Brown,
        Color::Navy,
        Color::Olive,
        Color::Maroon,
        Color::Beige,
        Color::Yellow,
        Color::Mustard,
        Color::Teal,
        Color::Pastel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
            Color::Blue => "Blue",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Brown => "Brown",
            Color::Navy => "Navy",
            Color::Olive => "Olive",
            Color::Maroon => "Maroon",
            Color::Beige => "Beige",
            Color::Yellow => "Yellow",
            Color::Mustard => "Mustard",
            Color::Teal => "Teal",
            Color::Pastel => "Pastel",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

/// Preferred clothing type choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClothingType {
    #[serde(rename = "T-Shirts")]
    TShirts,
    Shirts,
    Jeans,
    Pants,
    Jackets,
    Hoodies,
    Sweaters,
    Shorts,
    Dresses,
    Skirts,
}

impl ClothingType {
    pub const ALL: [ClothingType; 10] = [
        ClothingType::TShirts,
        ClothingType::Shirts,
        ClothingType::Jeans,
        ClothingType::Pants,
        ClothingType::Jackets,
        ClothingType::Hoodies,
        ClothingType::Sweaters,
        ClothingType::Shorts,
        ClothingType::Dresses,
        ClothingType::Skirts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingType::TShirts => "T-Shirts",
            ClothingType::Shirts => "Shirts",
            ClothingType::Jeans => "Jeans",
            ClothingType::Pants => "Pants",
            ClothingType::Jackets => "Jackets",
            ClothingType::Hoodies => "Hoodies",
            ClothingType::Sweaters => "Sweaters",
            ClothingType::Shorts => "Shorts",
            ClothingType::Dresses => "Dresses",
            ClothingType::Skirts => "Skirts",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

/// Style profile entity (one row per user)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub height: String,
    pub skin_tone: SkinTone,
    pub body_type: BodyType,
    pub gender: Option<Gender>,
    pub favourite_colors: Vec<Color>,
    pub preferred_clothing_types: Vec<ClothingType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized style profile write payload, produced by form validation
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfileInput {
    pub height: String,
    pub skin_tone: SkinTone,
    pub body_type: BodyType,
    pub gender: Option<Gender>,
    pub favourite_colors: Vec<Color>,
    pub preferred_clothing_types: Vec<ClothingType>,
}

/// Profile payload as consumed by the chatbot client
///
/// A missing gender serializes as an empty string, matching what the
/// client already expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub height: String,
    pub skin_tone: String,
    pub body_type: String,
    pub favourite_colors: Vec<String>,
    pub preferred_clothing_types: Vec<String>,
    pub gender: String,
}

impl From<&StyleProfile> for ProfileData {
    fn from(profile: &StyleProfile) -> Self {
        ProfileData {
            height: profile.height.clone(),
            skin_tone: profile.skin_tone.as_str().to_string(),
            body_type: profile.body_type.as_str().to_string(),
            favourite_colors: profile
                .favourite_colors
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            preferred_clothing_types: profile
                .preferred_clothing_types
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            gender: profile
                .gender
                .map(|g| g.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Envelope returned by the profile data endpoint
///
/// Always paired with HTTP 200: a missing profile is a normal empty state
/// and internal errors degrade to a null profile with an `error` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDataResponse {
    pub profile: Option<ProfileData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProfileDataResponse {
    pub fn found(profile: &StyleProfile) -> Self {
        ProfileDataResponse {
            profile: Some(ProfileData::from(profile)),
            error: None,
        }
    }

    pub fn empty() -> Self {
        ProfileDataResponse {
            profile: None,
            error: None,
        }
    }

    pub fn degraded(error: String) -> Self {
        ProfileDataResponse {
            profile: None,
            error: Some(error),
        }
    }
}
