//! Integration tests for the style profile repository
//!
//! These run against a real PostgreSQL instance with the migrations
//! applied, so they are ignored by default.

use accounts::models::{
    BodyType, ClothingType, Color, NewUser, ProfileData, SkinTone, StyleProfileInput, User,
};
use accounts::repositories::{StyleProfileRepository, UserRepository};
use common::database::{DatabaseConfig, init_pool};
use uuid::Uuid;

async fn setup() -> Result<(UserRepository, StyleProfileRepository, User), Box<dyn std::error::Error>>
{
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;

    let users = UserRepository::new(pool.clone());
    let profiles = StyleProfileRepository::new(pool);

    let user = users
        .create(&NewUser {
            username: format!("style_it_{}", Uuid::new_v4().simple()),
            email: "style-it@example.com".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await?;

    Ok((users, profiles, user))
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_get_or_create_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let (_users, profiles, user) = setup().await?;

    let first = profiles.get_or_create(user.id).await?;
    let second = profiles.get_or_create(user.id).await?;

    // The second call must read the row the first call created
    assert_eq!(first.id, second.id);
    assert_eq!(first.user_id, user.id);

    // Defaulted row from the column defaults
    assert_eq!(second.height, "");
    assert_eq!(second.skin_tone, SkinTone::FairLight);
    assert_eq!(second.body_type, BodyType::Slim);
    assert_eq!(second.gender, None);
    assert!(second.favourite_colors.is_empty());
    assert!(second.preferred_clothing_types.is_empty());

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_upsert_round_trips_exactly() -> Result<(), Box<dyn std::error::Error>> {
    let (_users, profiles, user) = setup().await?;

    let input = StyleProfileInput {
        height: "175 cm".to_string(),
        skin_tone: SkinTone::Wheatish,
        body_type: BodyType::Fit,
        gender: None,
        favourite_colors: vec![Color::Blue, Color::Red],
        preferred_clothing_types: vec![ClothingType::TShirts, ClothingType::Jeans],
    };

    let saved = profiles.upsert(user.id, &input).await?;

    let fetched = profiles
        .find_by_user_id(user.id)
        .await?
        .expect("profile should exist after upsert");

    assert_eq!(fetched.id, saved.id);
    assert_eq!(fetched.height, "175 cm");
    assert_eq!(fetched.skin_tone, SkinTone::Wheatish);
    assert_eq!(fetched.body_type, BodyType::Fit);
    assert_eq!(fetched.gender, None);
    // Submission order survives the JSONB columns
    assert_eq!(fetched.favourite_colors, vec![Color::Blue, Color::Red]);
    assert_eq!(
        fetched.preferred_clothing_types,
        vec![ClothingType::TShirts, ClothingType::Jeans]
    );

    let data = ProfileData::from(&fetched);
    assert_eq!(data.gender, "");
    assert_eq!(data.favourite_colors, vec!["Blue", "Red"]);
    assert_eq!(data.preferred_clothing_types, vec!["T-Shirts", "Jeans"]);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_upsert_overwrites_the_existing_row() -> Result<(), Box<dyn std::error::Error>> {
    let (_users, profiles, user) = setup().await?;

    let input = StyleProfileInput {
        height: "5'9\"".to_string(),
        skin_tone: SkinTone::Dark,
        body_type: BodyType::Fat,
        gender: None,
        favourite_colors: vec![Color::Black],
        preferred_clothing_types: vec![ClothingType::Hoodies],
    };
    let saved = profiles.upsert(user.id, &input).await?;

    let updated = StyleProfileInput {
        favourite_colors: vec![Color::White, Color::Black],
        ..input
    };
    let again = profiles.upsert(user.id, &updated).await?;

    // Same row, new values
    assert_eq!(again.id, saved.id);
    assert_eq!(again.favourite_colors, vec![Color::White, Color::Black]);

    Ok(())
}
