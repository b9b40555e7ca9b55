//! Style profile repository for database operations
//!
//! Both write paths are single statements guarded by the UNIQUE constraint
//! on `user_id`, so there is no existence-check/create race and no partial
//! write.

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{
    BodyType, ClothingType, Color, Gender, SkinTone, StyleProfile, StyleProfileInput,
};

const PROFILE_COLUMNS: &str = "id, user_id, height, skin_tone, body_type, gender, \
     favourite_colors, preferred_clothing_types, created_at, updated_at";

/// Style profile repository
#[derive(Clone)]
pub struct StyleProfileRepository {
    pool: PgPool,
}

impl StyleProfileRepository {
    /// Create a new style profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's style profile
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<StyleProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM style_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(profile_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Return the user's profile, creating a defaulted row if none exists
    ///
    /// The insert relies on the column defaults for every field except
    /// `user_id`; a concurrent first visit loses the insert on the unique
    /// constraint and both callers read the same row.
    pub async fn get_or_create(&self, user_id: Uuid) -> Result<StyleProfile> {
        sqlx::query(
            r#"
            INSERT INTO style_profiles (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM style_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        profile_from_row(&row)
    }

    /// Insert or update the user's profile from a validated submission
    pub async fn upsert(&self, user_id: Uuid, input: &StyleProfileInput) -> Result<StyleProfile> {
        info!("Upserting style profile for user: {}", user_id);

        let favourite_colors = serde_json::to_value(&input.favourite_colors)?;
        let preferred_clothing_types = serde_json::to_value(&input.preferred_clothing_types)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO style_profiles
                (user_id, height, skin_tone, body_type, gender,
                 favourite_colors, preferred_clothing_types)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                height = EXCLUDED.height,
                skin_tone = EXCLUDED.skin_tone,
                body_type = EXCLUDED.body_type,
                gender = EXCLUDED.gender,
                favourite_colors = EXCLUDED.favourite_colors,
                preferred_clothing_types = EXCLUDED.preferred_clothing_types,
                updated_at = now()
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&input.height)
        .bind(input.skin_tone.as_str())
        .bind(input.body_type.as_str())
        .bind(input.gender.map(|g| g.as_str()))
        .bind(favourite_colors)
        .bind(preferred_clothing_types)
        .fetch_one(&self.pool)
        .await?;

        profile_from_row(&row)
    }
}

/// Map a database row into the typed entity
///
/// Enum membership is enforced at the application boundary, so a stored
/// value outside the allowed set is a data error, not a normal case.
fn profile_from_row(row: &PgRow) -> Result<StyleProfile> {
    let skin_tone_raw: String = row.get("skin_tone");
    let skin_tone = SkinTone::parse(&skin_tone_raw)
        .ok_or_else(|| anyhow::anyhow!("Stored skin tone {:?} is not a valid choice", skin_tone_raw))?;

    let body_type_raw: String = row.get("body_type");
    let body_type = BodyType::parse(&body_type_raw)
        .ok_or_else(|| anyhow::anyhow!("Stored body type {:?} is not a valid choice", body_type_raw))?;

    let gender = match row.get::<Option<String>, _>("gender") {
        None => None,
        Some(raw) => Some(
            Gender::parse(&raw)
                .ok_or_else(|| anyhow::anyhow!("Stored gender {:?} is not a valid choice", raw))?,
        ),
    };

    let favourite_colors: Vec<Color> =
        serde_json::from_value(row.get::<serde_json::Value, _>("favourite_colors"))?;
    let preferred_clothing_types: Vec<ClothingType> =
        serde_json::from_value(row.get::<serde_json::Value, _>("preferred_clothing_types"))?;

    Ok(StyleProfile {
        id: row.get("id"),
        user_id: row.get("user_id"),
        height: row.get("height"),
        skin_tone,
        body_type,
        gender,
        favourite_colors,
        preferred_clothing_types,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
