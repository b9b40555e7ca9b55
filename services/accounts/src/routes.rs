//! Accounts service routes

use axum::{
    Extension, Json, Router,
    extract::State,
    middleware,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::{Form, cookie::CookieJar};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::{
    error::AppError,
    forms::{LoginForm, RegisterForm, StyleProfileForm},
    middleware::{AuthUser, login_required, session_cookie},
    models::{BodyType, ClothingType, Color, Gender, ProfileData, ProfileDataResponse, SkinTone},
    state::AppState,
};

/// Allowed values for every choice field on the edit form
#[derive(Serialize)]
pub struct FormChoices {
    pub skin_tone: Vec<&'static str>,
    pub body_type: Vec<&'static str>,
    pub gender: Vec<&'static str>,
    pub favourite_colors: Vec<&'static str>,
    pub preferred_clothing_types: Vec<&'static str>,
}

impl FormChoices {
    fn new() -> Self {
        FormChoices {
            skin_tone: SkinTone::ALL.iter().map(|v| v.as_str()).collect(),
            body_type: BodyType::ALL.iter().map(|v| v.as_str()).collect(),
            gender: Gender::ALL.iter().map(|v| v.as_str()).collect(),
            favourite_colors: Color::ALL.iter().map(|v| v.as_str()).collect(),
            preferred_clothing_types: ClothingType::ALL.iter().map(|v| v.as_str()).collect(),
        }
    }
}

/// Response for the style profile edit form
#[derive(Serialize)]
pub struct StyleProfileFormResponse {
    pub values: ProfileData,
    pub choices: FormChoices,
}

/// Response for the profile overview
#[derive(Serialize)]
pub struct ProfileOverviewResponse {
    pub username: String,
    pub email: String,
    pub style_profile: Option<ProfileData>,
}

/// Create the router for the accounts service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/accounts/profile/", get(profile_overview))
        .route(
            "/accounts/style-profile/",
            get(style_profile_form).post(style_profile_submit),
        )
        .route("/profile/data/", get(profile_data))
        // Alias kept for the chatbot client's fallback fetch
        .route("/accounts/profile/data/", get(profile_data))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_required,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/accounts/register/", post(register))
        .route("/accounts/login/", post(login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint, including database reachability
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = matches!(
        common::database::health_check(&state.db_pool).await,
        Ok(true)
    );

    Json(json!({
        "status": (if database { "ok" } else { "degraded" }),
        "service": "accounts-service",
        "database": database
    }))
}

/// Register a new account and log it in
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse, AppError> {
    let new_user = form.validate().map_err(AppError::Validation)?;

    let existing = state
        .user_repository
        .find_by_username(&new_user.username)
        .await
        .map_err(|e| {
            error!("Failed to look up username: {}", e);
            AppError::InternalServerError
        })?;
    if existing.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let user = state.user_repository.create(&new_user).await.map_err(|e| {
        error!("Failed to create user: {}", e);
        AppError::InternalServerError
    })?;

    let token = state.jwt_service.generate_session_token(&user).map_err(|e| {
        error!("Failed to generate session token: {}", e);
        AppError::InternalServerError
    })?;

    Ok((jar.add(session_cookie(token)), Redirect::to("/")))
}

/// Log an existing account in
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    form.validate().map_err(AppError::Validation)?;

    let user = state
        .user_repository
        .find_by_username(form.username.trim())
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AppError::InternalServerError
        })?
        .ok_or(AppError::InvalidCredentials)?;

    let verified = state
        .user_repository
        .verify_password(&user, &form.password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            AppError::InternalServerError
        })?;
    if !verified {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.jwt_service.generate_session_token(&user).map_err(|e| {
        error!("Failed to generate session token: {}", e);
        AppError::InternalServerError
    })?;

    Ok((
        jar.add(session_cookie(token)),
        Redirect::to("/accounts/profile/"),
    ))
}

/// Profile overview: account info plus the style profile, if any
pub async fn profile_overview(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_repository
        .find_by_id(auth_user.id)
        .await
        .map_err(|e| {
            error!("Failed to load user: {}", e);
            AppError::InternalServerError
        })?
        // A valid token for a deleted account; treat as logged out
        .ok_or(AppError::LoginRequired)?;

    let profile = state
        .profile_repository
        .find_by_user_id(user.id)
        .await
        .map_err(|e| {
            error!("Failed to load style profile: {}", e);
            AppError::InternalServerError
        })?;

    Ok(Json(ProfileOverviewResponse {
        username: user.username,
        email: user.email,
        style_profile: profile.as_ref().map(ProfileData::from),
    }))
}

/// Edit form data: current values (creating a defaulted profile on first
/// visit) plus the allowed choice sets
pub async fn style_profile_form(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .profile_repository
        .get_or_create(auth_user.id)
        .await
        .map_err(|e| {
            error!("Failed to get or create style profile: {}", e);
            AppError::InternalServerError
        })?;

    Ok(Json(StyleProfileFormResponse {
        values: ProfileData::from(&profile),
        choices: FormChoices::new(),
    }))
}

/// Validate and save a style profile submission
pub async fn style_profile_submit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Form(form): Form<StyleProfileForm>,
) -> Result<impl IntoResponse, AppError> {
    let input = form.validate().map_err(AppError::Validation)?;

    state
        .profile_repository
        .upsert(auth_user.id, &input)
        .await
        .map_err(|e| {
            error!("Failed to upsert style profile: {}", e);
            AppError::InternalServerError
        })?;

    Ok(Redirect::to("/accounts/profile/"))
}

/// JSON profile endpoint consumed by the chatbot widget
///
/// Every outcome is HTTP 200: a missing profile is the normal empty state
/// and unexpected failures degrade to a null profile with an error field,
/// because the client only distinguishes ok from not-ok responses.
pub async fn profile_data(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Json<ProfileDataResponse> {
    match state.profile_repository.find_by_user_id(auth_user.id).await {
        Ok(Some(profile)) => Json(ProfileDataResponse::found(&profile)),
        Ok(None) => Json(ProfileDataResponse::empty()),
        Err(e) => {
            error!("Failed to load style profile: {}", e);
            Json(ProfileDataResponse::degraded(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_choices_cover_the_fixed_sets() {
        let choices = FormChoices::new();
        assert_eq!(choices.skin_tone, vec!["Fair/Light", "Wheatish", "Dark"]);
        assert_eq!(choices.body_type, vec!["Slim", "Fit", "Fat"]);
        assert_eq!(choices.gender, vec!["Male", "Female", "Other"]);
        assert_eq!(choices.favourite_colors.len(), 14);
        assert_eq!(choices.preferred_clothing_types.len(), 10);
        assert!(choices.preferred_clothing_types.contains(&"T-Shirts"));
    }
}
