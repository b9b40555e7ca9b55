//! Form payloads and validation
//!
//! Submissions are rejected as a whole: validation either produces a fully
//! normalized payload or a field-level error map, and nothing is persisted
//! on failure.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::models::{
    BodyType, ClothingType, Color, Gender, NewUser, SkinTone, StyleProfileInput,
};

/// Height is free text ("175 cm", "5'9\"") but bounded
pub const MAX_HEIGHT_LEN: usize = 10;

/// Field-level validation errors, keyed by form field name
pub type FormErrors = BTreeMap<&'static str, Vec<String>>;

fn add_error(errors: &mut FormErrors, field: &'static str, message: String) {
    errors.entry(field).or_default().push(message);
}

/// Raw style profile submission
///
/// The two multi-select fields arrive as repeated form keys and collect
/// into vectors; absent fields default to empty so a partial submission
/// still validates as a whole.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleProfileForm {
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub skin_tone: String,
    #[serde(default)]
    pub body_type: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub favourite_colors: Vec<String>,
    #[serde(default)]
    pub preferred_clothing_types: Vec<String>,
}

impl StyleProfileForm {
    /// Validate and normalize the submission
    pub fn validate(self) -> Result<StyleProfileInput, FormErrors> {
        let mut errors = FormErrors::new();

        let height = self.height.trim().to_string();
        if height.is_empty() {
            add_error(&mut errors, "height", "Height is required".to_string());
        } else if height.chars().count() > MAX_HEIGHT_LEN {
            add_error(
                &mut errors,
                "height",
                format!("Height must be at most {} characters long", MAX_HEIGHT_LEN),
            );
        }

        let skin_tone = match SkinTone::parse(self.skin_tone.trim()) {
            Some(tone) => Some(tone),
            None => {
                add_error(
                    &mut errors,
                    "skin_tone",
                    format!("\"{}\" is not a valid skin tone", self.skin_tone.trim()),
                );
                None
            }
        };

        let body_type = match BodyType::parse(self.body_type.trim()) {
            Some(body) => Some(body),
            None => {
                add_error(
                    &mut errors,
                    "body_type",
                    format!("\"{}\" is not a valid body type", self.body_type.trim()),
                );
                None
            }
        };

        // Gender is optional: an absent or empty value passes validation
        let gender = match self.gender.trim() {
            "" => None,
            value => match Gender::parse(value) {
                Some(gender) => Some(gender),
                None => {
                    add_error(
                        &mut errors,
                        "gender",
                        format!("\"{}\" is not a valid gender", value),
                    );
                    None
                }
            },
        };

        let mut favourite_colors = Vec::with_capacity(self.favourite_colors.len());
        for value in &self.favourite_colors {
            match Color::parse(value.trim()) {
                Some(color) => favourite_colors.push(color),
                None => add_error(
                    &mut errors,
                    "favourite_colors",
                    format!("\"{}\" is not a valid color", value.trim()),
                ),
            }
        }

        let mut preferred_clothing_types = Vec::with_capacity(self.preferred_clothing_types.len());
        for value in &self.preferred_clothing_types {
            match ClothingType::parse(value.trim()) {
                Some(clothing) => preferred_clothing_types.push(clothing),
                None => add_error(
                    &mut errors,
                    "preferred_clothing_types",
                    format!("\"{}\" is not a valid clothing type", value.trim()),
                ),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(StyleProfileInput {
            height,
            // Unwraps cannot fire: a missing value was recorded as an error above
            skin_tone: skin_tone.unwrap(),
            body_type: body_type.unwrap(),
            gender,
            favourite_colors,
            preferred_clothing_types,
        })
    }
}

/// Registration form
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl RegisterForm {
    /// Validate the registration form into a new-user payload
    pub fn validate(self) -> Result<NewUser, FormErrors> {
        let mut errors = FormErrors::new();

        let username = self.username.trim().to_string();
        if let Err(message) = validate_username(&username) {
            add_error(&mut errors, "username", message);
        }

        let email = self.email.trim().to_string();
        if let Err(message) = validate_email(&email) {
            add_error(&mut errors, "email", message);
        }

        if let Err(message) = validate_password(&self.password1) {
            add_error(&mut errors, "password1", message);
        }

        if self.password1 != self.password2 {
            add_error(
                &mut errors,
                "password2",
                "The two password fields didn't match".to_string(),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewUser {
            username,
            email,
            password: self.password1,
        })
    }
}

/// Login form
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Check that both credentials were submitted
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        if self.username.trim().is_empty() {
            add_error(&mut errors, "username", "Username is required".to_string());
        }
        if self.password.is_empty() {
            add_error(&mut errors, "password", "Password is required".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> StyleProfileForm {
        StyleProfileForm {
            height: "175 cm".to_string(),
            skin_tone: "Wheatish".to_string(),
            body_type: "Fit".to_string(),
            gender: String::new(),
            favourite_colors: vec!["Blue".to_string(), "Red".to_string()],
            preferred_clothing_types: vec!["T-Shirts".to_string(), "Jeans".to_string()],
        }
    }

    #[test]
    fn test_valid_submission_normalizes() {
        let input = valid_form().validate().expect("form should validate");
        assert_eq!(input.height, "175 cm");
        assert_eq!(input.skin_tone, SkinTone::Wheatish);
        assert_eq!(input.body_type, BodyType::Fit);
        assert_eq!(input.gender, None);
        assert_eq!(input.favourite_colors, vec![Color::Blue, Color::Red]);
        assert_eq!(
            input.preferred_clothing_types,
            vec![ClothingType::TShirts, ClothingType::Jeans]
        );
    }

    #[test]
    fn test_list_order_is_preserved() {
        let mut form = valid_form();
        form.favourite_colors = vec!["Red".to_string(), "Blue".to_string()];
        let input = form.validate().unwrap();
        assert_eq!(input.favourite_colors, vec![Color::Red, Color::Blue]);
    }

    #[test]
    fn test_empty_lists_are_valid() {
        let mut form = valid_form();
        form.favourite_colors = vec![];
        form.preferred_clothing_types = vec![];
        let input = form.validate().unwrap();
        assert!(input.favourite_colors.is_empty());
        assert!(input.preferred_clothing_types.is_empty());
    }

    #[test]
    fn test_missing_height_is_rejected() {
        let mut form = valid_form();
        form.height = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("height"));
    }

    #[test]
    fn test_overlong_height_is_rejected() {
        let mut form = valid_form();
        form.height = "six feet and a bit".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("height"));
    }

    #[test]
    fn test_invalid_enum_values_are_rejected() {
        let mut form = valid_form();
        form.skin_tone = "Pale".to_string();
        form.body_type = "Average".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("skin_tone"));
        assert!(errors.contains_key("body_type"));
        assert!(!errors.contains_key("height"));
    }

    #[test]
    fn test_invalid_list_element_rejects_whole_submission() {
        let mut form = valid_form();
        form.favourite_colors = vec!["Blue".to_string(), "Cyan".to_string()];
        let errors = form.validate().unwrap_err();
        let messages = errors.get("favourite_colors").unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Cyan"));
    }

    #[test]
    fn test_gender_optional_and_validated_when_present() {
        let mut form = valid_form();
        form.gender = "Other".to_string();
        assert_eq!(form.clone().validate().unwrap().gender, Some(Gender::Other));

        form.gender = "Unknown".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("gender"));
    }

    #[test]
    fn test_register_form_validation() {
        let form = RegisterForm {
            username: "olive_fan".to_string(),
            email: "olive@example.com".to_string(),
            password1: "s3cretpass".to_string(),
            password2: "s3cretpass".to_string(),
        };
        let new_user = form.validate().unwrap();
        assert_eq!(new_user.username, "olive_fan");

        let mismatched = RegisterForm {
            username: "olive_fan".to_string(),
            email: "olive@example.com".to_string(),
            password1: "s3cretpass".to_string(),
            password2: "different".to_string(),
        };
        let errors = mismatched.validate().unwrap_err();
        assert!(errors.contains_key("password2"));
    }

    #[test]
    fn test_register_form_rejects_bad_fields() {
        let form = RegisterForm {
            username: "no spaces".to_string(),
            email: "not-an-email".to_string(),
            password1: "short".to_string(),
            password2: "short".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("username"));
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password1"));
    }

    #[test]
    fn test_login_form_requires_both_fields() {
        let form = LoginForm {
            username: String::new(),
            password: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("username"));
        assert!(errors.contains_key("password"));
    }
}
