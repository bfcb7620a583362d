//! Form validation — explicit per-field validator functions combined into
//! record-level validators that aggregate every failing field instead of
//! stopping at the first. Runs synchronously, before any gateway call.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::errors::AppError;

/// Field name → human-readable message, one message per invalid field.
pub type FieldErrors = BTreeMap<&'static str, String>;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_COUNT: i64 = 999;
pub const MAX_SAUCE_LEN: usize = 50;
pub const MAX_LOCATION_LEN: usize = 100;
pub const MAX_NOTES_LEN: usize = 500;

/// The fixed mood symbol set an entry may carry.
pub const MOODS: &[&str] = &["🍗", "🐔", "🐓", "🥚", "🐥", "🤤", "😋", "🔥", "🌶️", "🐣"];

/// The fixed avatar color palette for profiles.
pub const AVATAR_COLORS: &[&str] = &[
    "blue", "indigo", "purple", "pink", "red", "orange", "yellow", "green", "teal", "cyan",
];

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub nickname: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryForm {
    pub count: i64,
    #[serde(default)]
    pub sauces: Vec<String>,
    pub location: Option<String>,
    pub mood: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub nickname: Option<String>,
    pub avatar_color: Option<String>,
}

/// Converts an aggregated field map into the handler-level error, or passes
/// when every field checked out.
pub fn ensure_valid(errors: FieldErrors) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

pub fn validate_login(form: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(message) = check_email(&form.email) {
        errors.insert("email", message);
    }
    if let Some(message) = check_password(&form.password) {
        errors.insert("password", message);
    }
    errors
}

pub fn validate_register(form: &RegisterForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(message) = check_email(&form.email) {
        errors.insert("email", message);
    }
    if let Some(message) = check_password(&form.password) {
        errors.insert("password", message);
    }
    if form.confirm_password.is_empty() {
        errors.insert(
            "confirm_password",
            "Passwort-Bestätigung ist erforderlich".to_string(),
        );
    } else if form.confirm_password != form.password {
        errors.insert(
            "confirm_password",
            "Die Passwörter stimmen nicht überein".to_string(),
        );
    }
    if let Some(message) = check_nickname(&form.nickname) {
        errors.insert("nickname", message);
    }
    errors
}

pub fn validate_entry(form: &EntryForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.count <= 0 {
        errors.insert("count", "Anzahl muss größer als 0 sein".to_string());
    } else if form.count > MAX_COUNT {
        errors.insert("count", "Maximal 999 Nuggets pro Eintrag".to_string());
    }
    if form.sauces.iter().any(|s| s.chars().count() > MAX_SAUCE_LEN) {
        errors.insert("sauces", "Sauce darf maximal 50 Zeichen lang sein".to_string());
    }
    if let Some(location) = &form.location {
        if location.chars().count() > MAX_LOCATION_LEN {
            errors.insert("location", "Ort darf maximal 100 Zeichen lang sein".to_string());
        }
    }
    if let Some(mood) = &form.mood {
        if !MOODS.contains(&mood.as_str()) {
            errors.insert("mood", "Ungültige Stimmung".to_string());
        }
    }
    if let Some(notes) = &form.notes {
        if notes.chars().count() > MAX_NOTES_LEN {
            errors.insert("notes", "Notizen dürfen maximal 500 Zeichen lang sein".to_string());
        }
    }
    errors
}

pub fn validate_profile(form: &ProfileForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(nickname) = &form.nickname {
        if let Some(message) = check_nickname(nickname) {
            errors.insert("nickname", message);
        }
    }
    if let Some(color) = &form.avatar_color {
        if !AVATAR_COLORS.contains(&color.as_str()) {
            errors.insert("avatar_color", "Ungültige Avatar-Farbe".to_string());
        }
    }
    errors
}

fn check_email(email: &str) -> Option<String> {
    if email.is_empty() {
        return Some("E-Mail ist erforderlich".to_string());
    }
    if !is_valid_email(email) {
        return Some("Ungültige E-Mail-Adresse".to_string());
    }
    None
}

fn check_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Passwort ist erforderlich".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some("Passwort muss mindestens 6 Zeichen lang sein".to_string());
    }
    None
}

fn check_nickname(nickname: &str) -> Option<String> {
    let len = nickname.chars().count();
    if len < 2 {
        return Some("Spitzname muss mindestens 2 Zeichen lang sein".to_string());
    }
    if len > 20 {
        return Some("Spitzname darf maximal 20 Zeichen lang sein".to_string());
    }
    if !nickname.chars().all(is_allowed_nickname_char) {
        return Some("Nur Buchstaben, Zahlen und Leerzeichen erlaubt".to_string());
    }
    None
}

/// Letters, digits, space, and the German umlauts/ß.
fn is_allowed_nickname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || "äöüÄÖÜß".contains(c)
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_form(count: i64) -> EntryForm {
        EntryForm {
            count,
            sauces: vec![],
            location: None,
            mood: None,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn zero_count_is_rejected_with_field_message() {
        let errors = validate_entry(&entry_form(0));
        assert_eq!(errors.get("count").unwrap(), "Anzahl muss größer als 0 sein");
    }

    #[test]
    fn count_above_limit_is_rejected() {
        let errors = validate_entry(&entry_form(1000));
        assert_eq!(errors.get("count").unwrap(), "Maximal 999 Nuggets pro Eintrag");
        assert!(validate_entry(&entry_form(999)).is_empty());
        assert!(validate_entry(&entry_form(1)).is_empty());
    }

    #[test]
    fn entry_length_limits_apply() {
        let mut form = entry_form(5);
        form.sauces = vec!["x".repeat(51)];
        form.location = Some("y".repeat(101));
        form.notes = Some("z".repeat(501));
        form.mood = Some("💀".to_string());

        let errors = validate_entry(&form);
        assert!(errors.contains_key("sauces"));
        assert!(errors.contains_key("location"));
        assert!(errors.contains_key("notes"));
        assert!(errors.contains_key("mood"));
    }

    #[test]
    fn known_moods_pass() {
        let mut form = entry_form(5);
        form.mood = Some("🔥".to_string());
        assert!(validate_entry(&form).is_empty());
    }

    #[test]
    fn login_reports_all_invalid_fields_at_once() {
        let errors = validate_login(&LoginForm {
            email: "not-an-email".to_string(),
            password: "abc".to_string(),
        });
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email").unwrap(), "Ungültige E-Mail-Adresse");
        assert_eq!(
            errors.get("password").unwrap(),
            "Passwort muss mindestens 6 Zeichen lang sein"
        );
    }

    #[test]
    fn empty_login_fields_use_required_messages() {
        let errors = validate_login(&LoginForm {
            email: String::new(),
            password: String::new(),
        });
        assert_eq!(errors.get("email").unwrap(), "E-Mail ist erforderlich");
        assert_eq!(errors.get("password").unwrap(), "Passwort ist erforderlich");
    }

    #[test]
    fn register_checks_confirmation_pair() {
        let errors = validate_register(&RegisterForm {
            email: "a@b.de".to_string(),
            password: "geheim".to_string(),
            confirm_password: "anders".to_string(),
            nickname: "Nugget Fan".to_string(),
        });
        assert_eq!(
            errors.get("confirm_password").unwrap(),
            "Die Passwörter stimmen nicht überein"
        );
    }

    #[test]
    fn nickname_rules_allow_umlauts_and_spaces() {
        let ok = RegisterForm {
            email: "a@b.de".to_string(),
            password: "geheim".to_string(),
            confirm_password: "geheim".to_string(),
            nickname: "Größter Schredder".to_string(),
        };
        assert!(validate_register(&ok).is_empty());

        let mut bad = ok;
        bad.nickname = "Nugget!".to_string();
        assert_eq!(
            validate_register(&bad).get("nickname").unwrap(),
            "Nur Buchstaben, Zahlen und Leerzeichen erlaubt"
        );

        bad.nickname = "N".to_string();
        assert_eq!(
            validate_register(&bad).get("nickname").unwrap(),
            "Spitzname muss mindestens 2 Zeichen lang sein"
        );

        bad.nickname = "N".repeat(21);
        assert_eq!(
            validate_register(&bad).get("nickname").unwrap(),
            "Spitzname darf maximal 20 Zeichen lang sein"
        );
    }

    #[test]
    fn profile_patch_checks_palette() {
        let errors = validate_profile(&ProfileForm {
            nickname: None,
            avatar_color: Some("magenta".to_string()),
        });
        assert!(errors.contains_key("avatar_color"));

        let ok = validate_profile(&ProfileForm {
            nickname: Some("Nugget König".to_string()),
            avatar_color: Some("teal".to_string()),
        });
        assert!(ok.is_empty());
    }

    #[test]
    fn email_shape_checks() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user example@site.de"));
    }
}
