//! Authentication inputs.

use super::{MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::validation::{Fields, Schema};

/// Maximum length of an opaque refresh token.
const MAX_REFRESH_TOKEN_LENGTH: usize = 128;

/// `POST /auth/register`.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

impl Schema for RegisterInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let name = f.text("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH);
        let email = f.email("email");
        let password = f.password("password");
        let phone = f.opt_phone("phone");
        Some(Self {
            name: name?,
            email: email?,
            password: password?,
            phone,
        })
    }
}

/// `POST /auth/login`. Only presence is checked; the strength rules apply
/// when a password is set, not when it is presented.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl Schema for LoginInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let email = f.email("email");
        let password = f.secret("password");
        Some(Self {
            email: email?,
            password: password?,
        })
    }
}

/// `PUT /auth/change-password`.
#[derive(Debug, Clone)]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

impl Schema for ChangePasswordInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let current_password = f.secret("current_password");
        let new_password = f.password("new_password");
        if let (Some(current), Some(new)) = (&current_password, &new_password) {
            f.refine(
                "new_password",
                current != new,
                "New password must be different from current password",
            );
        }
        Some(Self {
            current_password: current_password?,
            new_password: new_password?,
        })
    }
}

/// `POST /auth/refresh`.
#[derive(Debug, Clone)]
pub struct RefreshInput {
    pub refresh_token: String,
}

impl Schema for RefreshInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            refresh_token: f.text("refresh_token", 1, MAX_REFRESH_TOKEN_LENGTH)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{codes, ValidationContext};
    use serde_json::json;

    #[test]
    fn register_normalizes_and_ignores_unknown_keys() {
        let ctx = ValidationContext::default();
        let input = RegisterInput::parse(
            &json!({
                "name": "  Amara Diallo ",
                "email": " Amara@Example.com",
                "password": "Braids2025",
                "role": "ADMIN"
            }),
            &ctx,
        )
        .unwrap();
        assert_eq!(input.name, "Amara Diallo");
        assert_eq!(input.email, "amara@example.com");
        assert!(input.phone.is_none());
    }

    #[test]
    fn register_reports_every_bad_field() {
        let ctx = ValidationContext::default();
        let errors = RegisterInput::parse(
            &json!({ "name": "A", "email": "bad", "password": "weak", "phone": "abc" }),
            &ctx,
        )
        .unwrap_err();
        for field in ["name", "email", "password", "phone"] {
            assert!(errors.has_field(field), "missing error for {field}");
        }
    }

    #[test]
    fn new_password_must_differ() {
        let ctx = ValidationContext::default();
        let errors = ChangePasswordInput::parse(
            &json!({ "current_password": "Braids2025", "new_password": "Braids2025" }),
            &ctx,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "new_password");
        assert_eq!(errors.errors()[0].code, codes::CUSTOM);
    }

    #[test]
    fn login_requires_both_fields() {
        let ctx = ValidationContext::default();
        let errors = LoginInput::parse(&json!({}), &ctx).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.errors().iter().all(|e| e.code == codes::REQUIRED));
    }
}
