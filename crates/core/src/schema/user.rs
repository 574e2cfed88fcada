//! User administration inputs.

use super::common::Page;
use super::{MAX_NAME_LENGTH, MAX_SEARCH_LENGTH, MIN_NAME_LENGTH};
use crate::validation::{Fields, Schema};
use crate::vocab::UserRole;

/// `POST /users` (admin).
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

impl Schema for CreateUserInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let name = f.text("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH);
        let email = f.email("email");
        let password = f.password("password");
        let phone = f.opt_phone("phone");
        let role = f.opt_choice::<UserRole>("role");
        Some(Self {
            name: name?,
            email: email?,
            password: password?,
            phone,
            role: role.unwrap_or(UserRole::Customer),
        })
    }
}

/// `PUT /users/{id}`. `role` and `is_active` are admin-only; the handler
/// enforces that.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl UpdateUserInput {
    pub fn touches_privileged_fields(&self) -> bool {
        self.role.is_some() || self.is_active.is_some()
    }
}

impl Schema for UpdateUserInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        f.require_any(&["name", "email", "phone", "role", "is_active"]);
        Some(Self {
            name: f.opt_text_between("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH),
            email: f.opt_email("email"),
            phone: f.opt_phone("phone"),
            role: f.opt_choice("role"),
            is_active: f.opt_bool("is_active"),
        })
    }
}

/// `GET /users` query.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Page,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    /// Case-insensitive substring of name or email.
    pub search: Option<String>,
}

impl Schema for UserListQuery {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            page: Page::read(f),
            role: f.opt_choice("role"),
            is_active: f.opt_bool("is_active"),
            search: f.opt_text("search", MAX_SEARCH_LENGTH),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{codes, ValidationContext};
    use serde_json::json;

    #[test]
    fn role_defaults_to_customer() {
        let ctx = ValidationContext::default();
        let input = CreateUserInput::parse(
            &json!({ "name": "Kemi", "email": "kemi@example.com", "password": "Braids2025" }),
            &ctx,
        )
        .unwrap();
        assert_eq!(input.role, UserRole::Customer);
    }

    #[test]
    fn invalid_role_lists_members() {
        let ctx = ValidationContext::default();
        let errors = UpdateUserInput::parse(&json!({ "role": "OWNER" }), &ctx).unwrap_err();
        assert_eq!(errors.errors()[0].code, codes::INVALID_ENUM);
        assert!(errors.errors()[0].message.contains("CUSTOMER, ADMIN"));
    }

    #[test]
    fn empty_update_is_rejected() {
        let ctx = ValidationContext::default();
        let errors = UpdateUserInput::parse(&json!({}), &ctx).unwrap_err();
        assert_eq!(errors.errors()[0].code, codes::EMPTY_UPDATE);
    }

    #[test]
    fn privileged_fields_are_detected() {
        let ctx = ValidationContext::default();
        let input = UpdateUserInput::parse(&json!({ "is_active": false }), &ctx).unwrap();
        assert!(input.touches_privileged_fields());
        let input = UpdateUserInput::parse(&json!({ "name": "Kemi A." }), &ctx).unwrap();
        assert!(!input.touches_privileged_fields());
    }
}
