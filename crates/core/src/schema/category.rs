//! Product category inputs.

use super::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::validation::{Fields, Schema};

pub const MAX_DISPLAY_ORDER: i64 = 9999;

/// `POST /categories`.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl Schema for CreateCategoryInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let name = f.text("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH);
        let description = f.opt_text("description", MAX_DESCRIPTION_LENGTH);
        let display_order = f.opt_int("display_order", 0, MAX_DISPLAY_ORDER);
        let is_active = f.opt_bool("is_active");
        Some(Self {
            name: name?,
            description,
            display_order: display_order.unwrap_or(0),
            is_active: is_active.unwrap_or(true),
        })
    }
}

/// `PUT /categories/{id}`.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl Schema for UpdateCategoryInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        f.require_any(&["name", "description", "display_order", "is_active"]);
        Some(Self {
            name: f.opt_text_between("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH),
            description: f.opt_text("description", MAX_DESCRIPTION_LENGTH),
            display_order: f.opt_int("display_order", 0, MAX_DISPLAY_ORDER),
            is_active: f.opt_bool("is_active"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationContext;
    use serde_json::json;

    #[test]
    fn defaults_apply_on_create() {
        let ctx = ValidationContext::default();
        let input = CreateCategoryInput::parse(&json!({ "name": "Braiding Hair" }), &ctx).unwrap();
        assert_eq!(input.display_order, 0);
        assert!(input.is_active);
        assert!(input.description.is_none());
    }

    #[test]
    fn display_order_only_update_leaves_other_fields_unset() {
        let ctx = ValidationContext::default();
        let input = UpdateCategoryInput::parse(&json!({ "display_order": 4 }), &ctx).unwrap();
        assert_eq!(input.display_order, Some(4));
        assert!(input.name.is_none());
        assert!(input.description.is_none());
    }

    #[test]
    fn display_order_is_bounded() {
        let ctx = ValidationContext::default();
        assert!(UpdateCategoryInput::parse(&json!({ "display_order": 10000 }), &ctx).is_err());
        assert!(UpdateCategoryInput::parse(&json!({ "display_order": -1 }), &ctx).is_err());
    }
}
