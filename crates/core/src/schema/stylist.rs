//! Stylist inputs.

use super::common::Page;
use super::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::specialty::{canonical_term, normalize_specialty, MAX_SPECIALTY_LENGTH, SPECIALTY_TERMS};
use crate::validation::{codes, Fields, Schema};

fn read_specialty(f: &mut Fields<'_>, required: bool) -> Option<String> {
    let raw = if required {
        f.text("specialty", 1, MAX_SPECIALTY_LENGTH)
    } else {
        f.opt_text_between("specialty", 1, MAX_SPECIALTY_LENGTH)
    }?;
    match normalize_specialty(&raw) {
        Ok(specialty) => Some(specialty),
        Err(message) => {
            f.reject("specialty", codes::INVALID_ENUM, message);
            None
        }
    }
}

/// `POST /stylists`.
#[derive(Debug, Clone)]
pub struct CreateStylistInput {
    pub name: String,
    /// Canonical comma-separated specialty list.
    pub specialty: String,
    pub photo_url: String,
    pub description: String,
    pub is_featured: bool,
}

impl Schema for CreateStylistInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let name = f.text("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH);
        let specialty = read_specialty(f, true);
        let photo_url = f.url("photo_url");
        let description = f.text("description", 1, MAX_DESCRIPTION_LENGTH);
        let is_featured = f.opt_bool("is_featured");
        Some(Self {
            name: name?,
            specialty: specialty?,
            photo_url: photo_url?,
            description: description?,
            is_featured: is_featured.unwrap_or(false),
        })
    }
}

/// `PUT /stylists/{id}`.
#[derive(Debug, Clone, Default)]
pub struct UpdateStylistInput {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

impl Schema for UpdateStylistInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        f.require_any(&[
            "name",
            "specialty",
            "photo_url",
            "description",
            "is_featured",
            "is_active",
        ]);
        Some(Self {
            name: f.opt_text_between("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH),
            specialty: read_specialty(f, false),
            photo_url: f.opt_url("photo_url"),
            description: f.opt_text_between("description", 1, MAX_DESCRIPTION_LENGTH),
            is_featured: f.opt_bool("is_featured"),
            is_active: f.opt_bool("is_active"),
        })
    }
}

/// `GET /stylists` query.
#[derive(Debug, Clone, Default)]
pub struct StylistListQuery {
    pub page: Page,
    pub is_featured: Option<bool>,
    /// A single canonical specialty term to filter on.
    pub specialty: Option<String>,
    /// Honoured for admins only.
    pub include_inactive: bool,
}

impl Schema for StylistListQuery {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let page = Page::read(f);
        let is_featured = f.opt_bool("is_featured");
        let specialty = f.opt_text("specialty", MAX_SPECIALTY_LENGTH).and_then(|term| {
            let canonical = canonical_term(&term);
            if canonical.is_none() {
                f.reject(
                    "specialty",
                    codes::INVALID_ENUM,
                    format!("specialty must be one of: {}", SPECIALTY_TERMS.join(", ")),
                );
            }
            canonical.map(str::to_string)
        });
        let include_inactive = f.opt_bool("include_inactive").unwrap_or(false);
        Some(Self {
            page,
            is_featured,
            specialty,
            include_inactive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationContext;
    use serde_json::json;

    #[test]
    fn specialty_is_canonicalized() {
        let ctx = ValidationContext::default();
        let input = CreateStylistInput::parse(
            &json!({
                "name": "Fatou",
                "specialty": "knotless braids, fulani braids",
                "photo_url": "https://cdn.example.com/fatou.jpg",
                "description": "Ten years of braiding experience."
            }),
            &ctx,
        )
        .unwrap();
        assert_eq!(input.specialty, "Knotless Braids, Fulani Braids");
        assert!(!input.is_featured);
    }

    #[test]
    fn unknown_specialty_and_bad_url_are_both_reported() {
        let ctx = ValidationContext::default();
        let errors = CreateStylistInput::parse(
            &json!({
                "name": "Fatou",
                "specialty": "Perms",
                "photo_url": "ftp://example.com/x.jpg",
                "description": "Ten years of braiding experience."
            }),
            &ctx,
        )
        .unwrap_err();
        assert!(errors.has_field("specialty"));
        assert!(errors.has_field("photo_url"));
    }

    #[test]
    fn list_query_filters_on_canonical_term() {
        let ctx = ValidationContext::default();
        let query = StylistListQuery::parse(
            &json!({ "specialty": "cornrows", "include_inactive": "true" }),
            &ctx,
        )
        .unwrap();
        assert_eq!(query.specialty.as_deref(), Some("Cornrows"));
        assert!(query.include_inactive);
    }
}
