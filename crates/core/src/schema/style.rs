//! Braiding style catalog inputs.

use super::common::Page;
use super::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::scheduling::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use crate::validation::{Fields, Schema};
use crate::vocab::{Difficulty, StyleCategory};

/// `POST /styles`.
#[derive(Debug, Clone)]
pub struct CreateStyleInput {
    pub name: String,
    pub photo_url: String,
    pub description: String,
    pub category: StyleCategory,
    pub difficulty: Option<Difficulty>,
    pub duration_minutes: Option<i32>,
}

impl Schema for CreateStyleInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let name = f.text("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH);
        let photo_url = f.url("photo_url");
        let description = f.text("description", 1, MAX_DESCRIPTION_LENGTH);
        let category = f.choice("category");
        let difficulty = f.opt_choice("difficulty");
        let duration_minutes =
            f.opt_int("duration_minutes", MIN_DURATION_MINUTES, MAX_DURATION_MINUTES);
        Some(Self {
            name: name?,
            photo_url: photo_url?,
            description: description?,
            category: category?,
            difficulty,
            duration_minutes,
        })
    }
}

/// `PUT /styles/{id}`.
#[derive(Debug, Clone, Default)]
pub struct UpdateStyleInput {
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<StyleCategory>,
    pub difficulty: Option<Difficulty>,
    pub duration_minutes: Option<i32>,
}

impl Schema for UpdateStyleInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        f.require_any(&[
            "name",
            "photo_url",
            "description",
            "category",
            "difficulty",
            "duration_minutes",
        ]);
        Some(Self {
            name: f.opt_text_between("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH),
            photo_url: f.opt_url("photo_url"),
            description: f.opt_text_between("description", 1, MAX_DESCRIPTION_LENGTH),
            category: f.opt_choice("category"),
            difficulty: f.opt_choice("difficulty"),
            duration_minutes: f.opt_int(
                "duration_minutes",
                MIN_DURATION_MINUTES,
                MAX_DURATION_MINUTES,
            ),
        })
    }
}

/// `GET /styles` query.
#[derive(Debug, Clone, Default)]
pub struct StyleListQuery {
    pub page: Page,
    pub category: Option<StyleCategory>,
    pub difficulty: Option<Difficulty>,
}

impl Schema for StyleListQuery {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            page: Page::read(f),
            category: f.opt_choice("category"),
            difficulty: f.opt_choice("difficulty"),
        })
    }
}
