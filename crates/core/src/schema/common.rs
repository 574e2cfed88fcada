//! Params and query pieces shared by every entity.

use crate::types::{DbId, Timestamp};
use crate::validation::{codes, Fields, Schema};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// `/{id}` path params.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParams {
    pub id: DbId,
}

impl Schema for IdParams {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self { id: f.uuid("id")? })
    }
}

/// `/customer/{customer_id}` path params.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerIdParams {
    pub customer_id: DbId,
}

impl Schema for CustomerIdParams {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        Some(Self {
            customer_id: f.uuid("customer_id")?,
        })
    }
}

/// `?page=&limit=` with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    /// Read `page` (>= 1) and `limit` (1-100). Invalid values are recorded
    /// and the defaults stand in so sibling filters still get validated.
    pub fn read(f: &mut Fields<'_>) -> Self {
        Self {
            page: f.opt_long("page", 1, i64::from(i32::MAX)).unwrap_or(DEFAULT_PAGE),
            limit: f.opt_long("limit", 1, MAX_LIMIT).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Optional `from` / `to` bounds with `from <= to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl DateRange {
    pub fn read(f: &mut Fields<'_>) -> Self {
        let from = f.opt_datetime("from");
        let to = f.opt_datetime("to");
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                f.reject("from", codes::CUSTOM, "from must be before or equal to to");
            }
        }
        Self { from, to }
    }
}
