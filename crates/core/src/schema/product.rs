//! Shop product inputs.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::common::Page;
use super::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_SEARCH_LENGTH, MIN_NAME_LENGTH};
use crate::validation::{codes, Fields, Schema};
use crate::vocab::ProductCategory;

pub const MAX_STOCK_QUANTITY: i64 = 100_000;
pub const MAX_WEIGHT_GRAMS: i64 = 100_000;
pub const MAX_DIMENSIONS_LENGTH: usize = 100;

/// Upper-case letters, digits and dashes, 3-32 characters.
static SKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9-]{3,32}$").expect("valid regex"));

const SKU_HINT: &str = "must be 3-32 characters of letters, digits or dashes";

/// `POST /products`.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub image_url: String,
    pub category: ProductCategory,
    pub is_active: bool,
    pub sku: Option<String>,
    pub weight_grams: Option<i32>,
    pub dimensions: Option<String>,
}

impl Schema for CreateProductInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let name = f.text("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH);
        let description = f.text("description", 1, MAX_DESCRIPTION_LENGTH);
        let price = f.price("price");
        let stock_quantity = f.int("stock_quantity", 0, MAX_STOCK_QUANTITY);
        let image_url = f.url("image_url");
        let category = f.choice("category");
        let is_active = f.opt_bool("is_active");
        let sku = f.opt_code("sku", &SKU_RE, SKU_HINT);
        let weight_grams = f.opt_int("weight_grams", 1, MAX_WEIGHT_GRAMS);
        let dimensions = f.opt_text("dimensions", MAX_DIMENSIONS_LENGTH);
        Some(Self {
            name: name?,
            description: description?,
            price: price?,
            stock_quantity: stock_quantity?,
            image_url: image_url?,
            category: category?,
            is_active: is_active.unwrap_or(true),
            sku,
            weight_grams,
            dimensions,
        })
    }
}

/// `PUT /products/{id}`.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
    pub category: Option<ProductCategory>,
    pub is_active: Option<bool>,
    pub sku: Option<String>,
    pub weight_grams: Option<i32>,
    pub dimensions: Option<String>,
}

impl Schema for UpdateProductInput {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        f.require_any(&[
            "name",
            "description",
            "price",
            "stock_quantity",
            "image_url",
            "category",
            "is_active",
            "sku",
            "weight_grams",
            "dimensions",
        ]);
        Some(Self {
            name: f.opt_text_between("name", MIN_NAME_LENGTH, MAX_NAME_LENGTH),
            description: f.opt_text_between("description", 1, MAX_DESCRIPTION_LENGTH),
            price: f.opt_price("price"),
            stock_quantity: f.opt_int("stock_quantity", 0, MAX_STOCK_QUANTITY),
            image_url: f.opt_url("image_url"),
            category: f.opt_choice("category"),
            is_active: f.opt_bool("is_active"),
            sku: f.opt_code("sku", &SKU_RE, SKU_HINT),
            weight_grams: f.opt_int("weight_grams", 1, MAX_WEIGHT_GRAMS),
            dimensions: f.opt_text("dimensions", MAX_DIMENSIONS_LENGTH),
        })
    }
}

/// `GET /products` query. Filters are ANDed.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub page: Page,
    pub category: Option<ProductCategory>,
    /// Honoured for admins only; everyone else sees active products.
    pub is_active: Option<bool>,
    pub in_stock: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
}

impl Schema for ProductListQuery {
    fn from_fields(f: &mut Fields<'_>) -> Option<Self> {
        let page = Page::read(f);
        let category = f.opt_choice("category");
        let is_active = f.opt_bool("is_active");
        let in_stock = f.opt_bool("in_stock");
        let min_price = f.opt_amount("min_price");
        let max_price = f.opt_amount("max_price");
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                f.reject(
                    "min_price",
                    codes::CUSTOM,
                    "min_price must be less than or equal to max_price",
                );
            }
        }
        let search = f.opt_text("search", MAX_SEARCH_LENGTH);
        Some(Self {
            page,
            category,
            is_active,
            in_stock,
            min_price,
            max_price,
            search,
        })
    }
}
