//! Repository integration tests.
//!
//! `#[sqlx::test]` provisions a fresh database per test from `DATABASE_URL`
//! and runs the migrations first.

use std::str::FromStr;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use salon_core::error::CoreError;
use salon_core::orders::order_number;
use salon_core::reviews::ReviewTarget;
use salon_core::schema::category::{CreateCategoryInput, UpdateCategoryInput};
use salon_core::schema::order::{OrderItemInput, OrderListQuery, UpdateOrderInput};
use salon_core::schema::product::{CreateProductInput, UpdateProductInput};
use salon_core::schema::stylist::CreateStylistInput;
use salon_core::schema::style::{CreateStyleInput, UpdateStyleInput};
use salon_core::scheduling::ensure_slot_available;
use salon_core::uniqueness::ensure_email_available;
use salon_core::vocab::{
    Difficulty, OrderStatus, PaymentStatus, ProductCategory, StyleCategory, UserRole,
};
use salon_db::models::appointment::NewAppointment;
use salon_db::models::order::NewOrder;
use salon_db::models::product::Product;
use salon_db::models::style::Style;
use salon_db::models::user::NewUser;
use salon_db::repositories::{
    AppointmentRepo, CategoryRepo, OrderRepo, OrderWriteError, ProductRepo, ReviewRepo,
    StyleRepo, StylistRepo, UserRepo,
};
use salon_db::store::PgStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Ama Mensah".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        phone: None,
        role: UserRole::Customer,
    }
}

fn new_product(name: &str, price: &str, stock: i32) -> CreateProductInput {
    CreateProductInput {
        name: name.to_string(),
        description: "Salon grade".to_string(),
        price: dec(price),
        stock_quantity: stock,
        image_url: "https://cdn.example.com/p.jpg".to_string(),
        category: ProductCategory::HairCare,
        is_active: true,
        sku: None,
        weight_grams: None,
        dimensions: None,
    }
}

async fn place(
    pool: &PgPool,
    customer_id: salon_core::types::DbId,
    items: &[OrderItemInput],
) -> Result<salon_db::models::order::OrderWithItems, OrderWriteError> {
    OrderRepo::place(pool, items, |lines, totals| NewOrder {
        customer_id,
        order_number: order_number(Utc::now()),
        lines,
        totals,
        shipping_address: "12 Palm Street, Accra".to_string(),
        billing_address: "12 Palm Street, Accra".to_string(),
        payment_method: "card".to_string(),
        notes: None,
    })
    .await
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_rejected_in_any_case(pool: PgPool) {
    UserRepo::create(&pool, &new_user("x@test.com")).await.unwrap();

    let store = PgStore::new(&pool);
    let err = ensure_email_available(&store, "x@test.com", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));

    // The unique index catches what the pre-check would miss.
    let err = UserRepo::create(&pool, &new_user("X@Test.com"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn display_order_update_leaves_other_fields(pool: PgPool) {
    let created = CategoryRepo::create(
        &pool,
        &CreateCategoryInput {
            name: "Braiding Hair".to_string(),
            description: Some("Pre-stretched packs".to_string()),
            display_order: 0,
            is_active: true,
        },
    )
    .await
    .unwrap();

    let update = UpdateCategoryInput {
        display_order: Some(7),
        ..Default::default()
    };
    let updated = CategoryRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.display_order, 7);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description, created.description);

    // Re-applying the same update changes nothing visible.
    let again = CategoryRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.display_order, updated.display_order);
    assert_eq!(again.name, updated.name);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn soft_deleted_category_leaves_active_listing(pool: PgPool) {
    let created = CategoryRepo::create(
        &pool,
        &CreateCategoryInput {
            name: "Tools".to_string(),
            description: None,
            display_order: 1,
            is_active: true,
        },
    )
    .await
    .unwrap();

    assert!(CategoryRepo::deactivate(&pool, created.id).await.unwrap());
    assert!(CategoryRepo::list_active(&pool).await.unwrap().is_empty());
    assert_eq!(CategoryRepo::list_all(&pool).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

fn knotless() -> CreateStyleInput {
    CreateStyleInput {
        name: "Knotless".to_string(),
        photo_url: "https://cdn.example.com/k.jpg".to_string(),
        description: "No knot at the root".to_string(),
        category: StyleCategory::Knotless,
        difficulty: None,
        duration_minutes: Some(300),
    }
}

/// Everything but `updated_at`, which the trigger bumps on every write.
fn product_sans_updated_at(p: &Product) -> Product {
    Product { updated_at: p.created_at, ..p.clone() }
}

fn style_sans_updated_at(s: &Style) -> Style {
    Style { updated_at: s.created_at, ..s.clone() }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_reads_back_as_created_until_soft_deleted(pool: PgPool) {
    let mut input = new_product("Edge Gel", "25.99", 10);
    input.sku = Some("EDGE-GEL-01".to_string());
    input.weight_grams = Some(120);
    let created = ProductRepo::create(&pool, &input).await.unwrap();

    let read = ProductRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(read, created);

    assert!(ProductRepo::deactivate(&pool, created.id).await.unwrap());
    assert!(!ProductRepo::deactivate(&pool, created.id).await.unwrap());
    let hidden = ProductRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert!(!hidden.is_active);
    assert_eq!(hidden.name, created.name);
    assert_eq!(hidden.created_at, created.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeating_a_product_update_changes_nothing_else(pool: PgPool) {
    let created = ProductRepo::create(&pool, &new_product("Scalp Oil", "15.50", 4))
        .await
        .unwrap();
    let update = UpdateProductInput {
        price: Some(dec("17.25")),
        dimensions: Some("10x4x4 cm".to_string()),
        ..Default::default()
    };

    let first = ProductRepo::update(&pool, created.id, &update).await.unwrap().unwrap();
    assert_eq!(first.price, dec("17.25"));
    assert_eq!(first.stock_quantity, created.stock_quantity);
    assert_eq!(first.created_at, created.created_at);

    let second = ProductRepo::update(&pool, created.id, &update).await.unwrap().unwrap();
    assert_eq!(product_sans_updated_at(&second), product_sans_updated_at(&first));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn style_reads_back_as_created_until_deleted(pool: PgPool) {
    let created = StyleRepo::create(&pool, &knotless()).await.unwrap();

    let read = StyleRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(read, created);

    assert!(StyleRepo::delete(&pool, created.id).await.unwrap());
    assert!(StyleRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
    assert!(!StyleRepo::delete(&pool, created.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeating_a_style_update_changes_nothing_else(pool: PgPool) {
    let created = StyleRepo::create(&pool, &knotless()).await.unwrap();
    let update = UpdateStyleInput {
        difficulty: Some(Difficulty::Hard),
        duration_minutes: Some(360),
        ..Default::default()
    };

    let first = StyleRepo::update(&pool, created.id, &update).await.unwrap().unwrap();
    assert_eq!(first.difficulty, Some(Difficulty::Hard));
    assert_eq!(first.name, created.name);

    let second = StyleRepo::update(&pool, created.id, &update).await.unwrap().unwrap();
    assert_eq!(style_sans_updated_at(&second), style_sans_updated_at(&first));
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_booking_of_same_slot_conflicts(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("client@test.com")).await.unwrap();
    let stylist = StylistRepo::create(
        &pool,
        &CreateStylistInput {
            name: "Fatou".to_string(),
            specialty: "Knotless Braids".to_string(),
            photo_url: "https://cdn.example.com/f.jpg".to_string(),
            description: "Gentle hands".to_string(),
            is_featured: false,
        },
    )
    .await
    .unwrap();
    let style = StyleRepo::create(
        &pool,
        &CreateStyleInput {
            name: "Knotless".to_string(),
            photo_url: "https://cdn.example.com/k.jpg".to_string(),
            description: "No knot at the root".to_string(),
            category: StyleCategory::Knotless,
            difficulty: None,
            duration_minutes: Some(300),
        },
    )
    .await
    .unwrap();

    let at = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
    let booking = NewAppointment {
        user_id: user.id,
        stylist_id: stylist.id,
        style_id: style.id,
        scheduled_at: at,
        notes: None,
    };
    let first = AppointmentRepo::create(&pool, &booking).await.unwrap();

    let store = PgStore::new(&pool);
    let err = ensure_slot_available(&store, stylist.id, at, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));
    assert!(ensure_slot_available(&store, stylist.id, at, Some(first.id))
        .await
        .is_ok());

    let err = AppointmentRepo::create(&pool, &booking).await.unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_appointments_stylist_slot")
    );
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn placing_an_order_prices_and_decrements_stock(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("buyer@test.com")).await.unwrap();
    let gel = ProductRepo::create(&pool, &new_product("Edge Gel", "25.99", 10)).await.unwrap();
    let oil = ProductRepo::create(&pool, &new_product("Scalp Oil", "15.50", 1)).await.unwrap();

    let placed = place(
        &pool,
        user.id,
        &[
            OrderItemInput { product_id: gel.id, quantity: 2 },
            OrderItemInput { product_id: oil.id, quantity: 1 },
        ],
    )
    .await
    .unwrap();

    assert_eq!(placed.order.subtotal, dec("67.48"));
    assert_eq!(placed.order.tax, dec("6.75"));
    assert_eq!(placed.order.shipping, Decimal::ZERO);
    assert_eq!(placed.order.total, dec("74.23"));
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.items.len(), 2);

    let gel_after = ProductRepo::find_by_id(&pool, gel.id).await.unwrap().unwrap();
    assert_eq!(gel_after.stock_quantity, 8);

    // Round-trip through the read path.
    let read = OrderRepo::find_with_items(&pool, placed.order.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(read.order, placed.order);
    assert_eq!(read.items, placed.items);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insufficient_stock_rejects_without_writing(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("buyer@test.com")).await.unwrap();
    let oil = ProductRepo::create(&pool, &new_product("Scalp Oil", "15.50", 1)).await.unwrap();

    let err = place(&pool, user.id, &[OrderItemInput { product_id: oil.id, quantity: 2 }])
        .await
        .unwrap_err();
    assert!(matches!(err, OrderWriteError::Rejected(CoreError::Conflict(_))));

    let orders = OrderRepo::list(&pool, &OrderListQuery::default(), Some(user.id))
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelling_restores_stock_once(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("buyer@test.com")).await.unwrap();
    let oil = ProductRepo::create(&pool, &new_product("Scalp Oil", "15.50", 5)).await.unwrap();
    let placed = place(&pool, user.id, &[OrderItemInput { product_id: oil.id, quantity: 3 }])
        .await
        .unwrap();
    assert_eq!(placed.order.total, dec("61.15"));

    let cancelled = OrderRepo::cancel(&pool, placed.order.id, "Changed my mind")
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    let oil_after = ProductRepo::find_by_id(&pool, oil.id).await.unwrap().unwrap();
    assert_eq!(oil_after.stock_quantity, 5);

    let err = OrderRepo::cancel(&pool, placed.order.id, "Again")
        .await
        .unwrap_err();
    assert!(matches!(err, OrderWriteError::Rejected(CoreError::Conflict(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_update_follows_the_lifecycle(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("buyer@test.com")).await.unwrap();
    let oil = ProductRepo::create(&pool, &new_product("Scalp Oil", "15.50", 5)).await.unwrap();
    let placed = place(&pool, user.id, &[OrderItemInput { product_id: oil.id, quantity: 2 }])
        .await
        .unwrap();

    let confirm = UpdateOrderInput {
        status: Some(OrderStatus::Confirmed),
        payment_status: Some(PaymentStatus::Paid),
        ..Default::default()
    };
    let confirmed = OrderRepo::update(&pool, placed.order.id, &confirm, "Admin")
        .await
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);
    assert_eq!(confirmed.payment_status, PaymentStatus::Paid);

    let cancel = UpdateOrderInput {
        status: Some(OrderStatus::Cancelled),
        ..Default::default()
    };
    let cancelled = OrderRepo::update(&pool, placed.order.id, &cancel, "Admin")
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("Admin"));
    let oil_after = ProductRepo::find_by_id(&pool, oil.id).await.unwrap().unwrap();
    assert_eq!(oil_after.stock_quantity, 5);

    let err = OrderRepo::update(&pool, placed.order.id, &confirm, "Admin")
        .await
        .unwrap_err();
    assert!(matches!(err, OrderWriteError::Rejected(CoreError::Conflict(_))));

    let err = OrderRepo::update(&pool, uuid::Uuid::new_v4(), &confirm, "Admin")
        .await
        .unwrap_err();
    assert!(matches!(err, OrderWriteError::Rejected(CoreError::NotFound { .. })));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_update_waits_for_a_concurrent_cancellation(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("buyer@test.com")).await.unwrap();
    let oil = ProductRepo::create(&pool, &new_product("Scalp Oil", "15.50", 5)).await.unwrap();
    let placed = place(&pool, user.id, &[OrderItemInput { product_id: oil.id, quantity: 2 }])
        .await
        .unwrap();
    let id = placed.order.id;

    // Hold the row the way a cancellation in flight does.
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("SELECT id FROM orders WHERE id = $1 FOR UPDATE")
        .bind(id)
        .execute(&mut *tx)
        .await
        .unwrap();

    let admin = tokio::spawn({
        let pool = pool.clone();
        async move {
            let confirm = UpdateOrderInput {
                status: Some(OrderStatus::Confirmed),
                ..Default::default()
            };
            OrderRepo::update(&pool, id, &confirm, "Admin").await
        }
    });

    sqlx::query("UPDATE orders SET status = 'CANCELLED' WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let err = admin.await.unwrap().unwrap_err();
    assert!(matches!(err, OrderWriteError::Rejected(CoreError::Conflict(_))));
    let stored = OrderRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn review_target_must_exist(pool: PgPool) {
    let missing = ReviewTarget::Style(uuid::Uuid::new_v4());
    assert!(!ReviewRepo::target_exists(&pool, missing).await.unwrap());

    let stats = ReviewRepo::stats(&pool, missing).await.unwrap();
    assert_eq!(stats.total_reviews, 0);
}
