//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async functions that
//! accept `&PgPool` as the first argument.

pub mod appointment_repo;
pub mod category_repo;
pub mod order_repo;
pub mod product_repo;
pub mod review_repo;
pub mod session_repo;
pub mod style_repo;
pub mod stylist_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepo;
pub use category_repo::CategoryRepo;
pub use order_repo::{OrderRepo, OrderWriteError};
pub use product_repo::ProductRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use style_repo::StyleRepo;
pub use stylist_repo::StylistRepo;
pub use user_repo::UserRepo;
