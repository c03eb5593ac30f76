//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Writes the seed command
//! batches into one transaction take any `PgExecutor` instead.

pub mod customer_repo;
pub mod order_repo;
pub mod product_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use customer_repo::CustomerRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
