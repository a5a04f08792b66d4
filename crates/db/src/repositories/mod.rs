//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or any Postgres executor) as the first argument.

pub mod content_repo;
pub mod main_content_repo;

pub use content_repo::ContentRepo;
pub use main_content_repo::MainContentRepo;
