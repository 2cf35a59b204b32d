//! Repository structs providing CRUD operations per table.

pub mod overlay_repo;
pub mod stream_repo;
pub mod user_repo;

pub use overlay_repo::OverlayRepo;
pub use stream_repo::StreamRepo;
pub use user_repo::UserRepo;
