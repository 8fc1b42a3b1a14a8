//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod blacklist_repo;
pub mod folder_repo;
pub mod video_repo;

pub use blacklist_repo::BlacklistRepo;
pub use folder_repo::FolderRepo;
pub use video_repo::VideoRepo;
