pub mod repository_error;
pub mod user_repo;
pub mod item_repo;
pub mod claim_repo;
