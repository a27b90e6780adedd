pub mod user_router;
pub mod admin_router;
pub mod item_router;
pub mod claim_router;
