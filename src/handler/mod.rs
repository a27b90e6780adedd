pub mod extract;
pub mod user_handler;
pub mod admin_handler;
pub mod item_handler;
pub mod claim_handler;
