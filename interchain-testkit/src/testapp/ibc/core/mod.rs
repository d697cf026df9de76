pub mod core_ctx;
pub mod router;
pub mod types;
