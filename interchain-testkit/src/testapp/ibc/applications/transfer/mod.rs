pub mod context;
pub mod module;
pub mod types;
