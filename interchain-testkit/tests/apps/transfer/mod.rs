pub mod authz;
pub mod relay;
