//! Messages handled by the transfer application.

mod authz;
mod transfer;

pub use authz::*;
pub use transfer::*;
