//! The fungible token transfer application.
//!
//! Tokens leaving their source chain are escrowed there and minted as
//! vouchers on the receiving chain; vouchers travelling back are burned and
//! the escrow released. [`escrow`] keeps a per-denomination total of what is
//! escrowed, and [`authz`] lets a grantee send transfers on behalf of a
//! granter within a spend limit.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[allow(unused_extern_crates)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod authz;
pub mod context;
pub mod escrow;
pub mod handler;
pub mod module;

/// Re-exports the transfer data structures from the
/// `interchain-app-transfer-types` crate.
pub mod types {
    #[doc(inline)]
    pub use interchain_app_transfer_types::*;
}
