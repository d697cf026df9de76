//! Application callbacks and their routing.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod binding;
pub mod module;
pub mod router;

/// Re-exports router data structures from the `interchain-core-router-types` crate
pub mod types {
    #[doc(inline)]
    pub use interchain_core_router_types::*;
}
