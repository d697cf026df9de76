//! The packet lifecycle engine: host context traits, the light-client
//! verifier seam, the packet commitment store and the packet handlers.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[allow(unused_extern_crates)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod client;
pub mod context;
pub mod handler;
pub mod store;

/// Re-exports channel data structures from the `interchain-core-channel-types` crate
pub mod types {
    #[doc(inline)]
    pub use interchain_core_channel_types::*;
}
