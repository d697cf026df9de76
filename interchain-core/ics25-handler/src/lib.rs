//! Message entry points of the packet-relay core.
//!
//! When processing a message, if any function in this library returns an
//! error, the host is expected to discard every state modification made to
//! the context while processing it. `dispatch` validates a message in full
//! before executing it, so validation failures never write.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[allow(unused_extern_crates)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod entrypoint;

/// Re-exports handler types from the `interchain-core-handler-types` crate.
pub mod types {
    #[doc(inline)]
    pub use interchain_core_handler_types::*;
}
