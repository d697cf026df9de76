//! Contains primitive types and traits common to the interchain packet-relay components.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod prelude;
pub mod utils;

mod types;
pub use types::*;

#[cfg(feature = "serde")]
pub mod serializers;
