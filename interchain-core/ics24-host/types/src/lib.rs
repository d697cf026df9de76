//! Host identifier and path types of the interchain packet-relay core.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[allow(unused_extern_crates)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod error;
pub mod identifiers;
pub mod path;
pub(crate) mod validate;

pub use validate::*;
