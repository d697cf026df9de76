//! Channel and packet data structures of the packet-relay core.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[allow(unused_extern_crates)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod acknowledgement;
pub mod channel;
pub mod commitment;
pub mod error;
pub mod events;
pub mod msgs;
pub mod packet;
pub mod timeout;

mod height;
mod version;

pub use height::*;
pub use version::*;
