//! Read-only queries over the state of a chain running the packet-relay core.
//!
//! Requests carry raw identifiers as submitted by a client. Every query
//! validates them first, then looks up the channel, then the requested
//! value, so a caller can tell a malformed request
//! ([`QueryError::InvalidArgument`](error::QueryError::InvalidArgument)) apart
//! from a missing object ([`QueryError::NotFound`](error::QueryError::NotFound)).
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[allow(unused_extern_crates)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod channel;
pub mod context;
pub mod error;
pub mod transfer;
