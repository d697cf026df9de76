//! Test harness for the packet-relay core.
//!
//! A [`TestContext`](context::TestContext) is one mock chain: its relay state
//! lives in a [`MockIbcStore`](testapp::ibc::core::types::MockIbcStore) and its
//! applications behind a [`MockRouter`](testapp::ibc::core::router::MockRouter).
//! A [`RelayerContext`](relayer::context::RelayerContext) connects two chains
//! with light clients that verify against each other's live state, and moves
//! packets between them.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod context;
pub mod fixtures;
pub mod relayer;
pub mod testapp;
