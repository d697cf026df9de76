//! Data structures of the fungible token transfer application.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod amount;
mod coin;
mod denom;
mod memo;

pub use amount::*;
pub use coin::*;
pub use denom::*;
pub mod authz;
pub mod error;
pub mod events;
pub mod msgs;
pub mod packet;
pub use memo::*;
/// Re-exports `U256` from `primitive-types` crate for convenience.
pub use primitive_types::U256;

use interchain_core_channel_types::acknowledgement::StatusValue;

/// Module identifier for the transfer application.
pub const MODULE_ID_STR: &str = "transfer";

/// The port identifier that the transfer application typically binds with.
pub const PORT_ID_STR: &str = "transfer";

/// Transfer application version.
pub const VERSION: &str = "ics20-1";

/// The successful string used for creating an acknowledgement status,
/// equivalent to `base64::encode(0x01)`.
pub const ACK_SUCCESS_B64: &str = "AQ==";

/// Returns a successful acknowledgement status for the token transfer application.
pub fn ack_success_b64() -> StatusValue {
    StatusValue::new_or_unknown(ACK_SUCCESS_B64)
}
