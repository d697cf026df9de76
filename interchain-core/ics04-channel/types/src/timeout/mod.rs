//! Defines the packet timeout types.

mod height;
mod timestamp;

pub use height::*;
pub use timestamp::*;
