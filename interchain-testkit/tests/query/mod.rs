pub mod channel;
pub mod transfer;
