pub mod ics04_channel;
pub mod router;
