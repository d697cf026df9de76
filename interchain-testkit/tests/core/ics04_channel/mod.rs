pub mod acknowledgement;
pub mod recv_packet;
pub mod timeout;
