//! Implementation of a host store mock. Used in testing the handlers of the
//! packet-relay core.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::time::Duration;

use interchain_core_channel::types::channel::ChannelEnd;
use interchain_core_channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use interchain_core_channel::types::packet::Receipt;
use interchain_core_channel::types::Height;
use interchain_core_handler_types::events::IbcEvent;
use interchain_core_host_types::identifiers::{ChannelId, ConnectionId, Sequence};
use interchain_core_host_types::path::Path;
use interchain_primitives::prelude::*;
use interchain_primitives::Timestamp;
use parking_lot::Mutex;

use crate::testapp::ibc::clients::mock::MockLightClient;

pub const DEFAULT_BLOCK_TIME_SECS: u64 = 3;

/// All relay state of one chain.
///
/// Packet commitments, receipts and acknowledgements are keyed by their full
/// store key, so iteration follows the key order of a real store.
#[derive(Clone, Debug)]
pub struct IbcState {
    pub host_height: Height,
    pub host_timestamp: Timestamp,

    /// All the channels in the store.
    pub channels: BTreeMap<ChannelId, ChannelEnd>,

    /// Tracks the sequence number for the next packet to be sent.
    pub next_sequence_send: BTreeMap<ChannelId, Sequence>,

    /// Tracks the sequence number for the next packet to be received.
    pub next_sequence_recv: BTreeMap<ChannelId, Sequence>,

    /// Tracks the sequence number for the next packet to be acknowledged.
    pub next_sequence_ack: BTreeMap<ChannelId, Sequence>,

    /// Constant-size commitments to packets data fields
    pub packet_commitments: BTreeMap<Vec<u8>, PacketCommitment>,

    /// Used by unordered channel
    pub packet_receipts: BTreeMap<Vec<u8>, Receipt>,

    pub packet_acknowledgements: BTreeMap<Vec<u8>, AcknowledgementCommitment>,

    /// Emitted events in order
    pub events: Vec<IbcEvent>,

    /// Logs of the relay handlers
    pub logs: Vec<String>,
}

impl IbcState {
    pub fn new(host_height: Height, host_timestamp: Timestamp) -> Self {
        Self {
            host_height,
            host_timestamp,
            channels: BTreeMap::new(),
            next_sequence_send: BTreeMap::new(),
            next_sequence_recv: BTreeMap::new(),
            next_sequence_ack: BTreeMap::new(),
            packet_commitments: BTreeMap::new(),
            packet_receipts: BTreeMap::new(),
            packet_acknowledgements: BTreeMap::new(),
            events: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// The bytes stored under `path`, as a counterparty light client would
    /// prove them. Channel ends are not provable.
    pub fn value_at(&self, path: &Path) -> Option<Vec<u8>> {
        match path {
            Path::ChannelEnd(_) => None,
            Path::SeqSend(p) => self.next_sequence_send.get(&p.0).map(Sequence::to_vec),
            Path::SeqRecv(p) => self.next_sequence_recv.get(&p.0).map(Sequence::to_vec),
            Path::SeqAck(p) => self.next_sequence_ack.get(&p.0).map(Sequence::to_vec),
            Path::Commitment(p) => self
                .packet_commitments
                .get(&p.to_key())
                .map(|c| c.clone().into_vec()),
            Path::Ack(p) => self
                .packet_acknowledgements
                .get(&p.to_key())
                .map(|c| c.clone().into_vec()),
            Path::Receipt(p) => self.packet_receipts.get(&p.to_key()).map(Receipt::to_vec),
        }
    }
}

/// The host store of a mock chain.
///
/// The state sits behind a shared lock so that the light client the
/// counterparty chain runs against this chain can read it.
#[derive(Debug)]
pub struct MockIbcStore {
    pub state: Arc<Mutex<IbcState>>,

    /// Light clients of the counterparty chains, by connection.
    pub clients: BTreeMap<ConnectionId, MockLightClient>,
}

impl MockIbcStore {
    pub fn new(host_height: Height, host_timestamp: Timestamp) -> Self {
        Self {
            state: Arc::new(Mutex::new(IbcState::new(host_height, host_timestamp))),
            clients: BTreeMap::new(),
        }
    }

    /// A handle on the state, for a light client tracking this chain.
    pub fn shared_state(&self) -> Arc<Mutex<IbcState>> {
        Arc::clone(&self.state)
    }

    /// A copy of the current state, to be restored if a transaction fails.
    pub fn snapshot(&self) -> IbcState {
        self.state.lock().clone()
    }

    pub fn restore(&self, snapshot: IbcState) {
        *self.state.lock() = snapshot;
    }

    pub fn add_client(&mut self, connection_id: ConnectionId, client: MockLightClient) {
        self.clients.insert(connection_id, client);
    }

    pub fn client_mut(&mut self, connection_id: &ConnectionId) -> Option<&mut MockLightClient> {
        self.clients.get_mut(connection_id)
    }

    /// Moves the chain to the next block.
    pub fn advance_block(&self, block_time: Duration) {
        let mut state = self.state.lock();
        state.host_height = state.host_height.increment();
        state.host_timestamp = state
            .host_timestamp
            .checked_add(block_time)
            .unwrap_or(state.host_timestamp);
    }

    pub fn host_height(&self) -> Height {
        self.state.lock().host_height
    }

    pub fn host_timestamp(&self) -> Timestamp {
        self.state.lock().host_timestamp
    }

    pub fn events(&self) -> Vec<IbcEvent> {
        self.state.lock().events.clone()
    }

    pub fn logs(&self) -> Vec<String> {
        self.state.lock().logs.clone()
    }

    pub fn clear_events(&self) {
        self.state.lock().events.clear();
    }
}
