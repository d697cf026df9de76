//! A light client that needs no cryptography.
//!
//! Proof bytes are opaque to the packet handlers, so the mock ignores them
//! and decides membership by looking at the counterparty state directly.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;

use interchain_core_channel::client::LightClient;
use interchain_core_channel::types::commitment::CommitmentProofBytes;
use interchain_core_channel::types::error::ClientError;
use interchain_core_channel::types::Height;
use interchain_core_host_types::path::Path;
use interchain_primitives::prelude::*;
use interchain_primitives::Timestamp;
use parking_lot::Mutex;
use subtle_encoding::hex;

use crate::testapp::ibc::core::types::IbcState;

/// How the mock decides proofs.
#[derive(Clone, Debug)]
pub enum MockVerifier {
    /// Every proof verifies.
    AcceptAll,
    /// No proof verifies.
    RejectAll,
    /// Proofs verify iff the counterparty state agrees with the claim.
    Counterparty(Arc<Mutex<IbcState>>),
}

#[derive(Clone, Debug)]
pub struct MockLightClient {
    verifier: MockVerifier,
    latest_height: Height,
    consensus_timestamps: BTreeMap<Height, Timestamp>,
}

impl MockLightClient {
    pub fn new(verifier: MockVerifier, latest_height: Height, latest_timestamp: Timestamp) -> Self {
        Self {
            verifier,
            latest_height,
            consensus_timestamps: BTreeMap::from([(latest_height, latest_timestamp)]),
        }
    }

    pub fn accept_all(latest_height: Height, latest_timestamp: Timestamp) -> Self {
        Self::new(MockVerifier::AcceptAll, latest_height, latest_timestamp)
    }

    pub fn reject_all(latest_height: Height, latest_timestamp: Timestamp) -> Self {
        Self::new(MockVerifier::RejectAll, latest_height, latest_timestamp)
    }

    /// A client tracking the chain that owns `state`, starting at its
    /// current block.
    pub fn tracking(state: Arc<Mutex<IbcState>>) -> Self {
        let (height, timestamp) = {
            let state = state.lock();
            (state.host_height, state.host_timestamp)
        };
        Self::new(MockVerifier::Counterparty(state), height, timestamp)
    }

    /// Records a verified counterparty block.
    pub fn update(&mut self, height: Height, timestamp: Timestamp) {
        self.consensus_timestamps.insert(height, timestamp);
        if height > self.latest_height {
            self.latest_height = height;
        }
    }

    /// Catches up with the latest block of the tracked chain. Clients that do
    /// not track a chain are left untouched.
    pub fn sync(&mut self) {
        let MockVerifier::Counterparty(state) = &self.verifier else {
            return;
        };
        let (height, timestamp) = {
            let state = state.lock();
            (state.host_height, state.host_timestamp)
        };
        self.update(height, timestamp);
    }

    fn check_height(&self, height: &Height) -> Result<(), ClientError> {
        self.consensus_timestamp(height).map(|_| ())
    }
}

impl LightClient for MockLightClient {
    fn latest_height(&self) -> Height {
        self.latest_height
    }

    fn consensus_timestamp(&self, height: &Height) -> Result<Timestamp, ClientError> {
        self.consensus_timestamps
            .get(height)
            .copied()
            .ok_or(ClientError::MissingConsensusState(*height))
    }

    fn verify_membership(
        &self,
        height: &Height,
        _proof: &CommitmentProofBytes,
        path: &Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        self.check_height(height)?;

        let failed = |description: &str| ClientError::FailedMembershipVerification {
            path: path.to_string(),
            description: description.to_string(),
        };

        match &self.verifier {
            MockVerifier::AcceptAll => Ok(()),
            MockVerifier::RejectAll => Err(failed("rejected by mock client")),
            MockVerifier::Counterparty(state) => match state.lock().value_at(path) {
                Some(stored) if stored == value => Ok(()),
                Some(_) => Err(failed("stored value differs")),
                None => Err(failed("no value stored")),
            },
        }
    }

    fn verify_non_membership(
        &self,
        height: &Height,
        _proof: &CommitmentProofBytes,
        path: &Path,
    ) -> Result<(), ClientError> {
        self.check_height(height)?;

        let failed = |description: &str| ClientError::FailedNonMembershipVerification {
            path: path.to_string(),
            description: description.to_string(),
        };

        match &self.verifier {
            MockVerifier::AcceptAll => Ok(()),
            MockVerifier::RejectAll => Err(failed("rejected by mock client")),
            MockVerifier::Counterparty(state) => match state.lock().value_at(path) {
                Some(_) => Err(failed("value is stored")),
                None => Ok(()),
            },
        }
    }
}

/// Proof bytes for `path`. The mock client never inspects them beyond
/// their being non-empty.
pub fn mock_proof(path: &Path) -> Result<CommitmentProofBytes, ClientError> {
    CommitmentProofBytes::try_from(hex::encode(path.to_key()))
}
