//! The light-client verifier seam.

use interchain_core_channel_types::commitment::CommitmentProofBytes;
use interchain_core_channel_types::error::ClientError;
use interchain_core_channel_types::Height;
use interchain_core_host_types::path::Path;
use interchain_primitives::prelude::*;
use interchain_primitives::Timestamp;

/// A light client tracking the counterparty chain.
///
/// The packet handlers treat proofs as opaque: a client either accepts the
/// claim that `path` holds `value` (or nothing) in the counterparty store at
/// `height`, or returns an error.
pub trait LightClient {
    /// The latest counterparty height the client has verified.
    fn latest_height(&self) -> Height;

    /// The counterparty block time at a verified height.
    fn consensus_timestamp(&self, height: &Height) -> Result<Timestamp, ClientError>;

    fn verify_membership(
        &self,
        height: &Height,
        proof: &CommitmentProofBytes,
        path: &Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError>;

    fn verify_non_membership(
        &self,
        height: &Height,
        proof: &CommitmentProofBytes,
        path: &Path,
    ) -> Result<(), ClientError>;

    /// Rejects proofs at heights the client has not verified yet.
    fn validate_proof_height(&self, proof_height: &Height) -> Result<(), ClientError> {
        let latest_height = self.latest_height();
        if *proof_height > latest_height {
            return Err(ClientError::InvalidProofHeight {
                latest_height,
                proof_height: *proof_height,
            });
        }
        Ok(())
    }
}
