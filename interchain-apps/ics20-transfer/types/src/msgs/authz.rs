//! Messages of the authorization gate.

use interchain_primitives::prelude::*;
use interchain_primitives::Signer;

use super::MsgTransfer;
use crate::authz::TransferAuthorization;
use crate::error::TokenTransferError;

pub const GRANT_TYPE_URL: &str = "/interchain.authz.v1.MsgGrant";
pub const EXEC_TYPE_URL: &str = "/interchain.authz.v1.MsgExec";
pub const REVOKE_TYPE_URL: &str = "/interchain.authz.v1.MsgRevoke";

/// Installs or replaces the transfer authorization of `(granter, grantee)`.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MsgGrant {
    pub granter: Signer,
    pub grantee: Signer,
    pub authorization: TransferAuthorization,
}

impl MsgGrant {
    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        validate_pair(&self.granter, &self.grantee)?;
        self.authorization.validate_basic()
    }
}

/// Executes a transfer on behalf of the granter, who is the sender named in
/// the transfer's packet data.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MsgExec {
    pub grantee: Signer,
    pub msg: MsgTransfer,
}

impl MsgExec {
    pub fn granter(&self) -> &Signer {
        &self.msg.packet_data.sender
    }

    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        if self.grantee.is_empty() {
            return Err(TokenTransferError::InvalidAuthorization {
                reason: "grantee cannot be empty".to_string(),
            });
        }
        self.msg.validate_basic()
    }
}

/// Deletes the transfer authorization of `(granter, grantee)`.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MsgRevoke {
    pub granter: Signer,
    pub grantee: Signer,
}

impl MsgRevoke {
    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        validate_pair(&self.granter, &self.grantee)
    }
}

fn validate_pair(granter: &Signer, grantee: &Signer) -> Result<(), TokenTransferError> {
    let invalid = |reason: &str| TokenTransferError::InvalidAuthorization {
        reason: reason.to_string(),
    };

    if granter.is_empty() || grantee.is_empty() {
        return Err(invalid("granter and grantee cannot be empty"));
    }
    if granter == grantee {
        return Err(invalid("granter and grantee cannot be the same"));
    }
    Ok(())
}
