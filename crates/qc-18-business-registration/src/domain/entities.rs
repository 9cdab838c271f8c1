//! Core domain entities for the Business Registration subsystem.
//!
//! The operation envelope is owned by the dispatch framework; this crate
//! only reads its sender, type tag and business-registration asset.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 32-byte operation id.
pub type Hash = [u8; 32];

/// A 32-byte account identity key.
pub type PublicKey = [u8; 32];

/// A 64-byte signature. Carried, never verified here.
pub type Signature = [u8; 64];

/// Operation type tag used by the framework to route envelopes to handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// Plain value transfer (handled elsewhere).
    Transfer,
    /// Register the sender account as a business.
    BusinessRegistration,
}

impl OperationType {
    /// Stable numeric code, used when hashing the envelope.
    pub fn code(&self) -> u16 {
        match self {
            Self::Transfer => 0,
            Self::BusinessRegistration => 100,
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "Transfer"),
            Self::BusinessRegistration => write!(f, "BusinessRegistration"),
        }
    }
}

/// Registration payload: the business an account registers as.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessRegistrationAsset {
    /// Business name. Compared byte-for-byte, never normalized.
    pub name: String,
    /// Business website.
    pub website: String,
}

impl BusinessRegistrationAsset {
    pub fn new(name: impl Into<String>, website: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            website: website.into(),
        }
    }
}

/// Type-specific payload carried by an envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationAsset {
    /// No type-specific payload.
    #[default]
    None,
    /// Business registration payload.
    BusinessRegistration(BusinessRegistrationAsset),
}

/// Generic operation envelope.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation id (SHA-256 over the signed fields).
    pub id: Hash,
    /// Type tag.
    pub op_type: OperationType,
    /// Sender identity key.
    pub sender: PublicKey,
    /// Sender sequence number for this operation.
    pub nonce: u64,
    /// Fee in base units.
    pub fee: u128,
    /// Sender's signature over the envelope.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
    /// Type-specific payload.
    pub asset: OperationAsset,
}

impl Operation {
    /// Builds an envelope and computes its id.
    pub fn new(
        op_type: OperationType,
        sender: PublicKey,
        nonce: u64,
        fee: u128,
        asset: OperationAsset,
    ) -> Self {
        let mut op = Self {
            id: [0u8; 32],
            op_type,
            sender,
            nonce,
            fee,
            signature: [0u8; 64],
            asset,
        };
        op.id = op.compute_id();
        op
    }

    /// Convenience constructor for a business registration envelope.
    pub fn business_registration(
        sender: PublicKey,
        nonce: u64,
        fee: u128,
        name: impl Into<String>,
        website: impl Into<String>,
    ) -> Self {
        Self::new(
            OperationType::BusinessRegistration,
            sender,
            nonce,
            fee,
            OperationAsset::BusinessRegistration(BusinessRegistrationAsset::new(name, website)),
        )
    }

    /// Attaches a signature. The id does not cover the signature.
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    /// Returns the business registration payload, if this envelope carries one.
    pub fn business_asset(&self) -> Option<&BusinessRegistrationAsset> {
        match &self.asset {
            OperationAsset::BusinessRegistration(asset) => Some(asset),
            OperationAsset::None => None,
        }
    }

    /// Business name carried by the envelope, if any.
    pub fn business_name(&self) -> Option<&str> {
        self.business_asset().map(|asset| asset.name.as_str())
    }

    /// Computes the operation id.
    pub fn compute_id(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.op_type.code().to_le_bytes());
        hasher.update(self.sender);
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(self.fee.to_le_bytes());
        if let OperationAsset::BusinessRegistration(asset) = &self.asset {
            hasher.update((asset.name.len() as u64).to_le_bytes());
            hasher.update(asset.name.as_bytes());
            hasher.update((asset.website.len() as u64).to_le_bytes());
            hasher.update(asset.website.as_bytes());
        }
        hasher.finalize().into()
    }

    /// Short hex form of the id for log fields.
    pub fn short_id(&self) -> String {
        hex::encode(&self.id[..4])
    }
}

/// Per-identity ledger state.
///
/// `business` is the uniqueness witness: an account holds zero or one
/// registration at any time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Identity key.
    pub identity: PublicKey,
    /// Spendable balance in base units.
    pub balance: u128,
    /// Last applied sequence number.
    pub nonce: u64,
    /// Active business registration.
    pub business: Option<BusinessRegistrationAsset>,
}

impl AccountRecord {
    /// Creates an account with no registration.
    pub fn new(identity: PublicKey, balance: u128) -> Self {
        Self {
            identity,
            balance,
            nonce: 0,
            business: None,
        }
    }

    pub fn business(&self) -> Option<&BusinessRegistrationAsset> {
        self.business.as_ref()
    }

    pub fn has_business(&self) -> bool {
        self.business.is_some()
    }

    /// Sets the business attribute, returning the previous value.
    pub fn set_business(
        &mut self,
        asset: BusinessRegistrationAsset,
    ) -> Option<BusinessRegistrationAsset> {
        self.business.replace(asset)
    }

    /// Removes the business attribute entirely.
    pub fn forget_business(&mut self) -> Option<BusinessRegistrationAsset> {
        self.business.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_id_is_deterministic() {
        let a = Operation::business_registration([1; 32], 1, 10, "Acme", "acme.example");
        let b = Operation::business_registration([1; 32], 1, 10, "Acme", "acme.example");
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, a.compute_id());
    }

    #[test]
    fn test_operation_id_covers_asset() {
        let a = Operation::business_registration([1; 32], 1, 10, "Acme", "acme.example");
        let b = Operation::business_registration([1; 32], 1, 10, "Acme", "acme.test");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_operation_id_ignores_signature() {
        let a = Operation::business_registration([1; 32], 1, 10, "Acme", "acme.example");
        let b = a.clone().with_signature([9; 64]);
        assert_eq!(a.id, b.id);
        assert_ne!(a.signature, b.signature);
    }

    #[test]
    fn test_business_asset_accessors() {
        let op = Operation::business_registration([1; 32], 1, 10, "Acme", "acme.example");
        assert_eq!(op.business_name(), Some("Acme"));

        let transfer = Operation::new(OperationType::Transfer, [1; 32], 1, 10, OperationAsset::None);
        assert!(transfer.business_asset().is_none());
    }

    #[test]
    fn test_forget_business_removes_attribute() {
        let mut account = AccountRecord::new([2; 32], 100);
        assert!(account.set_business(BusinessRegistrationAsset::new("Acme", "a.example")).is_none());
        assert!(account.has_business());

        let removed = account.forget_business();
        assert_eq!(removed.map(|a| a.name), Some("Acme".to_string()));
        assert!(!account.has_business());
    }

    #[test]
    fn test_operation_serde_roundtrip_keeps_signature() {
        let op = Operation::business_registration([3; 32], 4, 25, "Acme", "acme.example")
            .with_signature([0xAB; 64]);
        let json = serde_json::to_string(&op).unwrap();
        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
    }
}
