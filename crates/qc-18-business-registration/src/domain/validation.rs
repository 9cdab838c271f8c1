//! Well-formedness rules for registration payloads.

use super::entities::{BusinessRegistrationAsset, Operation, OperationType};
use super::errors::HandlerError;

/// Length limits applied to a registration payload, in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetRules {
    pub max_name_length: usize,
    pub max_website_length: usize,
}

impl Default for AssetRules {
    fn default() -> Self {
        Self {
            max_name_length: 128,
            max_website_length: 256,
        }
    }
}

/// Rejects envelopes routed to this handler with another type tag.
pub fn ensure_registration_type(op: &Operation) -> Result<(), HandlerError> {
    if op.op_type != OperationType::BusinessRegistration {
        return Err(HandlerError::WrongOperationType {
            expected: OperationType::BusinessRegistration,
            actual: op.op_type,
        });
    }
    Ok(())
}

/// Extracts the payload and checks it is well-formed.
///
/// Both fields must be non-empty. Names are not trimmed or case-folded.
pub fn validate_asset<'a>(
    op: &'a Operation,
    rules: &AssetRules,
) -> Result<&'a BusinessRegistrationAsset, HandlerError> {
    let asset = op.business_asset().ok_or_else(|| HandlerError::MalformedAsset {
        reason: "business registration asset is missing".into(),
    })?;

    if asset.name.is_empty() {
        return Err(malformed("name is empty"));
    }
    if asset.website.is_empty() {
        return Err(malformed("website is empty"));
    }

    let name_len = asset.name.chars().count();
    if name_len > rules.max_name_length {
        return Err(malformed(format!(
            "name has {} characters, maximum is {}",
            name_len, rules.max_name_length
        )));
    }
    let website_len = asset.website.chars().count();
    if website_len > rules.max_website_length {
        return Err(malformed(format!(
            "website has {} characters, maximum is {}",
            website_len, rules.max_website_length
        )));
    }

    Ok(asset)
}

fn malformed(reason: impl Into<String>) -> HandlerError {
    HandlerError::MalformedAsset {
        reason: reason.into(),
    }
}
