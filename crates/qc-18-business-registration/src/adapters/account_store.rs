//! In-memory account store with a business-name secondary index.

use crate::domain::{AccountRecord, PublicKey, StoreError};
use crate::ports::AccountStore;
use std::collections::HashMap;
use tracing::debug;

/// HashMap-backed [`AccountStore`].
///
/// `by_business_name` is only refreshed by `reindex`, mirroring a store
/// whose query indexes lag attribute writes until explicitly rebuilt.
///
/// A name may be held by several accounts (replay does not re-check
/// uniqueness). Holders are kept in indexing order and lookups return the
/// earliest one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryAccountStore {
    accounts: HashMap<PublicKey, AccountRecord>,
    by_business_name: HashMap<String, Vec<PublicKey>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an account and indexes it.
    pub fn insert(&mut self, account: AccountRecord) {
        let identity = account.identity;
        self.accounts.insert(identity, account);
        self.index_account(&identity);
    }

    pub fn get(&self, identity: &PublicKey) -> Option<&AccountRecord> {
        self.accounts.get(identity)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &AccountRecord> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Number of names currently indexed.
    pub fn indexed_names(&self) -> usize {
        self.by_business_name.len()
    }

    /// Identities indexed under `name`, earliest first.
    pub fn holders_of(&self, name: &str) -> &[PublicKey] {
        self.by_business_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn index_account(&mut self, identity: &PublicKey) {
        let current = self
            .accounts
            .get(identity)
            .and_then(AccountRecord::business)
            .map(|asset| asset.name.clone());

        // Drop this identity from names it no longer holds; other holders keep
        // their position.
        self.by_business_name.retain(|name, holders| {
            if current.as_deref() != Some(name.as_str()) {
                holders.retain(|holder| holder != identity);
            }
            !holders.is_empty()
        });

        let Some(name) = current else {
            return;
        };

        let holders = self.by_business_name.entry(name).or_default();
        if !holders.contains(identity) {
            if let Some(first) = holders.first() {
                debug!(
                    holder = %hex::encode(first),
                    current = %hex::encode(identity),
                    "Business name already held by another account"
                );
            }
            holders.push(*identity);
        }
    }
}

impl AccountStore for InMemoryAccountStore {
    fn find_by_identity(&self, identity: &PublicKey) -> Option<&AccountRecord> {
        self.accounts.get(identity)
    }

    fn find_by_identity_mut(&mut self, identity: &PublicKey) -> Option<&mut AccountRecord> {
        self.accounts.get_mut(identity)
    }

    fn find_by_business_name(&self, name: &str) -> Option<&AccountRecord> {
        self.holders_of(name)
            .first()
            .and_then(|identity| self.accounts.get(identity))
    }

    fn reindex(&mut self, identity: &PublicKey) -> Result<(), StoreError> {
        if !self.accounts.contains_key(identity) {
            return Err(StoreError::NotFound(*identity));
        }
        self.index_account(identity);
        Ok(())
    }
}
