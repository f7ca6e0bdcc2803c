// Copyright 2025 Hookbridge Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Slot-backed transaction registry.

use crate::config::BridgeConfig;
use crate::diag;
use crate::error::PluginResult;
use crate::transaction::Transaction;
use hookbridge_core::{ProxyHost, SlotValue, TxnHandle};
use std::sync::Arc;

/// Maps host transaction handles to their unique [`Transaction`] objects.
///
/// The host offers a fixed-size array of opaque per-transaction slots
/// rather than an owning map, so the registry reserves one index (by
/// convention the last usable one, minimizing collision with other
/// extensions sharing the host) and keeps the owning reference there. No
/// other subsystem may touch that index.
pub struct TransactionRegistry {
    host: Arc<dyn ProxyHost>,
    slot_index: usize,
}

impl TransactionRegistry {
    /// Create a registry reserving the host's last usable slot.
    pub fn new(host: Arc<dyn ProxyHost>) -> Self {
        let slot_index = host.max_slot_index();
        Self { host, slot_index }
    }

    /// Create a registry honoring a configured slot override.
    pub fn with_config(host: Arc<dyn ProxyHost>, config: &BridgeConfig) -> PluginResult<Self> {
        config.validate(host.max_slot_index())?;
        let slot_index = config.slot_index.unwrap_or_else(|| host.max_slot_index());
        Ok(Self { host, slot_index })
    }

    /// The reserved slot index this registry owns.
    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    /// The transaction object for `txn`, if the handle is currently bound.
    ///
    /// Never allocates. A handle whose close event has already released the
    /// object stays unbound, so dispatch paths that use this cannot
    /// resurrect a released transaction. A foreign value in the reserved
    /// slot is a contract violation and reads as "no transaction"; the
    /// value is left untouched.
    pub fn get(&self, txn: TxnHandle) -> Option<Arc<Transaction>> {
        let value = self.host.slot_get(txn, self.slot_index)?;
        match value.downcast::<Transaction>() {
            Ok(transaction) => Some(transaction),
            Err(_) => {
                diag::contract_violation(
                    "transaction registry",
                    format_args!(
                        "slot {} of transaction {:?} holds a foreign value",
                        self.slot_index, txn
                    ),
                );
                None
            }
        }
    }

    /// The unique transaction object for `txn`, created on first access.
    ///
    /// Pointer-stable: every call for a live handle returns the same object
    /// until the close event releases it. First access allocates and writes
    /// the slot; later accesses are pure reads. The host delivers a
    /// transaction's events sequentially, so create and read never race.
    pub fn get_or_create(&self, txn: TxnHandle) -> Arc<Transaction> {
        if let Some(value) = self.host.slot_get(txn, self.slot_index) {
            return match value.downcast::<Transaction>() {
                Ok(transaction) => transaction,
                Err(_) => {
                    diag::contract_violation(
                        "transaction registry",
                        format_args!(
                            "slot {} of transaction {:?} holds a foreign value",
                            self.slot_index, txn
                        ),
                    );
                    // The foreign value stays where it is; hand back a
                    // detached object so the caller can still run.
                    Arc::new(Transaction::new(Arc::clone(&self.host), txn))
                }
            };
        }

        let transaction = Arc::new(Transaction::new(Arc::clone(&self.host), txn));
        tracing::debug!(txn = ?txn, slot = self.slot_index, "created transaction object");
        self.host.slot_set(
            txn,
            self.slot_index,
            Some(Arc::clone(&transaction) as SlotValue),
        );
        transaction
    }

    /// Remove the owning slot reference and hand it back.
    ///
    /// Only the lifecycle router's close path calls this. The transaction
    /// deallocates when the returned reference (and any transient callback
    /// clones) drop; no other code path ever releases a transaction.
    pub(crate) fn release(&self, txn: TxnHandle) -> Option<Arc<Transaction>> {
        let value = self.host.slot_get(txn, self.slot_index)?;
        match value.downcast::<Transaction>() {
            Ok(transaction) => {
                self.host.slot_set(txn, self.slot_index, None);
                Some(transaction)
            }
            Err(_) => {
                // Not ours to clear.
                diag::contract_violation(
                    "transaction registry",
                    format_args!(
                        "slot {} of transaction {:?} held a foreign value at close",
                        self.slot_index, txn
                    ),
                );
                None
            }
        }
    }
}
