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

//! Plugin trait and per-transaction plugin handles.

use crate::transaction::Transaction;
use parking_lot::Mutex;
use std::sync::Arc;

/// A proxy plugin.
///
/// One callback per lifecycle phase, all defaulting to no-ops, so a plugin
/// implements only the phases it registers for. Per-transaction plugins
/// never see two callbacks concurrently; the dispatcher holds the plugin's
/// mutex around each one. Global plugins are shared across concurrently
/// executing transactions and must synchronize their own state.
pub trait Plugin: Send + Sync {
    fn handle_read_request_headers_pre_remap(&self, _transaction: &Transaction) {}
    fn handle_read_request_headers_post_remap(&self, _transaction: &Transaction) {}
    fn handle_send_request_headers(&self, _transaction: &Transaction) {}
    fn handle_read_response_headers(&self, _transaction: &Transaction) {}
    fn handle_send_response_headers(&self, _transaction: &Transaction) {}
    fn handle_os_dns(&self, _transaction: &Transaction) {}
    fn handle_read_request_headers(&self, _transaction: &Transaction) {}
    fn handle_read_cache_headers(&self, _transaction: &Transaction) {}
    fn handle_cache_lookup_complete(&self, _transaction: &Transaction) {}
    fn handle_select_alternate(&self, _transaction: &Transaction) {}
}

/// A plugin instance shared across all transactions.
///
/// Outlives any single transaction; never destroyed by this layer.
pub type GlobalPlugin = Arc<dyn Plugin>;

/// Handle for a plugin whose lifetime is scoped to one transaction.
///
/// The handle owns the only mutex that ever guards the plugin: the
/// dispatcher takes it around each phase callback and the lifecycle router
/// takes it around destruction, so a callback in flight on one worker and
/// the close event on another can never interleave inside the plugin.
pub struct TransactionPlugin {
    // `None` once the close path has destroyed the plugin.
    slot: Mutex<Option<Box<dyn Plugin>>>,
}

impl TransactionPlugin {
    pub(crate) fn new(plugin: Box<dyn Plugin>) -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(Some(plugin)),
        })
    }

    /// Run `f` against the plugin under its mutex.
    ///
    /// Returns `false` without calling `f` if the close path has already
    /// destroyed the plugin.
    pub fn with_plugin(&self, f: impl FnOnce(&dyn Plugin)) -> bool {
        let guard = self.slot.lock();
        match guard.as_ref() {
            Some(plugin) => {
                f(plugin.as_ref());
                true
            }
            None => false,
        }
    }

    /// Destroy the plugin under its mutex. Idempotent.
    ///
    /// Only the lifecycle router's close path calls this; the lock scope
    /// covers exactly the single drop.
    pub(crate) fn destroy(&self) -> bool {
        let mut guard = self.slot.lock();
        let plugin = guard.take();
        let was_live = plugin.is_some();
        // The plugin drops while its mutex is still held.
        drop(plugin);
        was_live
    }

    /// Whether the close path has already destroyed the plugin.
    pub fn is_destroyed(&self) -> bool {
        self.slot.lock().is_none()
    }
}
