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

//! Per-transaction state wrapper.

use crate::plugin::{Plugin, TransactionPlugin};
use hookbridge_core::{HeaderHandle, HeaderScope, HostError, ProxyHost, TxnHandle};
use parking_lot::Mutex;
use std::sync::Arc;

/// Lazily initialized per-phase header views.
#[derive(Default)]
struct HeaderViews {
    server_request: Option<HeaderHandle>,
    server_response: Option<HeaderHandle>,
    client_response: Option<HeaderHandle>,
    cached_request: Option<HeaderHandle>,
    cached_response: Option<HeaderHandle>,
}

impl HeaderViews {
    fn slot(&mut self, scope: HeaderScope) -> Option<&mut Option<HeaderHandle>> {
        match scope {
            HeaderScope::ServerRequest => Some(&mut self.server_request),
            HeaderScope::ServerResponse => Some(&mut self.server_response),
            HeaderScope::ClientResponse => Some(&mut self.client_response),
            HeaderScope::CachedRequest => Some(&mut self.cached_request),
            HeaderScope::CachedResponse => Some(&mut self.cached_response),
            // The client request view lives host-side; only its URL is
            // cached here.
            HeaderScope::ClientRequest => None,
        }
    }
}

/// One in-flight request/response exchange.
///
/// Exactly one `Transaction` exists per [`TxnHandle`]: the registry creates
/// it on first lookup, keeps the owning reference in the reserved host
/// slot, and the lifecycle router drops it at transaction close. Plugin
/// callbacks receive it by reference and must not retain it beyond the
/// callback.
pub struct Transaction {
    handle: TxnHandle,
    host: Arc<dyn ProxyHost>,
    // Client request URL as currently seen by the host; reset on post-remap
    // so the cached view never outlives a remap.
    client_url: Mutex<Option<String>>,
    views: Mutex<HeaderViews>,
    plugins: Mutex<Vec<Arc<TransactionPlugin>>>,
}

impl Transaction {
    pub(crate) fn new(host: Arc<dyn ProxyHost>, handle: TxnHandle) -> Self {
        Self {
            handle,
            host,
            client_url: Mutex::new(None),
            views: Mutex::new(HeaderViews::default()),
            plugins: Mutex::new(Vec::new()),
        }
    }

    /// The host handle this object wraps.
    pub fn handle(&self) -> TxnHandle {
        self.handle
    }

    /// The host this transaction lives on.
    pub fn host(&self) -> &Arc<dyn ProxyHost> {
        &self.host
    }

    /// Effective client request URL, cached until the next remap.
    pub fn client_request_url(&self) -> Result<String, HostError> {
        let mut cached = self.client_url.lock();
        if let Some(url) = cached.as_ref() {
            return Ok(url.clone());
        }
        let url = self.host.client_request_url(self.handle)?;
        *cached = Some(url.clone());
        Ok(url)
    }

    /// Drop the cached URL view. The lifecycle router calls this on
    /// post-remap.
    pub(crate) fn reset_client_request_url(&self) {
        self.client_url.lock().take();
    }

    /// Initialize a header view from the host's current state, keeping an
    /// existing view if the phase already ran.
    pub(crate) fn init_view(&self, scope: HeaderScope) {
        match self.host.header_view(self.handle, scope) {
            Ok(header) => {
                let mut views = self.views.lock();
                if let Some(slot) = views.slot(scope) {
                    slot.get_or_insert(header);
                }
            }
            Err(err) => {
                tracing::error!(txn = ?self.handle, ?scope, %err, "could not initialize header view");
            }
        }
    }

    /// Header view for `scope`, if the matching phase has run.
    pub fn view(&self, scope: HeaderScope) -> Option<HeaderHandle> {
        let mut views = self.views.lock();
        views.slot(scope).and_then(|slot| *slot)
    }

    /// Register a plugin whose lifetime is scoped to this transaction.
    ///
    /// The returned handle is what registration glue wires to dispatch; the
    /// plugin itself is destroyed by the close path.
    pub fn add_plugin(&self, plugin: Box<dyn Plugin>) -> Arc<TransactionPlugin> {
        let handle = TransactionPlugin::new(plugin);
        self.plugins.lock().push(Arc::clone(&handle));
        handle
    }

    /// Plugin handles registered so far.
    pub fn plugins(&self) -> Vec<Arc<TransactionPlugin>> {
        self.plugins.lock().clone()
    }

    /// Drain the plugin list for teardown. Close path only.
    pub(crate) fn take_plugins(&self) -> Vec<Arc<TransactionPlugin>> {
        std::mem::take(&mut *self.plugins.lock())
    }
}
