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

//! Lifecycle event routing and one-shot hook registration.

use crate::config::BridgeConfig;
use crate::diag;
use crate::error::PluginResult;
use crate::registry::TransactionRegistry;
use hookbridge_core::{
    Continuation, HeaderScope, HostEvent, HostHook, ProxyHost, ReenableStatus, TxnHandle,
};
use std::sync::{Arc, Once};

/// Hooks the lifecycle router registers on. The close hook must always be
/// present so teardown runs for every transaction.
const LIFECYCLE_HOOKS: [HostHook; 6] = [
    HostHook::PostRemap,
    HostHook::SendRequestHeaders,
    HostHook::ReadResponseHeaders,
    HostHook::SendResponseHeaders,
    HostHook::ReadCacheHeaders,
    HostHook::TxnClose,
];

/// Continuation driving per-transaction bookkeeping across the six
/// lifecycle phases, including teardown at transaction close.
struct LifecycleRouter {
    host: Arc<dyn ProxyHost>,
    registry: Arc<TransactionRegistry>,
    trace_events: bool,
}

impl LifecycleRouter {
    fn route(&self, event: HostEvent, txn: TxnHandle) {
        let transaction = self.registry.get_or_create(txn);
        if self.trace_events {
            tracing::debug!(?event, ?txn, "routing lifecycle event");
        }

        match event {
            HostEvent::PostRemap => {
                transaction.reset_client_request_url();
                // Force the host to refresh its internal request view so no
                // stale pre-remap state survives.
                if let Err(err) = self.host.header_view(txn, HeaderScope::ClientRequest) {
                    tracing::error!(?txn, %err, "client request refresh failed after remap");
                }
            }
            HostEvent::SendRequestHeaders => transaction.init_view(HeaderScope::ServerRequest),
            HostEvent::ReadResponseHeaders => transaction.init_view(HeaderScope::ServerResponse),
            HostEvent::SendResponseHeaders => transaction.init_view(HeaderScope::ClientResponse),
            HostEvent::ReadCacheHeaders => {
                // A cache hit exposes both header sets at once.
                transaction.init_view(HeaderScope::CachedRequest);
                transaction.init_view(HeaderScope::CachedResponse);
            }
            HostEvent::TxnClose => {
                for plugin in transaction.take_plugins() {
                    if plugin.destroy() {
                        tracing::debug!(?txn, "destroyed transaction plugin");
                    }
                }
                drop(transaction);
                // Last owning reference; the object deallocates here.
                drop(self.registry.release(txn));
            }
            other => diag::contract_violation(
                "lifecycle router",
                format_args!("received event {:?} it never registered for", other),
            ),
        }
    }
}

impl Continuation for LifecycleRouter {
    fn handle_event(&self, event: HostEvent, txn: TxnHandle) {
        self.route(event, txn);
        // The host must always get its continue signal back.
        self.host.reenable(txn, ReenableStatus::Continue);
    }
}

/// Entry point wiring the lifecycle router to a host.
///
/// A process embeds one manager per host. [`initialize`] is an idempotent
/// one-shot: however many threads race it, the router lands on each
/// lifecycle hook exactly once.
///
/// [`initialize`]: TransactionManager::initialize
pub struct TransactionManager {
    host: Arc<dyn ProxyHost>,
    registry: Arc<TransactionRegistry>,
    config: BridgeConfig,
    init: Once,
}

impl TransactionManager {
    /// Create a manager with the default configuration.
    pub fn new(host: Arc<dyn ProxyHost>) -> Self {
        let registry = Arc::new(TransactionRegistry::new(Arc::clone(&host)));
        Self {
            host,
            registry,
            config: BridgeConfig::default(),
            init: Once::new(),
        }
    }

    /// Create a manager with an explicit configuration.
    pub fn with_config(host: Arc<dyn ProxyHost>, config: BridgeConfig) -> PluginResult<Self> {
        let registry = Arc::new(TransactionRegistry::with_config(Arc::clone(&host), &config)?);
        Ok(Self {
            host,
            registry,
            config,
            init: Once::new(),
        })
    }

    /// Register the lifecycle router on its six hooks.
    ///
    /// Callers may race; registration happens exactly once per manager.
    pub fn initialize(&self) {
        self.init.call_once(|| {
            let router = Arc::new(LifecycleRouter {
                host: Arc::clone(&self.host),
                registry: Arc::clone(&self.registry),
                trace_events: self.config.trace_events,
            });
            for hook in LIFECYCLE_HOOKS {
                self.host
                    .register_hook(hook, Arc::clone(&router) as Arc<dyn Continuation>);
            }
            tracing::debug!("transaction lifecycle hooks registered");
        });
    }

    /// The registry binding handles to transaction objects.
    pub fn registry(&self) -> &Arc<TransactionRegistry> {
        &self.registry
    }

    /// The host this manager is wired to.
    pub fn host(&self) -> &Arc<dyn ProxyHost> {
        &self.host
    }
}
