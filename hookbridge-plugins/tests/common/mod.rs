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

//! Scripted proxy host backing the integration suite.

#![allow(dead_code)]

use dashmap::DashMap;
use hookbridge_core::{
    Continuation, HeaderHandle, HeaderScope, HostError, HostEvent, HostHook, ProxyHost,
    ReenableStatus, SlotValue, TxnHandle,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory host with scripted header state and counters for the
/// interactions the binding is expected to perform.
#[derive(Default)]
pub struct MockHost {
    slots: DashMap<(u64, usize), SlotValue>,
    hooks: DashMap<HostHook, Vec<Arc<dyn Continuation>>>,
    urls: DashMap<u64, String>,
    versions: DashMap<u64, (u32, u32)>,
    registrations: AtomicUsize,
    reenables: AtomicUsize,
    client_request_fetches: AtomicUsize,
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_url(&self, txn: TxnHandle, url: &str) {
        self.urls.insert(txn.0, url.to_string());
    }

    pub fn set_version(&self, header: HeaderHandle, version: (u32, u32)) {
        self.versions.insert(header.0, version);
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    pub fn reenable_count(&self) -> usize {
        self.reenables.load(Ordering::SeqCst)
    }

    pub fn client_request_fetch_count(&self) -> usize {
        self.client_request_fetches.load(Ordering::SeqCst)
    }

    pub fn slot_is_empty(&self, txn: TxnHandle, index: usize) -> bool {
        !self.slots.contains_key(&(txn.0, index))
    }

    pub fn continuations_for(&self, hook: HostHook) -> Vec<Arc<dyn Continuation>> {
        self.hooks
            .get(&hook)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Deliver `event` to every continuation registered on its hook, the
    /// way the host's event loop would.
    pub fn fire(&self, event: HostEvent, txn: TxnHandle) {
        for continuation in self.continuations_for(hook_for_event(event)) {
            continuation.handle_event(event, txn);
        }
    }
}

impl ProxyHost for MockHost {
    fn slot_get(&self, txn: TxnHandle, index: usize) -> Option<SlotValue> {
        self.slots
            .get(&(txn.0, index))
            .map(|entry| Arc::clone(entry.value()))
    }

    fn slot_set(&self, txn: TxnHandle, index: usize, value: Option<SlotValue>) {
        match value {
            Some(value) => {
                self.slots.insert((txn.0, index), value);
            }
            None => {
                self.slots.remove(&(txn.0, index));
            }
        }
    }

    fn register_hook(&self, hook: HostHook, continuation: Arc<dyn Continuation>) {
        self.hooks.entry(hook).or_default().push(continuation);
        self.registrations.fetch_add(1, Ordering::SeqCst);
    }

    fn reenable(&self, _txn: TxnHandle, _status: ReenableStatus) {
        self.reenables.fetch_add(1, Ordering::SeqCst);
    }

    fn header_view(&self, txn: TxnHandle, scope: HeaderScope) -> Result<HeaderHandle, HostError> {
        if scope == HeaderScope::ClientRequest {
            self.client_request_fetches.fetch_add(1, Ordering::SeqCst);
        }
        Ok(HeaderHandle(txn.0 * 100 + scope_code(scope)))
    }

    fn client_request_url(&self, txn: TxnHandle) -> Result<String, HostError> {
        self.urls
            .get(&txn.0)
            .map(|entry| entry.clone())
            .ok_or(HostError::UrlUnavailable { txn })
    }

    fn http_version(&self, header: HeaderHandle) -> Result<(u32, u32), HostError> {
        self.versions
            .get(&header.0)
            .map(|entry| *entry)
            .ok_or(HostError::VersionUnavailable(header))
    }
}

/// Hook a native event is delivered on.
pub fn hook_for_event(event: HostEvent) -> HostHook {
    match event {
        HostEvent::ReadRequestHeaders => HostHook::ReadRequestHeaders,
        HostEvent::PreRemap => HostHook::PreRemap,
        HostEvent::PostRemap => HostHook::PostRemap,
        HostEvent::OsDns => HostHook::OsDns,
        HostEvent::SelectAlternate => HostHook::SelectAlternate,
        HostEvent::SendRequestHeaders => HostHook::SendRequestHeaders,
        HostEvent::ReadCacheHeaders => HostHook::ReadCacheHeaders,
        HostEvent::CacheLookupComplete => HostHook::CacheLookupComplete,
        HostEvent::ReadResponseHeaders => HostHook::ReadResponseHeaders,
        HostEvent::SendResponseHeaders => HostHook::SendResponseHeaders,
        HostEvent::TxnClose => HostHook::TxnClose,
    }
}

fn scope_code(scope: HeaderScope) -> u64 {
    match scope {
        HeaderScope::ClientRequest => 0,
        HeaderScope::ServerRequest => 1,
        HeaderScope::ServerResponse => 2,
        HeaderScope::ClientResponse => 3,
        HeaderScope::CachedRequest => 4,
        HeaderScope::CachedResponse => 5,
    }
}
