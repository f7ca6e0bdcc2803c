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

//! The proxy host capability surface.
//!
//! Everything the binding consumes from the host runtime is expressed here
//! as a trait so embedders can plug in a real proxy engine and the test
//! suite can plug in a scripted one. The host is treated as an opaque event
//! source and header store: the binding never parses HTTP or touches
//! connections.

use crate::error::HostError;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;

/// Highest slot index hosts conventionally expose.
pub const DEFAULT_MAX_SLOT_INDEX: usize = 15;

/// Opaque identifier for one in-flight request/response exchange.
///
/// Supplied by the host and valid until the host fires
/// [`HostEvent::TxnClose`] for it. The binding never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxnHandle(pub u64);

/// Opaque token for one of the host's header stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderHandle(pub u64);

/// Value stored in a host transaction slot. The host treats it as a black
/// box; the binding downcasts it back to its own types on read.
pub type SlotValue = Arc<dyn Any + Send + Sync>;

/// Which of the host's header stores a view refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderScope {
    ClientRequest,
    ServerRequest,
    ServerResponse,
    ClientResponse,
    CachedRequest,
    CachedResponse,
}

/// Host-native hook identifiers: the points in transaction processing where
/// continuations can be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostHook {
    ReadRequestHeaders,
    PreRemap,
    PostRemap,
    OsDns,
    SelectAlternate,
    SendRequestHeaders,
    ReadCacheHeaders,
    CacheLookupComplete,
    ReadResponseHeaders,
    SendResponseHeaders,
    RequestTransform,
    ResponseTransform,
    TxnClose,
}

/// Host-native event codes delivered to continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    ReadRequestHeaders,
    PreRemap,
    PostRemap,
    OsDns,
    SelectAlternate,
    SendRequestHeaders,
    ReadCacheHeaders,
    CacheLookupComplete,
    ReadResponseHeaders,
    SendResponseHeaders,
    TxnClose,
}

/// Signal handed back to the host when a callback completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReenableStatus {
    /// Resume normal processing.
    Continue,
    /// Abort the transaction through the host's error handling.
    Error,
}

/// The host's callback registration unit, bound to one or more hooks.
pub trait Continuation: Send + Sync {
    /// Handle one event for one transaction.
    ///
    /// The host delivers a given transaction's events sequentially, but may
    /// run different transactions' callbacks concurrently on different
    /// worker threads.
    fn handle_event(&self, event: HostEvent, txn: TxnHandle);
}

/// Capability interface onto the proxy host.
///
/// Per-transaction storage is a fixed-size array of opaque slots
/// addressable by a small integer index, not an owning map. Slot reads and
/// writes never fail (a host contract), which is why they carry no error
/// channel.
pub trait ProxyHost: Send + Sync {
    /// Read a per-transaction storage slot.
    fn slot_get(&self, txn: TxnHandle, index: usize) -> Option<SlotValue>;

    /// Write (or clear, with `None`) a per-transaction storage slot.
    fn slot_set(&self, txn: TxnHandle, index: usize, value: Option<SlotValue>);

    /// Highest usable slot index.
    fn max_slot_index(&self) -> usize {
        DEFAULT_MAX_SLOT_INDEX
    }

    /// Register a continuation on a hook point.
    fn register_hook(&self, hook: HostHook, continuation: Arc<dyn Continuation>);

    /// Return control to the host after a callback.
    fn reenable(&self, txn: TxnHandle, status: ReenableStatus);

    /// Fetch a header view.
    ///
    /// Fetching [`HeaderScope::ClientRequest`] also forces the host to
    /// refresh its internal request view, so a fetch after remap discards
    /// any stale pre-remap state.
    fn header_view(&self, txn: TxnHandle, scope: HeaderScope) -> Result<HeaderHandle, HostError>;

    /// Effective client request URL, as the host currently sees it.
    fn client_request_url(&self, txn: TxnHandle) -> Result<String, HostError>;

    /// Protocol version of a header as a `(major, minor)` pair.
    fn http_version(&self, header: HeaderHandle) -> Result<(u32, u32), HostError>;
}
