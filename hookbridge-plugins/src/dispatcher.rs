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

//! Phase callback dispatch for per-transaction and global plugins.

use crate::diag;
use crate::plugin::{Plugin, TransactionPlugin};
use crate::registry::TransactionRegistry;
use crate::transaction::Transaction;
use hookbridge_core::{HostEvent, TxnHandle};

/// Run the phase callback selected by `event` against a per-transaction
/// plugin, under that plugin's mutex.
///
/// The same mutex guards destruction at transaction close, so a callback in
/// flight on one worker and the close path on another can never interleave
/// inside the plugin. A handle already destroyed by the close path is
/// skipped, as is a callback arriving after the transaction itself was
/// released: dispatch never creates transaction objects, so a released
/// handle stays released.
pub fn invoke_transaction_plugin(
    registry: &TransactionRegistry,
    plugin: &TransactionPlugin,
    txn: TxnHandle,
    event: HostEvent,
) {
    let transaction = match registry.get(txn) {
        Some(transaction) => transaction,
        None => {
            tracing::debug!(?txn, ?event, "skipping callback for released transaction");
            return;
        }
    };
    let invoked = plugin.with_plugin(|p| invoke(p, &transaction, event));
    if !invoked {
        tracing::debug!(?txn, ?event, "skipping callback for destroyed plugin");
    }
}

/// Run the phase callback selected by `event` against a global plugin.
///
/// No locking is applied: global plugins are shared across concurrently
/// executing transactions and synchronize their own state. Like the
/// per-transaction path, this never creates the transaction object; the
/// lifecycle router and registration glue own creation.
pub fn invoke_global_plugin(
    registry: &TransactionRegistry,
    plugin: &dyn Plugin,
    txn: TxnHandle,
    event: HostEvent,
) {
    let transaction = match registry.get(txn) {
        Some(transaction) => transaction,
        None => {
            tracing::debug!(?txn, ?event, "skipping callback for released transaction");
            return;
        }
    };
    invoke(plugin, &transaction, event);
}

fn invoke(plugin: &dyn Plugin, transaction: &Transaction, event: HostEvent) {
    match event {
        HostEvent::PreRemap => plugin.handle_read_request_headers_pre_remap(transaction),
        HostEvent::PostRemap => plugin.handle_read_request_headers_post_remap(transaction),
        HostEvent::SendRequestHeaders => plugin.handle_send_request_headers(transaction),
        HostEvent::ReadResponseHeaders => plugin.handle_read_response_headers(transaction),
        HostEvent::SendResponseHeaders => plugin.handle_send_response_headers(transaction),
        HostEvent::OsDns => plugin.handle_os_dns(transaction),
        HostEvent::ReadRequestHeaders => plugin.handle_read_request_headers(transaction),
        HostEvent::ReadCacheHeaders => plugin.handle_read_cache_headers(transaction),
        HostEvent::CacheLookupComplete => plugin.handle_cache_lookup_complete(transaction),
        HostEvent::SelectAlternate => plugin.handle_select_alternate(transaction),
        other => diag::contract_violation(
            "plugin dispatcher",
            format_args!("no phase callback for event {:?}", other),
        ),
    }
}
