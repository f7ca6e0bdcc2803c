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

//! End-to-end lifecycle tests against the scripted host.

mod common;

use common::MockHost;
use hookbridge_plugins::{
    HeaderScope, HostEvent, HostHook, Plugin, ProxyHost, SlotValue, TransactionManager, TxnHandle,
};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Plugin whose only observable behavior is its own destruction.
struct DropCounter(Arc<AtomicUsize>);

impl Plugin for DropCounter {}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn initialized_manager(host: &Arc<MockHost>) -> TransactionManager {
    let manager = TransactionManager::new(Arc::clone(host) as Arc<dyn ProxyHost>);
    manager.initialize();
    manager
}

#[test]
fn transaction_object_is_pointer_stable_across_events() {
    let host = MockHost::new();
    let manager = initialized_manager(&host);
    let txn = TxnHandle(1);

    let first = manager.registry().get_or_create(txn);
    host.fire(HostEvent::SendRequestHeaders, txn);
    host.fire(HostEvent::ReadResponseHeaders, txn);
    host.fire(HostEvent::SendResponseHeaders, txn);
    let second = manager.registry().get_or_create(txn);

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn distinct_handles_get_distinct_transactions() {
    let host = MockHost::new();
    let manager = initialized_manager(&host);

    let a = manager.registry().get_or_create(TxnHandle(1));
    let b = manager.registry().get_or_create(TxnHandle(2));

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a.handle(), TxnHandle(1));
    assert_eq!(b.handle(), TxnHandle(2));
}

#[test]
fn close_destroys_plugins_and_deallocates_the_transaction() {
    let host = MockHost::new();
    let manager = initialized_manager(&host);
    let txn = TxnHandle(3);
    let drops = Arc::new(AtomicUsize::new(0));

    let transaction = manager.registry().get_or_create(txn);
    for _ in 0..8 {
        transaction.add_plugin(Box::new(DropCounter(Arc::clone(&drops))));
    }
    let probe = Arc::downgrade(&transaction);
    drop(transaction);

    host.fire(HostEvent::TxnClose, txn);

    assert_eq!(drops.load(Ordering::SeqCst), 8);
    assert!(host.slot_is_empty(txn, manager.registry().slot_index()));
    // No owner remains; the object is gone.
    assert!(probe.upgrade().is_none());
}

#[test]
fn close_of_a_plugin_free_transaction_is_clean() {
    let host = MockHost::new();
    let manager = initialized_manager(&host);
    let txn = TxnHandle(4);

    drop(manager.registry().get_or_create(txn));
    host.fire(HostEvent::TxnClose, txn);

    assert!(host.slot_is_empty(txn, manager.registry().slot_index()));
}

#[test]
fn post_remap_resets_the_cached_client_url() {
    let host = MockHost::new();
    let manager = initialized_manager(&host);
    let txn = TxnHandle(5);
    host.set_url(txn, "http://origin.example/before");

    let transaction = manager.registry().get_or_create(txn);
    assert_eq!(
        transaction.client_request_url().unwrap(),
        "http://origin.example/before"
    );

    // The host rewrites the URL; the cached view deliberately lags.
    host.set_url(txn, "http://origin.example/after");
    assert_eq!(
        transaction.client_request_url().unwrap(),
        "http://origin.example/before"
    );

    let fetches = host.client_request_fetch_count();
    host.fire(HostEvent::PostRemap, txn);

    // Remap handling refetches the host-side request view and drops the
    // cached URL.
    assert!(host.client_request_fetch_count() > fetches);
    assert_eq!(
        transaction.client_request_url().unwrap(),
        "http://origin.example/after"
    );
}

#[test]
fn phase_events_initialize_their_header_views() {
    let host = MockHost::new();
    let manager = initialized_manager(&host);
    let txn = TxnHandle(6);
    let transaction = manager.registry().get_or_create(txn);

    assert!(transaction.view(HeaderScope::ServerRequest).is_none());
    host.fire(HostEvent::SendRequestHeaders, txn);
    assert!(transaction.view(HeaderScope::ServerRequest).is_some());

    assert!(transaction.view(HeaderScope::ServerResponse).is_none());
    host.fire(HostEvent::ReadResponseHeaders, txn);
    assert!(transaction.view(HeaderScope::ServerResponse).is_some());

    assert!(transaction.view(HeaderScope::ClientResponse).is_none());
    host.fire(HostEvent::SendResponseHeaders, txn);
    assert!(transaction.view(HeaderScope::ClientResponse).is_some());

    // A cache hit exposes both cached header sets at once.
    host.fire(HostEvent::ReadCacheHeaders, txn);
    assert!(transaction.view(HeaderScope::CachedRequest).is_some());
    assert!(transaction.view(HeaderScope::CachedResponse).is_some());
}

#[test]
fn every_routed_event_reenables_the_host() {
    let host = MockHost::new();
    let manager = initialized_manager(&host);
    let txn = TxnHandle(7);
    drop(manager.registry().get_or_create(txn));

    host.fire(HostEvent::PostRemap, txn);
    host.fire(HostEvent::SendRequestHeaders, txn);
    host.fire(HostEvent::ReadCacheHeaders, txn);
    host.fire(HostEvent::ReadResponseHeaders, txn);
    host.fire(HostEvent::SendResponseHeaders, txn);
    host.fire(HostEvent::TxnClose, txn);

    assert_eq!(host.reenable_count(), 6);
}

#[test]
fn initialize_registers_each_lifecycle_hook_exactly_once() {
    let host = MockHost::new();
    let manager = Arc::new(TransactionManager::new(
        Arc::clone(&host) as Arc<dyn ProxyHost>
    ));

    let threads: Vec<_> = (0..100)
        .map(|_| {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || manager.initialize())
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    assert_eq!(host.registration_count(), 6);
    for hook in [
        HostHook::PostRemap,
        HostHook::SendRequestHeaders,
        HostHook::ReadResponseHeaders,
        HostHook::SendResponseHeaders,
        HostHook::ReadCacheHeaders,
        HostHook::TxnClose,
    ] {
        assert_eq!(host.continuations_for(hook).len(), 1);
    }
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "host contract violation")]
fn foreign_slot_value_is_a_contract_violation() {
    let host = MockHost::new();
    let manager = initialized_manager(&host);
    let txn = TxnHandle(8);

    host.slot_set(
        txn,
        manager.registry().slot_index(),
        Some(Arc::new(42u32) as SlotValue),
    );
    manager.registry().get_or_create(txn);
}

#[cfg(not(debug_assertions))]
#[test]
fn foreign_slot_value_reads_as_no_transaction_and_is_left_alone() {
    let host = MockHost::new();
    let manager = initialized_manager(&host);
    let txn = TxnHandle(8);
    let slot = manager.registry().slot_index();

    host.slot_set(txn, slot, Some(Arc::new(42u32) as SlotValue));
    assert!(manager.registry().get(txn).is_none());

    // The fallback object is detached; the foreign value is never
    // overwritten.
    let detached = manager.registry().get_or_create(txn);
    assert_eq!(detached.handle(), txn);
    let value = host.slot_get(txn, slot).unwrap();
    assert_eq!(*value.downcast::<u32>().unwrap(), 42);

    // The close path must not clear another extension's data either.
    host.fire(HostEvent::TxnClose, txn);
    assert!(!host.slot_is_empty(txn, slot));
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "host contract violation")]
fn router_rejects_events_it_never_registered_for() {
    let host = MockHost::new();
    let _manager = initialized_manager(&host);

    let continuation = host
        .continuations_for(HostHook::TxnClose)
        .pop()
        .expect("router registered on close");
    continuation.handle_event(HostEvent::PreRemap, TxnHandle(9));
}

proptest! {
    #[test]
    fn teardown_drops_every_registered_plugin(count in 1usize..40) {
        let host = MockHost::new();
        let manager = initialized_manager(&host);
        let txn = TxnHandle(10);
        let drops = Arc::new(AtomicUsize::new(0));

        let transaction = manager.registry().get_or_create(txn);
        for _ in 0..count {
            transaction.add_plugin(Box::new(DropCounter(Arc::clone(&drops))));
        }
        drop(transaction);
        host.fire(HostEvent::TxnClose, txn);

        prop_assert_eq!(drops.load(Ordering::SeqCst), count);
        prop_assert!(host.slot_is_empty(txn, manager.registry().slot_index()));
    }
}
