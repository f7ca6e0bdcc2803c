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

//! Hookbridge Plugins
//!
//! Object binding between a hook-driven proxy host and plugin authors. The
//! host fires lifecycle events against registered continuations; this crate
//! maps each opaque transaction handle to a long-lived per-transaction
//! object, routes the six lifecycle phases, dispatches phase callbacks to
//! plugins under per-plugin locks, and releases everything exactly once at
//! transaction close.
//!
//! # Architecture
//!
//! - [`plugin::Plugin`] – ten phase callbacks, all defaulting to no-ops
//! - [`transaction::Transaction`] – per-transaction state wrapper with
//!   lazily initialized header views
//! - [`registry::TransactionRegistry`] – slot-backed handle-to-object
//!   binding, pointer-stable until close
//! - [`router::TransactionManager`] – one-shot hook registration and the
//!   lifecycle continuation, including teardown
//! - [`dispatcher`] – event-to-callback selection, locked for
//!   per-transaction plugins, lock-free for globals
//! - [`hooks`] – internal hook vocabulary and host-native translation
//! - [`util`] – reader draining and HTTP version mapping
//!
//! # Concurrency model
//!
//! The host delivers a single transaction's events sequentially, but may run
//! different transactions on different worker threads. The one legitimate
//! race, a phase callback in flight against a per-transaction plugin while
//! the close event destroys it, is serialized by the plugin handle's own
//! mutex, which guards both the callback and the destruction.

pub mod config;
mod diag;
pub mod dispatcher;
pub mod error;
pub mod hooks;
pub mod plugin;
pub mod registry;
pub mod router;
pub mod transaction;
pub mod util;

// Re-exports
pub use config::BridgeConfig;
pub use dispatcher::{invoke_global_plugin, invoke_transaction_plugin};
pub use error::{PluginError, PluginResult};
pub use hooks::{host_hook, transform_hook, HookType, TransformType};
pub use plugin::{GlobalPlugin, Plugin, TransactionPlugin};
pub use registry::TransactionRegistry;
pub use router::TransactionManager;
pub use transaction::Transaction;
pub use util::{drain_reader, http_version_of, HttpVersion};

// Host-facing types that appear in this crate's signatures.
pub use hookbridge_core::{
    BufferReader, Continuation, HeaderHandle, HeaderScope, HostError, HostEvent, HostHook,
    ProxyHost, ReenableStatus, SlotValue, TxnHandle,
};
