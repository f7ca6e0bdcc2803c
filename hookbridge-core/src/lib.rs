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

//! Hookbridge Core
//!
//! Opaque handle types and capability traits describing the hook-driven
//! proxy host that `hookbridge-plugins` binds to. The host owns connections,
//! buffers, header stores, and the event schedule; this crate only names
//! what the binding consumes from it:
//!
//! - [`host::ProxyHost`] – indexed per-transaction slot storage, hook
//!   registration, continuation reenabling, header access
//! - [`host::Continuation`] – the host's callback registration unit
//! - [`io::BufferReader`] – the host's chained buffer-reader primitives
//! - [`error::HostError`] – recoverable host query failures

pub mod error;
pub mod host;
pub mod io;

pub use error::{HostError, HostResult};
pub use host::{
    Continuation, HeaderHandle, HeaderScope, HostEvent, HostHook, ProxyHost, ReenableStatus,
    SlotValue, TxnHandle, DEFAULT_MAX_SLOT_INDEX,
};
pub use io::BufferReader;
