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

//! Host error types.

use crate::host::{HeaderHandle, HeaderScope, TxnHandle};
use thiserror::Error;

/// Result type for host queries.
pub type HostResult<T> = Result<T, HostError>;

/// Recoverable failures reported by the host.
///
/// These are runtime conditions, not programming errors: callers log them
/// and fall back to a safe default. Slot storage is absent here: the slot
/// mechanism never failing is a host contract, and a breach of it is
/// handled as a contract violation rather than an error value.
#[derive(Debug, Error)]
pub enum HostError {
    // Header errors
    #[error("no {scope:?} header view for transaction {txn:?}")]
    HeaderUnavailable { txn: TxnHandle, scope: HeaderScope },

    #[error("client request URL unavailable for transaction {txn:?}")]
    UrlUnavailable { txn: TxnHandle },

    // Buffer errors
    #[error("buffer availability query failed with host code {0}")]
    BufferUnavailable(i32),

    // Version errors
    #[error("HTTP version query failed for header {0:?}")]
    VersionUnavailable(HeaderHandle),
}
