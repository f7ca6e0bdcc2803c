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

//! Leaf utilities: reader draining and HTTP version mapping.

use hookbridge_core::{BufferReader, HeaderHandle, ProxyHost};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the preallocation taken from a host-reported available
/// count. The count is a hint, not a promise; the buffer still grows to
/// whatever the blocks actually hold.
const DRAIN_RESERVE_LIMIT: usize = 1 << 20;

/// Drain every pending block from a host buffered reader into one
/// contiguous byte buffer, then acknowledge the consumed count so the host
/// reclaims the memory.
///
/// A failed availability query is logged and yields an empty buffer; it
/// never propagates to the caller.
pub fn drain_reader(reader: &mut dyn BufferReader) -> Vec<u8> {
    let avail = match reader.available() {
        Ok(avail) => avail,
        Err(err) => {
            tracing::error!(%err, "buffered reader availability query failed");
            return Vec::new();
        }
    };

    let reserve = usize::try_from(avail)
        .map(|n| n.min(DRAIN_RESERVE_LIMIT))
        .unwrap_or(DRAIN_RESERVE_LIMIT);
    let mut bytes = Vec::with_capacity(reserve);
    let mut consumed = 0u64;
    if avail > 0 {
        while let Some(block) = reader.next_block() {
            consumed += block.len() as u64;
            bytes.extend_from_slice(block);
        }
    }
    reader.consume(consumed);
    bytes
}

/// HTTP protocol versions the host reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpVersion {
    #[serde(rename = "0.9")]
    V0_9,
    #[serde(rename = "1.0")]
    V1_0,
    #[serde(rename = "1.1")]
    V1_1,
    #[serde(rename = "unknown")]
    Unknown,
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpVersion::V0_9 => "0.9",
            HttpVersion::V1_0 => "1.0",
            HttpVersion::V1_1 => "1.1",
            HttpVersion::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Protocol version of a header.
///
/// Unrecognized `(major, minor)` pairs and failed queries are logged and
/// mapped to [`HttpVersion::Unknown`].
pub fn http_version_of(host: &dyn ProxyHost, header: HeaderHandle) -> HttpVersion {
    match host.http_version(header) {
        Ok((0, 0)) => HttpVersion::V0_9,
        Ok((1, 0)) => HttpVersion::V1_0,
        Ok((1, 1)) => HttpVersion::V1_1,
        Ok((major, minor)) => {
            tracing::error!(major, minor, "unrecognized HTTP version");
            HttpVersion::Unknown
        }
        Err(err) => {
            tracing::error!(header = ?header, %err, "HTTP version query failed");
            HttpVersion::Unknown
        }
    }
}
