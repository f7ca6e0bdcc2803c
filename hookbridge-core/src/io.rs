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

//! Buffered-reader primitives exposed by the host.

use crate::error::HostError;

/// One end of a host-owned chain of buffer blocks.
///
/// Readers hand out unread data block by block, in order. Once a caller has
/// copied what it needs it must acknowledge the byte count via
/// [`consume`](BufferReader::consume) so the host can reclaim the memory.
pub trait BufferReader {
    /// Total unread bytes, or an error if the reader is invalid.
    fn available(&self) -> Result<u64, HostError>;

    /// Next contiguous block of unread data, `None` once exhausted.
    /// Blocks may be empty.
    fn next_block(&mut self) -> Option<&[u8]>;

    /// Acknowledge `count` consumed bytes.
    fn consume(&mut self, count: u64);
}
