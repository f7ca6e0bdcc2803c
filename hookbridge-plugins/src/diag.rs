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

//! Contract-violation reporting.
//!
//! Events outside the registered set, foreign values in the reserved slot,
//! and similar conditions indicate a registration bug, not a runtime
//! condition. Debug builds terminate on them; release builds log at error
//! level and keep going, because the host must keep receiving its continue
//! signal.

use std::fmt;

pub(crate) fn contract_violation(context: &str, detail: fmt::Arguments<'_>) {
    tracing::error!(context, "host contract violation: {}", detail);
    debug_assert!(false, "host contract violation in {}: {}", context, detail);
}
