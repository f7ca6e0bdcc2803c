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

//! Bridge configuration.

use crate::error::{PluginError, PluginResult};
use serde::{Deserialize, Serialize};

/// Configuration for the transaction bridge.
///
/// # Example TOML
///
/// ```toml
/// slot_index = 12
/// trace_events = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Reserved transaction slot override.
    ///
    /// Defaults to the host's last usable slot, which minimizes collision
    /// with other extensions sharing the host. Set this only when another
    /// extension in the deployment already owns that slot.
    #[serde(default)]
    pub slot_index: Option<usize>,

    /// Emit a debug trace for every routed lifecycle event.
    #[serde(default)]
    pub trace_events: bool,
}

impl BridgeConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> PluginResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> PluginResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        Ok(config)
    }

    /// Check the configuration against a host's slot range.
    pub fn validate(&self, max_slot_index: usize) -> PluginResult<()> {
        if let Some(index) = self.slot_index {
            if index > max_slot_index {
                return Err(PluginError::InvalidConfig(format!(
                    "slot_index {} exceeds host maximum {}",
                    index, max_slot_index
                )));
            }
        }
        Ok(())
    }
}
