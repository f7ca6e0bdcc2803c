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

//! Binding error types.

use thiserror::Error;

/// Result type for binding setup operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Errors surfaced to the embedder during setup.
///
/// Runtime callback paths never return errors to the host: recoverable host
/// failures are logged and replaced with safe defaults, so the host always
/// gets its continue signal back.
#[derive(Debug, Error)]
pub enum PluginError {
    // Configuration errors
    #[error("invalid bridge configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration parse error: {0}")]
    ConfigParseError(String),
}

impl From<serde_json::Error> for PluginError {
    fn from(e: serde_json::Error) -> Self {
        PluginError::ConfigParseError(e.to_string())
    }
}

impl From<toml::de::Error> for PluginError {
    fn from(e: toml::de::Error) -> Self {
        PluginError::ConfigParseError(e.to_string())
    }
}
