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

//! Internal hook vocabularies and their host-native translations.

use hookbridge_core::HostHook;
use serde::{Deserialize, Serialize};

/// The binding's internal hook vocabulary, one value per plugin phase
/// callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    ReadRequestHeadersPreRemap,
    ReadRequestHeadersPostRemap,
    SendRequestHeaders,
    ReadResponseHeaders,
    SendResponseHeaders,
    OsDns,
    ReadRequestHeaders,
    ReadCacheHeaders,
    CacheLookupComplete,
    SelectAlternate,
}

/// Transform attachment points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformType {
    RequestTransformation,
    ResponseTransformation,
}

/// Host hook for an internal hook.
///
/// Total and stable: registration glue relies on every value mapping to a
/// fixed host identifier.
pub fn host_hook(hook: HookType) -> HostHook {
    match hook {
        HookType::ReadRequestHeadersPreRemap => HostHook::PreRemap,
        HookType::ReadRequestHeadersPostRemap => HostHook::PostRemap,
        HookType::SendRequestHeaders => HostHook::SendRequestHeaders,
        HookType::ReadResponseHeaders => HostHook::ReadResponseHeaders,
        HookType::SendResponseHeaders => HostHook::SendResponseHeaders,
        HookType::OsDns => HostHook::OsDns,
        HookType::ReadRequestHeaders => HostHook::ReadRequestHeaders,
        HookType::ReadCacheHeaders => HostHook::ReadCacheHeaders,
        HookType::CacheLookupComplete => HostHook::CacheLookupComplete,
        HookType::SelectAlternate => HostHook::SelectAlternate,
    }
}

/// Host hook for a transform attachment point.
pub fn transform_hook(transform: TransformType) -> HostHook {
    match transform {
        TransformType::RequestTransformation => HostHook::RequestTransform,
        TransformType::ResponseTransformation => HostHook::ResponseTransform,
    }
}
