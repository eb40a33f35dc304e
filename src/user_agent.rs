// Copyright 2025 dentsusoken
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

//! User-Agent strings sent to the upstream services.
//!
//! Both upstreams see the same product token so that operators can tell the
//! two request streams apart by feature segment.

/// The package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for catalog (Swift Package Index) requests
pub fn catalog_client() -> String {
    for_feature("catalog")
}

/// User-Agent for README fetches against the document host
pub fn document_client() -> String {
    for_feature("documents")
}

/// Get a User-Agent string for a specific feature
pub fn for_feature(feature: &str) -> String {
    format!("spm-search/{feature}/{VERSION}")
}
