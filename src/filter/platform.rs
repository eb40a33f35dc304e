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

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Platforms the catalog tracks build compatibility for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    MacOS,
    WatchOS,
    TvOS,
    VisionOS,
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Ios,
        Platform::MacOS,
        Platform::WatchOS,
        Platform::TvOS,
        Platform::VisionOS,
        Platform::Linux,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::MacOS => "macos",
            Platform::WatchOS => "watchos",
            Platform::TvOS => "tvos",
            Platform::VisionOS => "visionos",
            Platform::Linux => "linux",
        }
    }

    pub fn accepted_values() -> Vec<&'static str> {
        Self::ALL.iter().map(Platform::as_str).collect()
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::with_accepted(
                    "platforms",
                    format!("unknown platform '{s}'"),
                    Self::accepted_values(),
                )
            })
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kinds of products a Swift package can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Library,
    Executable,
    Plugin,
    Macro,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::Library,
        ProductType::Executable,
        ProductType::Plugin,
        ProductType::Macro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Library => "library",
            ProductType::Executable => "executable",
            ProductType::Plugin => "plugin",
            ProductType::Macro => "macro",
        }
    }

    pub fn accepted_values() -> Vec<&'static str> {
        Self::ALL.iter().map(ProductType::as_str).collect()
    }
}

impl FromStr for ProductType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::with_accepted(
                    "product_type",
                    format!("unknown product type '{s}'"),
                    Self::accepted_values(),
                )
            })
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
