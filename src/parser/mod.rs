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

//! Turns upstream payloads into result values.

pub mod document;
mod search;

pub use search::parse_search_page;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("search page is missing '{0}'; the catalog markup may have changed")]
    MissingStructure(&'static str),

    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector {
        selector: &'static str,
        reason: String,
    },
}
