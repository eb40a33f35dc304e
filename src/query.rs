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

//! Compiles validated [`SearchCriteria`] into the catalog's filter dialect.
//!
//! Every populated field becomes exactly one token; tokens are joined with
//! spaces, which the catalog treats as AND. Token order is fixed so that the
//! same criteria always produce the same query.

use crate::filter::{Criterion, DateWindow, SearchCriteria};
use serde::Serialize;
use url::Url;

pub const SEARCH_PATH: &str = "search";

/// Negation operator in the catalog's dialect, placed after the filter colon.
const UPSTREAM_NEGATION: &str = "!";

/// Upstream-shaped search request: the filter string plus the page number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompiledQuery {
    query: String,
    page: u32,
}

impl CompiledQuery {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn params(&self) -> [(&'static str, String); 2] {
        [
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
        ]
    }

    /// Absolute search URL on the catalog at `base_url`, with encoded parameters.
    pub fn to_url(&self, base_url: &str) -> Result<Url, url::ParseError> {
        let endpoint = format!("{}/{SEARCH_PATH}", base_url.trim_end_matches('/'));
        Url::parse_with_params(&endpoint, self.params())
    }
}

pub fn compile(criteria: &SearchCriteria) -> CompiledQuery {
    let mut parts: Vec<String> = Vec::new();

    if let Some(ref text) = criteria.free_text {
        parts.push(text.clone());
    }
    if let Some(ref author) = criteria.author {
        parts.push(filter_token("author", author));
    }
    if let Some(ref keyword) = criteria.keyword {
        parts.push(filter_token("keyword", keyword));
    }
    if let Some(min) = criteria.stars.min {
        parts.push(format!("stars:>={min}"));
    }
    if let Some(max) = criteria.stars.max {
        parts.push(format!("stars:<={max}"));
    }
    if !criteria.platforms.is_empty() {
        let platforms = criteria
            .platforms
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(",");
        parts.push(format!("platform:{platforms}"));
    }
    if let Some(ref license) = criteria.license {
        parts.push(filter_token("license", license));
    }
    push_window(&mut parts, "last_activity", &criteria.last_activity);
    push_window(&mut parts, "last_commit", &criteria.last_commit);
    if let Some(product_type) = criteria.product_type {
        parts.push(format!("product:{}", product_type.as_str()));
    }

    CompiledQuery {
        query: parts.join(" "),
        page: criteria.page,
    }
}

fn filter_token(name: &str, criterion: &Criterion<String>) -> String {
    let operator = if criterion.negated {
        UPSTREAM_NEGATION
    } else {
        ""
    };
    format!("{name}:{operator}{}", criterion.value)
}

// Both ends are emitted when set; the catalog intersects them.
fn push_window(parts: &mut Vec<String>, name: &str, window: &DateWindow) {
    if let Some(after) = window.after {
        parts.push(format!("{name}:>={}", after.format("%Y-%m-%d")));
    }
    if let Some(before) = window.before {
        parts.push(format!("{name}:<={}", before.format("%Y-%m-%d")));
    }
}
