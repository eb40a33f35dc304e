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

use crate::query::CompiledQuery;
use serde::{Deserialize, Serialize};

/// One search hit, as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSummary {
    pub name: String,
    pub description: String,
    /// Repository owner (user or organization).
    pub author: String,
    pub repository: String,
    /// Catalog page for the package.
    pub url: String,
    pub github_url: String,
    pub stars: Option<u64>,
    /// Human-readable activity, e.g. "Active 22 days ago".
    pub last_activity: Option<String>,
    pub has_docs: bool,
    pub keywords: Vec<String>,
    pub license: Option<String>,
    pub platforms: Vec<String>,
}

/// One page of results in upstream ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub packages: Vec<PackageSummary>,
    pub page: u32,
    pub has_more: bool,
}

/// What the search operation hands back to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Filter string that was sent to the catalog.
    pub query: String,
    #[serde(flatten)]
    pub results: SearchResultPage,
    pub result_count: usize,
    /// Direct link to the same results on the catalog website.
    pub search_url: String,
    pub next_step: String,
}

impl SearchResponse {
    pub fn new(compiled: &CompiledQuery, results: SearchResultPage, search_url: String) -> Self {
        let next_step = next_step(&results);
        Self {
            query: compiled.query().to_string(),
            result_count: results.packages.len(),
            results,
            search_url,
            next_step,
        }
    }

    pub fn packages(&self) -> &[PackageSummary] {
        &self.results.packages
    }

    pub fn has_more(&self) -> bool {
        self.results.has_more
    }
}

fn next_step(results: &SearchResultPage) -> String {
    if results.packages.is_empty() {
        return "No results found. Try broadening your search: remove filters or use \
                different keywords."
            .to_string();
    }

    let readme = "Use the readme operation with a result's author and repository to read \
                  its README.";
    match results.page.checked_add(1) {
        Some(next_page) if results.has_more => {
            format!("{readme} Pass page={next_page} to see more results.")
        }
        _ => readme.to_string(),
    }
}
