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

use crate::classify::{
    ClassifiedError, FailureCategory, Fetched, Upstream, status_category, transport_category,
};
use crate::config::{
    DEFAULT_CATALOG_BASE_URL, DEFAULT_DOCUMENT_BASE_URL, DEFAULT_TIMEOUT_SECS, SearchConfig,
};
use crate::filter::SearchCriteria;
use crate::models::{DocumentFetchResult, DocumentRequest, SearchResponse};
use crate::parser::{document::truncate, parse_search_page};
use crate::query;
use crate::user_agent;
use attohttpc::{RequestBuilder, Session};
use log::{debug, trace};
use std::time::Duration;

const README_MEDIA_TYPE: &str = "application/vnd.github.raw";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Debug, Clone)]
pub struct CatalogClient {
    pub(crate) session: Session,
    pub(crate) catalog_base_url: String,
    pub(crate) document_base_url: String,
    user_agent_override: Option<String>,
}

impl CatalogClient {
    pub fn new() -> Self {
        let mut session = Session::new();
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        Self {
            session,
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            document_base_url: DEFAULT_DOCUMENT_BASE_URL.to_string(),
            user_agent_override: None,
        }
        .with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        let mut client = Self::new()
            .with_catalog_base_url(config.catalog.base_url.clone())
            .with_document_base_url(config.documents.base_url.clone())
            .with_timeout(config.timeout());
        client.user_agent_override = config.http.user_agent.clone();
        client
    }

    pub fn with_catalog_base_url(mut self, base_url: String) -> Self {
        self.catalog_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_document_base_url(mut self, base_url: String) -> Self {
        self.document_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Bounds the whole exchange, including reads from a server that accepts
    /// the connection and then goes quiet.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.session.timeout(timeout);
        self.session.connect_timeout(timeout);
        self.session.read_timeout(timeout);
        self
    }

    /// Runs one validated search against the catalog.
    pub fn search(&self, criteria: &SearchCriteria) -> Fetched<SearchResponse> {
        let compiled = query::compile(criteria);
        let url = compiled.to_url(&self.catalog_base_url).map_err(|e| {
            ClassifiedError::new(
                FailureCategory::InvalidRequest,
                Upstream::Catalog,
                format!("Cannot build search URL from '{}': {e}", self.catalog_base_url),
            )
        })?;

        debug!("Searching catalog: {url}");
        let request = self
            .session
            .get(url.as_str())
            .header("Accept", "text/html");

        let page = compiled.page();
        let catalog_base_url = self.catalog_base_url.as_str();
        let results = self.execute(Upstream::Catalog, request, |body| {
            parse_search_page(&body, page, catalog_base_url).map_err(|e| e.to_string())
        })?;

        debug!(
            "Catalog returned {} packages on page {page} (more: {})",
            results.packages.len(),
            results.has_more
        );
        Ok(SearchResponse::new(&compiled, results, url.to_string()))
    }

    /// Fetches the README of one repository in a single round trip.
    pub fn fetch_document(&self, request: &DocumentRequest) -> Fetched<DocumentFetchResult> {
        let readme_url = format!(
            "{}/repos/{}/{}/readme",
            self.document_base_url,
            request.owner(),
            request.repo()
        );

        debug!("Fetching README: {readme_url}");
        let builder = self
            .session
            .get(&readme_url)
            .header("Accept", README_MEDIA_TYPE);

        let content = self.execute(Upstream::DocumentHost, builder, Ok)?;
        let document = truncate(content, request.max_length());
        if document.truncated {
            debug!(
                "README for {}/{} truncated from {} to {} characters",
                request.owner(),
                request.repo(),
                document.total_length,
                request.max_length()
            );
        }

        let package_url = format!(
            "{}/{}/{}",
            self.catalog_base_url,
            request.owner(),
            request.repo()
        );
        Ok(DocumentFetchResult::new(request, package_url, document))
    }

    fn user_agent(&self, upstream: Upstream) -> String {
        match (&self.user_agent_override, upstream) {
            (Some(agent), _) => agent.clone(),
            (None, Upstream::Catalog) => user_agent::catalog_client(),
            (None, Upstream::DocumentHost) => user_agent::document_client(),
        }
    }

    fn execute<T, P>(&self, upstream: Upstream, request: RequestBuilder, parser: P) -> Fetched<T>
    where
        P: FnOnce(String) -> Result<T, String>,
    {
        let classify = |category: FailureCategory, cause: String| {
            let error = ClassifiedError::new(category, upstream, cause);
            debug!("{} request failed: {error}", upstream.display_name());
            error
        };

        let response = request
            .header("User-Agent", self.user_agent(upstream))
            .send()
            .map_err(|e| {
                classify(
                    transport_category(&e),
                    format!("Network error reaching {}: {e}", upstream.display_name()),
                )
            })?;

        let status = response.status();
        if !response.is_success() {
            let rate_limit_exhausted = response
                .headers()
                .get(RATE_LIMIT_REMAINING_HEADER)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.trim() == "0");
            return Err(classify(
                status_category(status.as_u16(), rate_limit_exhausted),
                format!(
                    "HTTP {} {} from {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown"),
                    upstream.display_name()
                ),
            ));
        }

        let body = response.text().map_err(|e| {
            classify(
                transport_category(&e),
                format!(
                    "Failed to read response body from {}: {e}",
                    upstream.display_name()
                ),
            )
        })?;
        trace!("Received {} bytes from {}", body.len(), upstream.display_name());

        parser(body).map_err(|reason| {
            classify(
                FailureCategory::MalformedResponse,
                format!(
                    "Unexpected response from {}: {reason}",
                    upstream.display_name()
                ),
            )
        })
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}
