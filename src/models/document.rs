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

use crate::filter::ValidationError;
use crate::parser::document::Truncated;
use serde::{Deserialize, Serialize};

/// Characters returned when the caller does not ask for a limit.
pub const DEFAULT_MAX_LENGTH: usize = 4000;

/// A README lookup for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    owner: String,
    repo: String,
    max_length: usize,
}

impl DocumentRequest {
    /// `max_length == 0` returns the whole document.
    pub fn new(owner: &str, repo: &str, max_length: usize) -> Result<Self, ValidationError> {
        Ok(Self {
            owner: validate_segment("owner", owner)?,
            repo: validate_segment("repo", repo)?,
            max_length,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

/// README content, possibly cut down to the requested length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFetchResult {
    pub owner: String,
    pub repo: String,
    /// Catalog page for the package.
    pub url: String,
    pub content: String,
    pub truncated: bool,
    /// Length of the full document in characters, before any truncation.
    pub total_length: usize,
}

impl DocumentFetchResult {
    pub fn new(request: &DocumentRequest, url: String, document: Truncated) -> Self {
        Self {
            owner: request.owner.clone(),
            repo: request.repo.clone(),
            url,
            content: document.content,
            truncated: document.truncated,
            total_length: document.total_length,
        }
    }
}

// GitHub owner and repository names: ASCII alphanumerics, '-', '_' and '.'.
fn validate_segment(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if value == "." || value == ".." {
        return Err(ValidationError::new(field, format!("'{value}' is not a valid name")));
    }
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(ValidationError::new(
            field,
            format!("'{value}' contains '{c}'; use the bare GitHub name (e.g. 'swift-nio')"),
        ));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = DocumentRequest::new("apple", "swift-nio", DEFAULT_MAX_LENGTH).unwrap();
        assert_eq!(request.owner(), "apple");
        assert_eq!(request.repo(), "swift-nio");
        assert_eq!(request.max_length(), 4000);
    }

    #[test]
    fn test_names_are_trimmed() {
        let request = DocumentRequest::new(" Alamofire ", "Alamofire.swift", 0).unwrap();
        assert_eq!(request.owner(), "Alamofire");
        assert_eq!(request.repo(), "Alamofire.swift");
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let err = DocumentRequest::new("", "repo", 10).unwrap_err();
        assert_eq!(err.field, "owner");

        let err = DocumentRequest::new("apple", "swift/nio", 10).unwrap_err();
        assert_eq!(err.field, "repo");
        assert!(err.rule.contains('/'));

        let err = DocumentRequest::new("apple", "..", 10).unwrap_err();
        assert_eq!(err.field, "repo");
    }
}
