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

use crate::classify::{FailureCategory, Upstream};
use crate::error::SpmError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a SpmError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a SpmError) -> Self {
        let (suggestion, details) = match error {
            SpmError::Validation(validation) => {
                let suggestion = Some(
                    FailureCategory::InvalidInput
                        .recovery_hint(Upstream::Catalog)
                        .to_string(),
                );
                let details = if validation.accepted.is_empty() {
                    None
                } else {
                    Some(format!(
                        "Accepted values for {}:\n{}",
                        validation.field,
                        validation
                            .accepted
                            .iter()
                            .map(|v| format!("  - {v}"))
                            .collect::<Vec<_>>()
                            .join("\n")
                    ))
                };
                (suggestion, details)
            }
            SpmError::InvalidConfig(msg) => {
                let suggestion = Some(
                    "Check config.toml and SPM_SEARCH_* environment variables. Run \
                     'spm-search config' to see the effective configuration."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            SpmError::ConfigFile(msg) => {
                let suggestion = Some(
                    "Fix the TOML syntax in the configuration file, or set SPM_SEARCH_HOME to \
                     a directory with a valid config.toml."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            SpmError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        Some("Check file permissions and try again.".to_string())
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            SpmError::Json(_) => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
