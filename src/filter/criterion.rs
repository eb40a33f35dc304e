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
use serde::Serialize;

/// Prefix a caller puts in front of a string filter to exclude matches.
pub const EXCLUSION_MARKER: char = '!';

/// A single, optionally negated, search constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Criterion<T> {
    pub value: T,
    pub negated: bool,
}

impl<T> Criterion<T> {
    pub fn include(value: T) -> Self {
        Self {
            value,
            negated: false,
        }
    }

    pub fn exclude(value: T) -> Self {
        Self {
            value,
            negated: true,
        }
    }
}

impl Criterion<String> {
    /// Splits raw caller input into a value and its negation flag.
    ///
    /// The exclusion marker is stripped here and never appears in `value`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let (value, negated) = match trimmed.strip_prefix(EXCLUSION_MARKER) {
            Some(rest) => (rest.trim(), true),
            None => (trimmed, false),
        };

        if value.is_empty() {
            let rule = if negated {
                format!("'{EXCLUSION_MARKER}' must be followed by a value to exclude")
            } else {
                "must not be empty".to_string()
            };
            return Err(ValidationError::new(field, rule));
        }

        if value.starts_with(EXCLUSION_MARKER) {
            return Err(ValidationError::new(
                field,
                format!("'{raw}' repeats the '{EXCLUSION_MARKER}' marker; use it once"),
            ));
        }

        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::new(
                field,
                format!("'{value}' must be a single term without spaces"),
            ));
        }

        Ok(Self {
            value: value.to_string(),
            negated,
        })
    }
}
