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

//! Typed search criteria for the package catalog.
//!
//! Raw caller input arrives as [`SearchParams`] (plain strings and numbers)
//! and is validated into a [`SearchCriteria`]. Only validated criteria can
//! be compiled into an upstream query, so invalid input never reaches the
//! network.

mod criterion;
mod platform;

pub use criterion::{Criterion, EXCLUSION_MARKER};
pub use platform::{Platform, ProductType};

use chrono::NaiveDate;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid {field}: {rule}")]
pub struct ValidationError {
    pub field: &'static str,
    pub rule: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accepted: Vec<&'static str>,
}

impl ValidationError {
    pub fn new(field: &'static str, rule: impl Into<String>) -> Self {
        Self {
            field,
            rule: rule.into(),
            accepted: Vec::new(),
        }
    }

    pub fn with_accepted(
        field: &'static str,
        rule: impl Into<String>,
        accepted: Vec<&'static str>,
    ) -> Self {
        Self {
            field,
            rule: rule.into(),
            accepted,
        }
    }
}

/// Loosely typed search input as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub author: Option<String>,
    pub keyword: Option<String>,
    pub min_stars: Option<i64>,
    pub max_stars: Option<i64>,
    pub platforms: Option<Vec<String>>,
    pub license_filter: Option<String>,
    pub last_activity_after: Option<String>,
    pub last_activity_before: Option<String>,
    pub last_commit_after: Option<String>,
    pub last_commit_before: Option<String>,
    pub product_type: Option<String>,
    pub page: Option<i64>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn min_stars(mut self, min_stars: i64) -> Self {
        self.min_stars = Some(min_stars);
        self
    }

    pub fn max_stars(mut self, max_stars: i64) -> Self {
        self.max_stars = Some(max_stars);
        self
    }

    pub fn platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = Some(platforms.into_iter().map(Into::into).collect());
        self
    }

    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.license_filter = Some(license.into());
        self
    }

    pub fn last_activity_after(mut self, date: impl Into<String>) -> Self {
        self.last_activity_after = Some(date.into());
        self
    }

    pub fn last_activity_before(mut self, date: impl Into<String>) -> Self {
        self.last_activity_before = Some(date.into());
        self
    }

    pub fn last_commit_after(mut self, date: impl Into<String>) -> Self {
        self.last_commit_after = Some(date.into());
        self
    }

    pub fn last_commit_before(mut self, date: impl Into<String>) -> Self {
        self.last_commit_before = Some(date.into());
        self
    }

    pub fn product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }
}

/// Inclusive star-count bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StarRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl StarRange {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Calendar-date window on one activity axis; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub after: Option<NaiveDate>,
    pub before: Option<NaiveDate>,
}

impl DateWindow {
    pub fn is_empty(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }

    fn parse(
        after_field: &'static str,
        after: Option<&str>,
        before_field: &'static str,
        before: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let window = Self {
            after: parse_date(after_field, after)?,
            before: parse_date(before_field, before)?,
        };

        if let (Some(after), Some(before)) = (window.after, window.before) {
            if after > before {
                return Err(ValidationError::new(
                    after_field,
                    format!("{after} is later than {before_field} ({before})"),
                ));
            }
        }

        Ok(window)
    }
}

/// A validated search. Construct with [`SearchCriteria::from_params`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub(crate) free_text: Option<String>,
    pub(crate) author: Option<Criterion<String>>,
    pub(crate) keyword: Option<Criterion<String>>,
    pub(crate) license: Option<Criterion<String>>,
    pub(crate) stars: StarRange,
    pub(crate) platforms: BTreeSet<Platform>,
    pub(crate) product_type: Option<ProductType>,
    pub(crate) last_activity: DateWindow,
    pub(crate) last_commit: DateWindow,
    pub(crate) page: u32,
}

impl SearchCriteria {
    pub fn from_params(params: SearchParams) -> Result<Self, ValidationError> {
        let free_text = non_blank(params.query.as_deref()).map(str::to_string);

        let author = parse_criterion("author", params.author.as_deref())?;
        let keyword = parse_criterion("keyword", params.keyword.as_deref())?;
        let license = parse_criterion("license_filter", params.license_filter.as_deref())?;

        let stars = StarRange {
            min: parse_star_bound("min_stars", params.min_stars)?,
            max: parse_star_bound("max_stars", params.max_stars)?,
        };
        if let (Some(min), Some(max)) = (stars.min, stars.max) {
            if min > max {
                return Err(ValidationError::new(
                    "min_stars",
                    format!("{min} is greater than max_stars ({max})"),
                ));
            }
        }

        let platforms = params
            .platforms
            .unwrap_or_default()
            .iter()
            .map(|p| p.parse::<Platform>())
            .collect::<Result<BTreeSet<_>, _>>()?;

        let product_type = non_blank(params.product_type.as_deref())
            .map(str::parse::<ProductType>)
            .transpose()?;

        let last_activity = DateWindow::parse(
            "last_activity_after",
            params.last_activity_after.as_deref(),
            "last_activity_before",
            params.last_activity_before.as_deref(),
        )?;
        let last_commit = DateWindow::parse(
            "last_commit_after",
            params.last_commit_after.as_deref(),
            "last_commit_before",
            params.last_commit_before.as_deref(),
        )?;

        let page = match params.page {
            None => 1,
            Some(page) if page >= 1 => u32::try_from(page)
                .map_err(|_| ValidationError::new("page", format!("{page} is too large")))?,
            Some(page) => {
                return Err(ValidationError::new(
                    "page",
                    format!("must be at least 1, got {page}"),
                ));
            }
        };

        let criteria = Self {
            free_text,
            author,
            keyword,
            license,
            stars,
            platforms,
            product_type,
            last_activity,
            last_commit,
            page,
        };

        if criteria.is_empty() {
            return Err(ValidationError::new(
                "query",
                "provide a search query or at least one filter (e.g. author, keyword, min_stars)",
            ));
        }

        trace!("Validated search criteria: {criteria:?}");
        Ok(criteria)
    }

    /// True when nothing besides the page number is set.
    pub fn is_empty(&self) -> bool {
        self.free_text.is_none()
            && self.author.is_none()
            && self.keyword.is_none()
            && self.license.is_none()
            && self.stars.is_empty()
            && self.platforms.is_empty()
            && self.product_type.is_none()
            && self.last_activity.is_empty()
            && self.last_commit.is_empty()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn author(&self) -> Option<&Criterion<String>> {
        self.author.as_ref()
    }

    pub fn keyword(&self) -> Option<&Criterion<String>> {
        self.keyword.as_ref()
    }

    pub fn license(&self) -> Option<&Criterion<String>> {
        self.license.as_ref()
    }

    pub fn platforms(&self) -> &BTreeSet<Platform> {
        &self.platforms
    }
}

impl TryFrom<SearchParams> for SearchCriteria {
    type Error = ValidationError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        Self::from_params(params)
    }
}

/// Accepted values for the enumerated search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCatalog {
    pub platforms: Vec<&'static str>,
    pub product_types: Vec<&'static str>,
}

pub fn available_filters() -> FilterCatalog {
    FilterCatalog {
        platforms: Platform::accepted_values(),
        product_types: ProductType::accepted_values(),
    }
}

fn parse_criterion(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<Criterion<String>>, ValidationError> {
    non_blank(raw)
        .map(|value| Criterion::parse(field, value))
        .transpose()
}

/// Blank strings from loosely typed callers count as "not provided".
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_star_bound(field: &'static str, raw: Option<i64>) -> Result<Option<u64>, ValidationError> {
    match raw {
        None => Ok(None),
        Some(value) => u64::try_from(value)
            .map(Some)
            .map_err(|_| ValidationError::new(field, format!("must not be negative, got {value}"))),
    }
}

fn parse_date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| {
            ValidationError::new(
                field,
                format!("'{raw}' is not a calendar date in YYYY-MM-DD format"),
            )
        })
}
