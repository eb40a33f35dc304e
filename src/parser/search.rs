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

//! Parser for the catalog's HTML search page.
//!
//! Result markup, one `li` per package:
//!
//! ```text
//! <section class="package-results">
//!   <ul>
//!     <li>
//!       <a href="/owner/repo">
//!         <h4>Package Name</h4>
//!         <p>Description text</p>
//!         <ul class="keywords matching">...</ul>
//!         <ul class="metadata">
//!           <li class="identifier"><small>owner/repo</small></li>
//!           <li class="activity"><small>Active 22 days ago</small></li>
//!           <li class="stars"><small>1,377 stars</small></li>
//!           <li class="has_docs">...</li>
//!         </ul>
//!       </a>
//!     </li>
//!   </ul>
//!   <ul class="pagination"><li class="next"><a href="...">Next</a></li></ul>
//! </section>
//! ```

use super::ParseError;
use crate::models::{PackageSummary, SearchResultPage};
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};

const RESULTS_SECTION: &str = "section.package-results";
const PAGINATION_NEXT_LINK: &str = "ul.pagination li.next a";
const GITHUB_BASE_URL: &str = "https://github.com";

fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::InvalidSelector {
        selector: css,
        reason: e.to_string(),
    })
}

/// Parses one search page served by the catalog at `catalog_base_url`.
///
/// Fails only when the results section itself is absent. Individual entries
/// that cannot be read are skipped.
pub fn parse_search_page(
    html: &str,
    page: u32,
    catalog_base_url: &str,
) -> Result<SearchResultPage, ParseError> {
    let document = Html::parse_document(html);
    let section_selector = selector(RESULTS_SECTION)?;
    let section = document
        .select(&section_selector)
        .next()
        .ok_or(ParseError::MissingStructure(RESULTS_SECTION))?;

    let selectors = EntrySelectors::new()?;
    let base_url = catalog_base_url.trim_end_matches('/');

    // The section also holds classed lists (filters, pagination); results are
    // the one without a class attribute.
    let packages = match child_elements(section, "ul").find(|ul| ul.value().attr("class").is_none())
    {
        Some(list) => child_elements(list, "li")
            .filter_map(|li| parse_entry(li, &selectors, base_url))
            .collect(),
        None => {
            debug!("Results section has no result list; treating page as empty");
            Vec::new()
        }
    };

    Ok(SearchResultPage {
        packages,
        page,
        has_more: has_more_next_link(&document)?,
    })
}

/// True when the page links to a next page of results; absent pagination means no.
fn has_more_next_link(document: &Html) -> Result<bool, ParseError> {
    let next = selector(PAGINATION_NEXT_LINK)?;
    Ok(document.select(&next).next().is_some())
}

struct EntrySelectors {
    link: Selector,
    name: Selector,
    description: Selector,
    keywords: Selector,
    metadata: Selector,
}

impl EntrySelectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            link: selector("a")?,
            name: selector("h4")?,
            description: selector("p")?,
            keywords: selector("ul.keywords li")?,
            metadata: selector("ul.metadata")?,
        })
    }
}

fn parse_entry(li: ElementRef<'_>, selectors: &EntrySelectors, base_url: &str) -> Option<PackageSummary> {
    let Some(link) = li.select(&selectors.link).next() else {
        warn!("Skipping search result without a link");
        return None;
    };

    let href = link.value().attr("href").unwrap_or_default();
    let mut segments = href.trim_matches('/').split('/').filter(|s| !s.is_empty());
    let (Some(author), Some(repository)) = (segments.next(), segments.next()) else {
        warn!("Skipping search result with unexpected link '{href}'");
        return None;
    };

    let name = link
        .select(&selectors.name)
        .next()
        .map(element_text)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| repository.to_string());
    let description = link
        .select(&selectors.description)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let keywords = link
        .select(&selectors.keywords)
        .map(element_text)
        .filter(|kw| !kw.is_empty() && !kw.to_lowercase().starts_with("matching keyword"))
        .collect();

    let metadata = link
        .select(&selectors.metadata)
        .next()
        .map(parse_metadata)
        .unwrap_or_default();

    Some(PackageSummary {
        name,
        description,
        author: author.to_string(),
        repository: repository.to_string(),
        url: format!("{base_url}/{author}/{repository}"),
        github_url: format!("{GITHUB_BASE_URL}/{author}/{repository}"),
        stars: metadata.stars,
        last_activity: metadata.last_activity,
        has_docs: metadata.has_docs,
        keywords,
        license: metadata.license,
        platforms: metadata.platforms,
    })
}

#[derive(Debug, Default)]
struct Metadata {
    stars: Option<u64>,
    last_activity: Option<String>,
    has_docs: bool,
    license: Option<String>,
    platforms: Vec<String>,
}

fn parse_metadata(list: ElementRef<'_>) -> Metadata {
    let mut metadata = Metadata::default();

    for item in child_elements(list, "li") {
        let has_class = |name: &str| item.value().classes().any(|c| c == name);
        let text = element_text(item);

        if has_class("stars") {
            metadata.stars = parse_star_count(&text);
        } else if has_class("activity") {
            metadata.last_activity = Some(text).filter(|t| !t.is_empty());
        } else if has_class("has_docs") {
            metadata.has_docs = true;
        } else if has_class("license") {
            metadata.license = Some(text).filter(|t| !t.is_empty());
        } else if has_class("platforms") {
            metadata.platforms = text
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    metadata
}

/// Reads "42,352 stars" as 42352.
fn parse_star_count(text: &str) -> Option<u64> {
    text.replace(',', "")
        .split_whitespace()
        .find_map(|word| word.parse::<u64>().ok())
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag)
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
