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

use crate::api::CatalogClient;
use crate::commands::{print_json, report_failure};
use crate::config::SearchConfig;
use crate::error::Result;
use crate::filter::{SearchCriteria, SearchParams};
use crate::models::{PackageSummary, SearchResponse};
use clap::Args;
use colored::*;
use comfy_table::{Cell, CellAlignment, Color, Table};

const DESCRIPTION_WIDTH: usize = 60;

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Free-text search terms
    #[arg(num_args = 0..)]
    pub query: Vec<String>,

    /// Repository owner; prefix with '!' to exclude
    #[arg(long, allow_hyphen_values = true)]
    pub author: Option<String>,

    /// Package keyword; prefix with '!' to exclude
    #[arg(long, allow_hyphen_values = true)]
    pub keyword: Option<String>,

    /// Minimum number of stars
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_stars: Option<i64>,

    /// Maximum number of stars
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_stars: Option<i64>,

    /// Supported platform (repeatable or comma-separated)
    #[arg(long = "platform", value_name = "PLATFORM", value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// License identifier; prefix with '!' to exclude
    #[arg(long, allow_hyphen_values = true)]
    pub license: Option<String>,

    /// Only packages active on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub last_activity_after: Option<String>,

    /// Only packages active on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub last_activity_before: Option<String>,

    /// Only packages with a commit on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub last_commit_after: Option<String>,

    /// Only packages with a commit on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub last_commit_before: Option<String>,

    /// Product type: library, executable, plugin or macro
    #[arg(long, value_name = "TYPE")]
    pub product_type: Option<String>,

    /// Result page, starting at 1
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub page: Option<i64>,
}

impl From<SearchArgs> for SearchParams {
    fn from(args: SearchArgs) -> Self {
        SearchParams {
            query: (!args.query.is_empty()).then(|| args.query.join(" ")),
            author: args.author,
            keyword: args.keyword,
            min_stars: args.min_stars,
            max_stars: args.max_stars,
            platforms: (!args.platforms.is_empty()).then_some(args.platforms),
            license_filter: args.license,
            last_activity_after: args.last_activity_after,
            last_activity_before: args.last_activity_before,
            last_commit_after: args.last_commit_after,
            last_commit_before: args.last_commit_before,
            product_type: args.product_type,
            page: args.page,
        }
    }
}

pub struct SearchCommand<'a> {
    config: &'a SearchConfig,
}

impl<'a> SearchCommand<'a> {
    pub fn new(config: &'a SearchConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, args: SearchArgs, json: bool) -> Result<()> {
        let criteria = SearchCriteria::from_params(args.into())?;
        let client = CatalogClient::from_config(self.config);
        match client.search(&criteria) {
            Ok(response) if json => print_json(&response),
            Ok(response) => {
                print_results(&response);
                Ok(())
            }
            Err(error) => report_failure(&error, json),
        }
    }
}

fn print_results(response: &SearchResponse) {
    println!("{} {}", "Query:".bold(), response.query);

    if response.packages().is_empty() {
        println!();
        println!("{}", response.next_step.yellow());
        return;
    }

    println!("{}", results_table(response.packages()));
    println!(
        "Page {} ({} results{})",
        response.results.page,
        response.result_count,
        if response.has_more() {
            ", more available"
        } else {
            ""
        }
    );
    println!("{}", response.search_url.dimmed());
    println!();
    println!("{}", response.next_step.cyan());
}

fn results_table(packages: &[PackageSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Package"),
        Cell::new("Owner/Repo"),
        Cell::new("Stars"),
        Cell::new("Activity"),
        Cell::new("Description"),
    ]);

    for package in packages {
        let stars = package
            .stars
            .map(|stars| stars.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&package.name).fg(Color::Green),
            Cell::new(format!("{}/{}", package.author, package.repository)),
            Cell::new(stars).set_alignment(CellAlignment::Right),
            Cell::new(package.last_activity.as_deref().unwrap_or("-")).fg(Color::DarkGrey),
            Cell::new(shorten(&package.description, DESCRIPTION_WIDTH)),
        ]);
    }

    table
}

fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(width.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_convert_to_params() {
        let args = SearchArgs {
            query: vec!["json".to_string()],
            license: Some("!gpl-3.0".to_string()),
            platforms: vec!["ios".to_string(), "linux".to_string()],
            page: Some(2),
            ..Default::default()
        };

        let params: SearchParams = args.into();
        assert_eq!(params.query.as_deref(), Some("json"));
        assert_eq!(params.license_filter.as_deref(), Some("!gpl-3.0"));
        assert_eq!(
            params.platforms,
            Some(vec!["ios".to_string(), "linux".to_string()])
        );
        assert_eq!(params.page, Some(2));
    }

    #[test]
    fn test_multi_word_query_is_joined() {
        let args = SearchArgs {
            query: vec!["http".to_string(), "client".to_string()],
            ..Default::default()
        };
        let params: SearchParams = args.into();
        assert_eq!(params.query.as_deref(), Some("http client"));

        let params: SearchParams = SearchArgs::default().into();
        assert_eq!(params.query, None);
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("short", 10), "short");
        let long = shorten("abcdefghijklmnop", 8);
        assert_eq!(long.chars().count(), 8);
        assert!(long.ends_with('…'));
    }

    #[test]
    fn test_results_table_contains_packages() {
        let package = PackageSummary {
            name: "Alamofire".to_string(),
            description: "Elegant HTTP Networking in Swift".to_string(),
            author: "Alamofire".to_string(),
            repository: "Alamofire".to_string(),
            url: "https://swiftpackageindex.com/Alamofire/Alamofire".to_string(),
            github_url: "https://github.com/Alamofire/Alamofire".to_string(),
            stars: Some(41523),
            last_activity: None,
            has_docs: true,
            keywords: vec![],
            license: None,
            platforms: vec![],
        };

        let rendered = results_table(&[package]).to_string();
        assert!(rendered.contains("Alamofire/Alamofire"));
        assert!(rendered.contains("41523"));
    }
}
