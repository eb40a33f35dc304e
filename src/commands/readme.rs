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
use crate::models::{DocumentFetchResult, DocumentRequest};
use colored::*;

pub struct ReadmeCommand<'a> {
    config: &'a SearchConfig,
}

impl<'a> ReadmeCommand<'a> {
    pub fn new(config: &'a SearchConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, owner: &str, repo: &str, max_length: usize, json: bool) -> Result<()> {
        let request = DocumentRequest::new(owner, repo, max_length)?;

        let client = CatalogClient::from_config(self.config);
        match client.fetch_document(&request) {
            Ok(document) if json => print_json(&document),
            Ok(document) => {
                print_document(&document);
                Ok(())
            }
            Err(error) => report_failure(&error, json),
        }
    }
}

fn print_document(document: &DocumentFetchResult) {
    println!("{}", document.content);
    if document.truncated {
        eprintln!();
        eprintln!("{}", truncation_notice(document).yellow());
    }
    eprintln!("{}", document.url.dimmed());
}

fn truncation_notice(document: &DocumentFetchResult) -> String {
    format!(
        "[README truncated: showing {} of {} characters. Use --max-length 0 for the full text.]",
        document.content.chars().count(),
        document.total_length
    )
}
