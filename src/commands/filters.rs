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

use crate::commands::print_json;
use crate::error::Result;
use crate::filter::{EXCLUSION_MARKER, FilterCatalog, available_filters};
use colored::*;
use comfy_table::{Cell, Table};

/// Lists accepted platform and product type values. Never touches the network.
pub struct FiltersCommand;

impl FiltersCommand {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let catalog = available_filters();
        if json {
            return print_json(&catalog);
        }

        println!("{}", filters_table(&catalog));
        println!();
        println!(
            "{} prefix --author, --keyword or --license with '{EXCLUSION_MARKER}' to exclude a value.",
            "Tip:".bold()
        );
        Ok(())
    }
}

fn filters_table(catalog: &FilterCatalog) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![Cell::new("Filter"), Cell::new("Accepted values")]);
    table.add_row(vec![
        Cell::new("--platform"),
        Cell::new(catalog.platforms.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("--product-type"),
        Cell::new(catalog.product_types.join(", ")),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_table_lists_every_value() {
        let catalog = available_filters();
        let rendered = filters_table(&catalog).to_string();

        for value in catalog.platforms.iter().chain(catalog.product_types.iter()) {
            assert!(rendered.contains(value), "missing {value}");
        }
    }
}
