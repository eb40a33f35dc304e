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

use crate::config::{SearchConfig, config_file_path};
use crate::error::Result;
use colored::*;

/// Prints the effective configuration after files and environment are applied.
pub struct ConfigCommand<'a> {
    config: &'a SearchConfig,
}

impl<'a> ConfigCommand<'a> {
    pub fn new(config: &'a SearchConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self) -> Result<()> {
        match config_file_path() {
            Some(path) if path.exists() => {
                println!("{}", format!("# Loaded from {}", path.display()).dimmed());
            }
            Some(path) => {
                println!(
                    "{}",
                    format!("# No file at {}; using defaults", path.display()).dimmed()
                );
            }
            None => println!("{}", "# No config directory; using defaults".dimmed()),
        }
        print!("{}", self.config.to_toml()?);
        Ok(())
    }
}
