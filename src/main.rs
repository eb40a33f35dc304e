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

use clap::{Parser, Subcommand};
use spm_search::commands::config::ConfigCommand;
use spm_search::commands::filters::FiltersCommand;
use spm_search::commands::readme::ReadmeCommand;
use spm_search::commands::search::{SearchArgs, SearchCommand};
use spm_search::config::new_search_config;
use spm_search::error::{
    Result, SpmError, format_error_chain, format_error_with_color, get_exit_code,
};
use spm_search::logging;
use spm_search::models::DEFAULT_MAX_LENGTH;
use std::io::{IsTerminal, stderr};

#[derive(Parser)]
#[command(name = "spm-search")]
#[command(author, version, about = "Search the Swift Package Index", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for Swift packages
    #[command(visible_alias = "s")]
    #[command(long_about = "Search for Swift packages

Filters combine with AND. Prefix --author, --keyword or --license with '!'
to exclude a value.

Examples:
  spm-search search networking --min-stars 500
  spm-search search --author apple --platform linux
  spm-search search json --license '!gpl-3.0' --page 2")]
    Search {
        #[command(flatten)]
        args: SearchArgs,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accepted values for --platform and --product-type
    Filters {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a package's README
    #[command(visible_alias = "r")]
    Readme {
        /// Repository owner (user or organization)
        owner: String,

        /// Repository name
        repo: String,

        /// Maximum characters to return (0 for the whole document)
        #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
        max_length: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

fn setup_logger(cli: &Cli) {
    logging::setup_logger(cli.verbose);
}

fn exit_with(error: &SpmError) -> ! {
    let message = if stderr().is_terminal() {
        format_error_with_color(error, true)
    } else {
        format_error_chain(error)
    };
    eprintln!("{message}");
    std::process::exit(get_exit_code(error));
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger based on CLI flags and environment
    setup_logger(&cli);

    // Load configuration once at startup
    let config = match new_search_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Search { args, json } => {
            let command = SearchCommand::new(&config)?;
            command.execute(args, json)
        }
        Commands::Filters { json } => {
            let command = FiltersCommand::new()?;
            command.execute(json)
        }
        Commands::Readme {
            owner,
            repo,
            max_length,
            json,
        } => {
            let command = ReadmeCommand::new(&config)?;
            command.execute(&owner, &repo, max_length, json)
        }
        Commands::Config => {
            let command = ConfigCommand::new(&config)?;
            command.execute()
        }
    })();

    if let Err(e) = result {
        exit_with(&e);
    }
}
