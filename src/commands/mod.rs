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

pub mod config;
pub mod filters;
pub mod readme;
pub mod search;

use crate::classify::ClassifiedError;
use crate::error::{Result, format_classified};
use serde::Serialize;
use std::io::{IsTerminal, stderr};

#[derive(Serialize)]
struct FailureOutput<'a> {
    error: &'a ClassifiedError,
}

/// Upstream failures are a normal outcome: they go to the caller as data
/// and the process still exits successfully.
pub(crate) fn report_failure(error: &ClassifiedError, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&FailureOutput { error })?
        );
    } else {
        eprint!("{}", format_classified(error, stderr().is_terminal()));
    }
    Ok(())
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
