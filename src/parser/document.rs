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

/// Document content after applying a length limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    pub content: String,
    pub truncated: bool,
    pub total_length: usize,
}

/// Cuts `content` to at most `max_length` characters.
///
/// Lengths count `char`s, so a multi-byte character is never split.
/// `max_length == 0` disables the limit.
pub fn truncate(content: String, max_length: usize) -> Truncated {
    let total_length = content.chars().count();

    if max_length == 0 || total_length <= max_length {
        return Truncated {
            content,
            truncated: false,
            total_length,
        };
    }

    let cut = content
        .char_indices()
        .nth(max_length)
        .map(|(index, _)| index)
        .unwrap_or(content.len());

    Truncated {
        content: content[..cut].to_string(),
        truncated: true,
        total_length,
    }
}
