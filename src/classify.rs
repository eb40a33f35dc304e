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

//! Failure classification and recovery guidance for upstream calls.
//!
//! Every failed network call ends up as a [`ClassifiedError`]: a value that
//! says whether repeating the same call can help, what went wrong, and what
//! the caller should do next.

use serde::Serialize;
use std::fmt;
use std::io;
use thiserror::Error;

/// Result of an upstream operation. The error side is a terminal value,
/// never partial data.
pub type Fetched<T> = std::result::Result<T, ClassifiedError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// Transient; the identical call may succeed later.
    Retryable,
    /// The call as formed cannot succeed.
    Permanent,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Retryable => write!(f, "RETRYABLE"),
            FailureKind::Permanent => write!(f, "PERMANENT"),
        }
    }
}

/// Which service a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Upstream {
    Catalog,
    DocumentHost,
}

impl Upstream {
    pub fn display_name(&self) -> &'static str {
        match self {
            Upstream::Catalog => "Swift Package Index",
            Upstream::DocumentHost => "GitHub",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    Timeout,
    ConnectionFailed,
    Transport,
    RateLimited,
    ServerError,
    NotFound,
    AccessDenied,
    UnexpectedStatus,
    MalformedResponse,
    InvalidRequest,
    InvalidInput,
}

impl FailureCategory {
    pub const ALL: [FailureCategory; 11] = [
        FailureCategory::Timeout,
        FailureCategory::ConnectionFailed,
        FailureCategory::Transport,
        FailureCategory::RateLimited,
        FailureCategory::ServerError,
        FailureCategory::NotFound,
        FailureCategory::AccessDenied,
        FailureCategory::UnexpectedStatus,
        FailureCategory::MalformedResponse,
        FailureCategory::InvalidRequest,
        FailureCategory::InvalidInput,
    ];

    pub fn kind(self) -> FailureKind {
        match self {
            FailureCategory::Timeout
            | FailureCategory::ConnectionFailed
            | FailureCategory::Transport
            | FailureCategory::RateLimited
            | FailureCategory::ServerError => FailureKind::Retryable,
            FailureCategory::NotFound
            | FailureCategory::AccessDenied
            | FailureCategory::UnexpectedStatus
            | FailureCategory::MalformedResponse
            | FailureCategory::InvalidRequest
            | FailureCategory::InvalidInput => FailureKind::Permanent,
        }
    }

    /// Remediation text for this category on the given upstream.
    pub fn recovery_hint(self, upstream: Upstream) -> &'static str {
        use FailureCategory::*;
        use Upstream::*;

        match (self, upstream) {
            (Timeout, Catalog) => {
                "Swift Package Index took too long to respond. Retry the same search; \
                 transient timeouts are common."
            }
            (Timeout, DocumentHost) => {
                "GitHub took too long to respond. Retry the same request."
            }
            (ConnectionFailed, Catalog) => {
                "Could not connect to swiftpackageindex.com. The site may be temporarily \
                 down. Retry in 30 seconds."
            }
            (ConnectionFailed, DocumentHost) => {
                "Could not connect to GitHub. Retry in 30 seconds."
            }
            (Transport, _) => {
                "The request failed in transit. Check network connectivity and proxy \
                 settings, then retry with backoff."
            }
            (RateLimited, Catalog) => {
                "Rate limited by Swift Package Index. Wait 60 seconds, then retry the same \
                 search with exponential backoff."
            }
            (RateLimited, DocumentHost) => {
                "GitHub rate limit reached. Wait 60 seconds (or until the rate-limit window \
                 resets), then retry with backoff."
            }
            (ServerError, Catalog) => {
                "Swift Package Index returned a server error and may be under maintenance. \
                 Retry in 30 seconds."
            }
            (ServerError, DocumentHost) => {
                "GitHub returned a server error. Retry in 30 seconds."
            }
            (NotFound, Catalog) => {
                "The search endpoint was not found; Swift Package Index may have changed its \
                 URL structure. Check the configured catalog base URL."
            }
            (NotFound, DocumentHost) => {
                "No README found. Verify the owner/repo spelling against the search results; \
                 the repository may be private, renamed, or have no README."
            }
            (AccessDenied, Catalog) => {
                "Access denied by Swift Package Index. The site may be blocking automated \
                 requests; do not retry the same request."
            }
            (AccessDenied, DocumentHost) => {
                "Access denied by GitHub. The repository may be private or blocked; verify \
                 the owner/repo and do not retry the same request."
            }
            (UnexpectedStatus, Catalog) => {
                "Unexpected response status. Check https://swiftpackageindex.com manually \
                 before retrying."
            }
            (UnexpectedStatus, DocumentHost) => {
                "Unexpected response status. Check the repository on https://github.com \
                 manually before retrying."
            }
            (MalformedResponse, Catalog) => {
                "The search page could not be parsed; Swift Package Index may have changed \
                 its markup. Retrying will not help; report the failure."
            }
            (MalformedResponse, DocumentHost) => {
                "The README response could not be read. Retrying will not help; open the \
                 repository on GitHub directly."
            }
            (InvalidRequest, _) => {
                "The request URL could not be built. Check the configured base URLs."
            }
            (InvalidInput, _) => {
                "Fix the named parameter. Call the filter discovery operation \
                 ('spm-search filters') to list valid platform and product_type values."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {cause}")]
pub struct ClassifiedError {
    pub kind: FailureKind,
    pub category: FailureCategory,
    pub upstream: Upstream,
    pub cause: String,
    pub recovery_hint: String,
}

impl ClassifiedError {
    pub fn new(category: FailureCategory, upstream: Upstream, cause: impl Into<String>) -> Self {
        Self {
            kind: category.kind(),
            category,
            upstream,
            cause: cause.into(),
            recovery_hint: category.recovery_hint(upstream).to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind == FailureKind::Retryable
    }
}

/// Category for a non-2xx response.
///
/// `rate_limit_exhausted` reports whether the response carried a depleted
/// rate-limit header, which turns a 403 into a rate-limit signal.
pub fn status_category(status: u16, rate_limit_exhausted: bool) -> FailureCategory {
    match status {
        429 => FailureCategory::RateLimited,
        403 if rate_limit_exhausted => FailureCategory::RateLimited,
        403 => FailureCategory::AccessDenied,
        404 => FailureCategory::NotFound,
        500.. => FailureCategory::ServerError,
        _ => FailureCategory::UnexpectedStatus,
    }
}

/// Category for a request that never produced a usable response.
pub fn transport_category(error: &attohttpc::Error) -> FailureCategory {
    match error.kind() {
        attohttpc::ErrorKind::Io(io_err) => io_category(io_err.kind()),
        attohttpc::ErrorKind::InvalidBaseUrl
        | attohttpc::ErrorKind::InvalidUrlHost
        | attohttpc::ErrorKind::InvalidUrlPort => FailureCategory::InvalidRequest,
        _ => FailureCategory::Transport,
    }
}

fn io_category(kind: io::ErrorKind) -> FailureCategory {
    match kind {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => FailureCategory::Timeout,
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => FailureCategory::ConnectionFailed,
        _ => FailureCategory::Transport,
    }
}
