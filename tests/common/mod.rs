use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Isolated `SPM_SEARCH_HOME` so tests never read the developer's config.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create test home directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Points both upstreams at `base_url` (usually a mock server).
    pub fn with_upstream(self, base_url: &str) -> Self {
        let config = format!(
            "[catalog]\nbase_url = \"{base_url}\"\n\n[documents]\nbase_url = \"{base_url}\"\n\n[http]\ntimeout_secs = 5\n"
        );
        fs::write(self.path().join("config.toml"), config).expect("Failed to write config");
        self
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("spm-search").expect("binary should build");
        cmd.env("SPM_SEARCH_HOME", self.path())
            .env_remove("SPM_SEARCH_CATALOG__BASE_URL")
            .env_remove("SPM_SEARCH_DOCUMENTS__BASE_URL")
            .env_remove("SPM_SEARCH_HTTP__TIMEOUT_SECS")
            .env_remove("SPM_SEARCH_HTTP__USER_AGENT")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}
