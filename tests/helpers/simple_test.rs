//! Simple test infrastructure for basic testing
//!
//! This provides a minimal test setup with a temp directory for token files
//! and config files.

use std::path::PathBuf;
use std::sync::Once;

use paytask::{Settings, TokenStorage};

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Simple test configuration
#[derive(Debug, Clone)]
pub struct SimpleTestConfig {
    pub persist_token: bool,
    pub use_temp_files: bool,
}

impl Default for SimpleTestConfig {
    fn default() -> Self {
        Self {
            persist_token: true,
            use_temp_files: true,
        }
    }
}

/// Simple test context for basic testing
pub struct SimpleTestContext {
    pub config: SimpleTestConfig,
    pub temp_dir: Option<tempfile::TempDir>,
}

impl SimpleTestContext {
    /// Create a new simple test context
    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::new_with_config(SimpleTestConfig::default())
    }

    /// Create with custom config
    pub fn new_with_config(config: SimpleTestConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        init_test_env();

        let temp_dir = if config.use_temp_files {
            Some(tempfile::tempdir()?)
        } else {
            None
        };

        Ok(Self { config, temp_dir })
    }

    /// Get temp directory path
    pub fn temp_path(&self) -> Option<&std::path::Path> {
        self.temp_dir.as_ref().map(|d| d.path())
    }

    /// Token file location inside the temp directory
    pub fn token_path(&self) -> Option<PathBuf> {
        self.temp_path().map(|dir| dir.join("paytask").join("token.json"))
    }

    /// Settings for `base_url` with token persistence per the config
    pub fn settings(&self, base_url: &str) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = base_url.to_string();
        settings.auth.persist_token = self.config.persist_token && self.temp_dir.is_some();
        settings.auth.token_path = self.token_path();
        settings
    }

    /// Token storage matching [`SimpleTestContext::settings`]
    pub fn token_storage(&self) -> TokenStorage {
        match (self.config.persist_token, self.token_path()) {
            (true, Some(path)) => TokenStorage::file(path),
            _ => TokenStorage::in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_context_creation() {
        let ctx = SimpleTestContext::new().expect("Failed to create simple test context");
        assert!(ctx.temp_dir.is_some());
        assert!(ctx.token_path().unwrap().ends_with("paytask/token.json"));
    }

    #[test]
    fn test_simple_context_with_config() {
        let config = SimpleTestConfig {
            persist_token: false,
            use_temp_files: false,
        };

        let ctx = SimpleTestContext::new_with_config(config).expect("Failed to create test context");
        assert!(ctx.temp_dir.is_none());
        assert!(ctx.token_storage().path().is_none());
        assert!(!ctx.settings("http://localhost:5000/api").auth.persist_token);
    }
}
