//! Session persistence configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Where the session token is kept between runs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Token file; `None` keeps the session in memory only
    pub token_file: Option<PathBuf>,
}

impl SessionConfig {
    pub fn is_persistent(&self) -> bool {
        self.token_file.is_some()
    }
}
