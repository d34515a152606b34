//! Index configuration
//!
//! Loaded from a JSON file when one is given, otherwise defaults apply.
//! Command line flags override individual fields afterwards.

use crate::rmq::RmqTier;
use crate::tree::BuildStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

/// Configuration for building and querying an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Suffix tree construction algorithm (default: ukkonen)
    pub strategy: BuildStrategy,
    /// Lowercase text and patterns before indexing (default: false)
    pub case_insensitive: bool,
    /// Largest input accepted, in bytes (default: 16MB)
    /// The naive strategy is quadratic, keep this small when using it
    pub max_text_size: u64,
    /// Tier used for raw array range minimum queries (default: sparse-table)
    pub rmq_tier: RmqTier,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            strategy: BuildStrategy::Ukkonen,
            case_insensitive: false,
            max_text_size: 16 * 1024 * 1024, // 16MB
            rmq_tier: RmqTier::SparseTable,
        }
    }
}

impl IndexConfig {
    /// Read a configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Apply case folding to text or a pattern
    pub fn fold<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.case_insensitive {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Reject inputs above `max_text_size`
    pub fn check_size(&self, len: u64) -> Result<()> {
        if len > self.max_text_size {
            anyhow::bail!(
                "Input is {} bytes, above the configured limit of {} bytes",
                len,
                self.max_text_size
            );
        }
        Ok(())
    }
}
