//! # Configuration
//!
//! Environment-derived settings injected into the engine and API client:
//! the API base URL and the category-name to category-code map. Neither is
//! engine-owned state.

use anyhow::{Context, Result};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "GAMEDEX_API_URL";

/// Environment variable holding the category map, comma-separated
/// `Name:CODE` pairs (e.g. `Action:A,Puzzle:P`).
pub const CATEGORIES_ENV: &str = "GAMEDEX_CATEGORIES";

/// Connection settings for the remote catalog API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    /// Build from an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read the base URL from `GAMEDEX_API_URL`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV)
            .with_context(|| format!("{API_URL_ENV} is not set"))?;
        Ok(Self::new(base_url))
    }
}

/// Lookup from category name to the short code embedded in identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: Vec<(String, String)>,
}

impl CategoryMap {
    /// Parse comma-separated `Name:CODE` pairs.
    ///
    /// Malformed pairs (no colon, empty name or code) are skipped with a
    /// warning rather than failing the whole map.
    pub fn parse(raw: &str) -> Self {
        let mut entries = Vec::new();
        for pair in raw.split(',').filter(|p| !p.trim().is_empty()) {
            match pair.split_once(':') {
                Some((name, code)) if !name.trim().is_empty() && !code.trim().is_empty() => {
                    entries.push((name.trim().to_string(), code.trim().to_string()));
                }
                _ => {
                    tracing::warn!("skipping malformed category pair: {pair:?}");
                }
            }
        }
        Self { entries }
    }

    /// Read the map from `GAMEDEX_CATEGORIES`; empty map when unset.
    pub fn from_env() -> Self {
        match std::env::var(CATEGORIES_ENV) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Self::default(),
        }
    }

    /// Short code for a category name, if configured.
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, code)| code.as_str())
    }

    /// Configured category names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
