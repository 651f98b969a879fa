//! Runtime engine configuration.
//!
//! ```toml
//! strictPagination = true
//! fetchOneProbe = false
//! dialect = "postgresql"
//! ```

use squall_types::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EngineConfig {
    /// Reject offset/limit queries without ORDER BY instead of warning.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strict_pagination: bool,

    /// Render `fetch_one` with `LIMIT 2` instead of reading every match.
    #[cfg_attr(feature = "serde", serde(default = "yes"))]
    pub fetch_one_probe: bool,

    /// Render for this dialect instead of the one the session reports.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dialect: Option<Dialect>,
}

#[cfg(feature = "serde")]
fn yes() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_pagination: false,
            fetch_one_probe: true,
            dialect: None,
        }
    }
}

impl EngineConfig {
    pub fn strict_pagination(mut self, strict: bool) -> Self {
        self.strict_pagination = strict;
        self
    }

    pub fn fetch_one_probe(mut self, probe: bool) -> Self {
        self.fetch_one_probe = probe;
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}
