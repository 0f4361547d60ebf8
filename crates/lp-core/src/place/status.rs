//! Status token table

use std::collections::BTreeMap;

/// Maps status tokens from the sheet to whether the place is active.
///
/// Lookups are case-sensitive. A blank status counts as active unless the
/// table has an explicit `""` entry; unknown tokens are inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTable {
    tokens: BTreeMap<String, bool>,
}

impl StatusTable {
    pub fn new(tokens: BTreeMap<String, bool>) -> Self {
        Self { tokens }
    }

    /// Table where only the given tokens are active
    pub fn active<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(|t| (t.into(), true)).collect(),
        }
    }

    pub fn is_active(&self, status: &str) -> bool {
        match self.tokens.get(status) {
            Some(active) => *active,
            None => status.is_empty(),
        }
    }
}

impl From<&crate::config::RankingConfig> for StatusTable {
    fn from(config: &crate::config::RankingConfig) -> Self {
        Self::new(config.statuses.clone())
    }
}
