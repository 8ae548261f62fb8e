use serde::{Deserialize, Serialize};

use drawer_core::{DomainError, DomainResult};

/// Validated item name: non-empty after trimming, at most 255 bytes (the
/// column width).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemName(String);

impl ItemName {
    pub const MAX_LEN: usize = 255;

    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::invalid_input("item name cannot be empty"));
        }
        if name.len() > Self::MAX_LEN {
            return Err(DomainError::invalid_input(format!(
                "item name longer than {} bytes",
                Self::MAX_LEN
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A per-owner named counter. `count` is never negative: inputs are
/// validated before the store is touched, and the store only decrements
/// through a conditioned update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounter {
    pub item: String,
    pub count: i64,
}
