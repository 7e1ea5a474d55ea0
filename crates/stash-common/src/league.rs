use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub const STANDARD_LEAGUE: &str = "Standard";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A newtype struct that represents a League in the Path of Exile API data.
/// Stash contents are always scoped to one league.
pub struct League {
    inner: String,
}

impl League {
    pub fn new(league: String) -> Self {
        Self { inner: league }
    }
}

impl Default for League {
    fn default() -> Self {
        Self::new(STANDARD_LEAGUE.into())
    }
}

impl From<&str> for League {
    fn from(value: &str) -> Self {
        Self::new(value.to_owned())
    }
}

impl AsRef<str> for League {
    fn as_ref(&self) -> &str {
        self.inner.as_str()
    }
}

impl Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}
